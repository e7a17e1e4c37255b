//! Device lookups
//!
//! Read side for devices and their shared type classifications.

mod repository;
mod service;
mod types;

pub use repository::DeviceRepository;
pub use service::DeviceService;
pub use types::{Device, DeviceType, DeviceWithType};
