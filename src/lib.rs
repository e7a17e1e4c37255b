//! Repairhub Server
//!
//! REST backend for a repair-shop customer and device registry.
//!
//! ## Components
//!
//! 1. CustomerService - registration workflow (transactional) and customer CRUD
//! 2. DeviceService - device and device-type lookups
//! 3. WebAPI - REST endpoints with bearer-token authentication
//!
//! ## Design Principles
//!
//! - The registration workflow writes customer, device types, devices, and
//!   links in one transaction; no partial state is ever visible
//! - Device types are deduplicated by their (type, brand, model) natural key
//!   via an upsert guarded by a unique constraint
//! - The acting user is passed explicitly, never read from ambient context

pub mod customer;
pub mod device;
pub mod error;
pub mod models;
pub mod state;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
