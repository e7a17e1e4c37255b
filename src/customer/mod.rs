//! Customer registration and CRUD
//!
//! The registration workflow is the transactional core: customer + device
//! types (find-or-create) + devices + links, all-or-nothing.

mod repository;
mod service;
mod types;

pub use repository::CustomerRepository;
pub use service::CustomerService;
pub use types::{
    parse_warranty_date, serialize_address, Address, CreateCustomerRequest, Customer,
    CustomerDetail, CustomerDevice, DeviceDescriptor, DeviceTypeDescriptor, OwnedDevice,
    OwnedDeviceRow, UpdateCustomerRequest,
};
