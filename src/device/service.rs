//! Device Service
//!
//! Read-side business logic for devices and device types.

use super::repository::DeviceRepository;
use super::types::{DeviceType, DeviceWithType};
use crate::error::{Error, Result};
use sqlx::MySqlPool;

/// Device lookup service
pub struct DeviceService {
    repo: DeviceRepository,
}

impl DeviceService {
    /// Create new service
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repo: DeviceRepository::new(pool),
        }
    }

    /// List all devices with their types
    pub async fn list_devices(&self) -> Result<Vec<DeviceWithType>> {
        self.repo.get_all_devices().await
    }

    /// List all device types
    pub async fn list_device_types(&self) -> Result<Vec<DeviceType>> {
        self.repo.get_all_device_types().await
    }

    /// Get device by ID
    pub async fn get_device(&self, id: &str) -> Result<DeviceWithType> {
        self.repo
            .get_device(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Device {} not found", id)))
    }

    /// Get device by exact serial number
    ///
    /// A missing serial surfaces as NotFound rather than a null sentinel.
    pub async fn get_device_by_serial(&self, serial: &str) -> Result<DeviceWithType> {
        self.repo
            .get_device_by_serial(serial)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Device with serial '{}' not found", serial)))
    }
}
