//! Device Repository
//!
//! Database access layer for device and device-type lookups.

use super::types::{DeviceType, DeviceWithType};
use crate::error::Result;
use sqlx::MySqlPool;

/// Device repository for database operations
#[derive(Clone)]
pub struct DeviceRepository {
    pool: MySqlPool,
}

impl DeviceRepository {
    /// Create new repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get all devices with their types, most recently updated first
    pub async fn get_all_devices(&self) -> Result<Vec<DeviceWithType>> {
        let devices = sqlx::query_as::<_, DeviceWithType>(
            r#"SELECT d.id, d.serial_number, d.installation_location, d.warranty_end_date,
                      d.created_at, d.updated_at,
                      t.id AS device_type_id, t.device_type, t.brand, t.model, t.common_issues
               FROM devices d
               JOIN device_types t ON d.device_type_id = t.id
               ORDER BY d.updated_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(devices)
    }

    /// Get all device types
    pub async fn get_all_device_types(&self) -> Result<Vec<DeviceType>> {
        let types = sqlx::query_as::<_, DeviceType>(
            r#"SELECT id, device_type, brand, model, common_issues, created_at, updated_at
               FROM device_types
               ORDER BY updated_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    /// Get device by ID
    pub async fn get_device(&self, id: &str) -> Result<Option<DeviceWithType>> {
        let device = sqlx::query_as::<_, DeviceWithType>(
            r#"SELECT d.id, d.serial_number, d.installation_location, d.warranty_end_date,
                      d.created_at, d.updated_at,
                      t.id AS device_type_id, t.device_type, t.brand, t.model, t.common_issues
               FROM devices d
               JOIN device_types t ON d.device_type_id = t.id
               WHERE d.id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }

    /// Get device by exact serial number
    pub async fn get_device_by_serial(&self, serial: &str) -> Result<Option<DeviceWithType>> {
        let device = sqlx::query_as::<_, DeviceWithType>(
            r#"SELECT d.id, d.serial_number, d.installation_location, d.warranty_end_date,
                      d.created_at, d.updated_at,
                      t.id AS device_type_id, t.device_type, t.brand, t.model, t.common_issues
               FROM devices d
               JOIN device_types t ON d.device_type_id = t.id
               WHERE d.serial_number = ?"#,
        )
        .bind(serial)
        .fetch_optional(&self.pool)
        .await?;
        Ok(device)
    }
}
