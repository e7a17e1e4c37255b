//! Customer Repository
//!
//! Database access layer for customers, device types, devices, and
//! customer-device links. Registration writes run against a caller-owned
//! transaction so the whole sequence commits or rolls back together.

use super::types::{Customer, CustomerDevice, OwnedDeviceRow};
use crate::device::Device;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Transaction};

/// Customer repository for database operations
#[derive(Clone)]
pub struct CustomerRepository {
    pool: MySqlPool,
}

impl CustomerRepository {
    /// Create new repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Registration writes (transactional)
    // ========================================================================

    /// Insert a customer row
    pub async fn insert_customer(
        &self,
        tx: &mut Transaction<'_, MySql>,
        customer: &Customer,
    ) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO customers
               (id, name, company_name, contact_person, phone, email, line_id,
                shop_address, company_address, created_by, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.company_name)
        .bind(&customer.contact_person)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.line_id)
        .bind(&customer.shop_address)
        .bind(&customer.company_address)
        .bind(&customer.created_by)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Resolve a device type by its (device_type, brand, model) natural key,
    /// creating it on first use.
    ///
    /// A single upsert guarded by the unique natural key closes the race
    /// window of a read-then-write pair. A non-empty incoming common_issues
    /// value overwrites the stored text (last write wins); NULL leaves the
    /// existing value unchanged.
    pub async fn resolve_device_type(
        &self,
        tx: &mut Transaction<'_, MySql>,
        device_type: &str,
        brand: &str,
        model: &str,
        common_issues: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let candidate_id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            r#"INSERT INTO device_types
               (id, device_type, brand, model, common_issues, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON DUPLICATE KEY UPDATE
                   common_issues = IF(VALUES(common_issues) IS NOT NULL,
                                      VALUES(common_issues), common_issues),
                   updated_at = VALUES(updated_at)"#,
        )
        .bind(&candidate_id)
        .bind(device_type)
        .bind(brand)
        .bind(model)
        .bind(common_issues)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        // The candidate id only sticks when the insert won; re-select by the
        // natural key to get the canonical id either way.
        let (id,): (String,) = sqlx::query_as(
            r#"SELECT id FROM device_types
               WHERE device_type = ? AND brand = ? AND model = ?"#,
        )
        .bind(device_type)
        .bind(brand)
        .bind(model)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| Error::Internal("Failed to resolve upserted device type".to_string()))?;

        Ok(id)
    }

    /// Insert a device row
    pub async fn insert_device(
        &self,
        tx: &mut Transaction<'_, MySql>,
        device: &Device,
    ) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO devices
               (id, device_type_id, serial_number, installation_location,
                warranty_end_date, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&device.id)
        .bind(&device.device_type_id)
        .bind(&device.serial_number)
        .bind(&device.installation_location)
        .bind(device.warranty_end_date)
        .bind(device.created_at)
        .bind(device.updated_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Insert a customer-device link row
    pub async fn insert_link(
        &self,
        tx: &mut Transaction<'_, MySql>,
        link: &CustomerDevice,
    ) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO customer_devices (customer_id, device_id, start_date, created_by)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&link.customer_id)
        .bind(&link.device_id)
        .bind(link.start_date)
        .bind(&link.created_by)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get all customers, most recently updated first
    pub async fn get_all_customers(&self) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"SELECT id, name, company_name, contact_person, phone, email, line_id,
                      shop_address, company_address, created_by, created_at, updated_at
               FROM customers
               ORDER BY updated_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    /// Get customer by ID
    pub async fn get_customer(&self, id: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"SELECT id, name, company_name, contact_person, phone, email, line_id,
                      shop_address, company_address, created_by, created_at, updated_at
               FROM customers WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    /// Get a customer's devices via link -> device -> type join
    pub async fn get_owned_devices(&self, customer_id: &str) -> Result<Vec<OwnedDeviceRow>> {
        let rows = sqlx::query_as::<_, OwnedDeviceRow>(
            r#"SELECT d.id AS device_id, d.serial_number, d.installation_location,
                      d.warranty_end_date, l.start_date,
                      t.id AS type_id, t.device_type, t.brand, t.model, t.common_issues,
                      t.created_at AS type_created_at, t.updated_at AS type_updated_at
               FROM customer_devices l
               JOIN devices d ON l.device_id = d.id
               JOIN device_types t ON d.device_type_id = t.id
               WHERE l.customer_id = ?
               ORDER BY l.start_date, d.id"#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ========================================================================
    // Update / Delete
    // ========================================================================

    /// Full-field replace of a customer row
    pub async fn update_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"UPDATE customers
               SET name = ?, company_name = ?, contact_person = ?, phone = ?,
                   email = ?, line_id = ?, shop_address = ?, company_address = ?,
                   updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&customer.name)
        .bind(&customer.company_name)
        .bind(&customer.contact_person)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.line_id)
        .bind(&customer.shop_address)
        .bind(&customer.company_address)
        .bind(customer.updated_at)
        .bind(&customer.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Hard delete a customer and its link rows in one transaction
    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM customer_devices WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
