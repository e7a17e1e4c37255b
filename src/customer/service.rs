//! Customer Service
//!
//! Business logic for customer registration and customer CRUD. The
//! registration workflow persists the customer, resolves or creates the
//! device types, inserts the devices, and links them to the customer as a
//! single all-or-nothing transaction.

use super::repository::CustomerRepository;
use super::types::{
    parse_warranty_date, serialize_address, CreateCustomerRequest, Customer, CustomerDetail,
    CustomerDevice, OwnedDevice, UpdateCustomerRequest,
};
use crate::device::Device;
use crate::error::{Error, Result};
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::info;
use uuid::Uuid;

/// Returns the trimmed text only when it is non-empty.
///
/// Empty or whitespace-only common-issues input must not overwrite an
/// existing stored value.
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

/// Customer service
pub struct CustomerService {
    pool: MySqlPool,
    repo: CustomerRepository,
}

impl CustomerService {
    /// Create new service
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            repo: CustomerRepository::new(pool.clone()),
            pool,
        }
    }

    /// Register a customer together with zero or more devices.
    ///
    /// All writes happen inside one transaction: the customer row, a
    /// find-or-create of each device type by its (type, brand, model)
    /// natural key, the device rows, and the customer-device links. Any
    /// failure rolls everything back; no partial rows persist. The acting
    /// user is recorded on the customer and link rows.
    pub async fn register_customer(
        &self,
        req: CreateCustomerRequest,
        actor: &str,
    ) -> Result<Customer> {
        req.validate().map_err(Error::Validation)?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: req.name.clone(),
            company_name: req.company_name.clone(),
            contact_person: req.contact_person.clone(),
            phone: req.phone.clone(),
            email: req.email.clone(),
            line_id: req.line_id.clone(),
            shop_address: serialize_address(req.shop_address.as_ref())?,
            company_address: serialize_address(req.company_address.as_ref())?,
            created_by: actor.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Transaction(e.to_string()))?;

        self.repo.insert_customer(&mut tx, &customer).await?;

        for descriptor in &req.devices {
            let type_id = self
                .repo
                .resolve_device_type(
                    &mut tx,
                    &descriptor.device_type.device_type,
                    &descriptor.device_type.brand,
                    &descriptor.device_type.model,
                    non_empty(descriptor.device_type.common_issues.as_deref()),
                    now,
                )
                .await?;

            let warranty_end_date = descriptor
                .warranty_end_date
                .as_deref()
                .map(parse_warranty_date)
                .transpose()
                .map_err(Error::Validation)?;

            let device = Device {
                id: Uuid::new_v4().to_string(),
                device_type_id: type_id,
                serial_number: descriptor.serial_number.clone(),
                installation_location: descriptor.installation_location.clone(),
                warranty_end_date,
                created_at: now,
                updated_at: now,
            };
            self.repo.insert_device(&mut tx, &device).await?;

            let link = CustomerDevice {
                customer_id: customer.id.clone(),
                device_id: device.id,
                start_date: now,
                created_by: actor.to_string(),
            };
            self.repo.insert_link(&mut tx, &link).await?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Transaction(e.to_string()))?;

        info!(
            customer_id = %customer.id,
            device_count = req.devices.len(),
            created_by = %actor,
            "Customer registered"
        );

        Ok(customer)
    }

    /// List all customers, most recently updated first
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.repo.get_all_customers().await
    }

    /// Get a customer with its eagerly loaded device graph
    pub async fn get_customer_detail(&self, id: &str) -> Result<CustomerDetail> {
        let customer = self
            .repo
            .get_customer(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Customer {} not found", id)))?;

        let devices = self
            .repo
            .get_owned_devices(id)
            .await?
            .into_iter()
            .map(OwnedDevice::from)
            .collect();

        Ok(CustomerDetail { customer, devices })
    }

    /// Full-field replace of a customer
    pub async fn update_customer(&self, id: &str, req: UpdateCustomerRequest) -> Result<Customer> {
        req.validate().map_err(Error::Validation)?;

        let current = self
            .repo
            .get_customer(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Customer {} not found", id)))?;

        let updated = Customer {
            id: current.id,
            name: req.name,
            company_name: req.company_name,
            contact_person: req.contact_person,
            phone: req.phone,
            email: req.email,
            line_id: req.line_id,
            shop_address: serialize_address(req.shop_address.as_ref())?,
            company_address: serialize_address(req.company_address.as_ref())?,
            created_by: current.created_by,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };
        self.repo.update_customer(&updated).await?;
        Ok(updated)
    }

    /// Hard delete a customer and its link rows
    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        if self.repo.get_customer(id).await?.is_none() {
            return Err(Error::NotFound(format!("Customer {} not found", id)));
        }
        self.repo.delete_customer(id).await?;
        info!(customer_id = %id, "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_filters_blank_issue_text() {
        assert_eq!(non_empty(Some("paper jam")), Some("paper jam"));
        assert_eq!(non_empty(Some("  streaky print  ")), Some("streaky print"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
