//! Customer Types
//!
//! Data structures for customers, device descriptors, and the
//! customer-device link records.

use crate::device::DeviceType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Database Entities
// ============================================================================

/// Customer entity
///
/// Address fields hold the JSON text form of [`Address`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub line_id: Option<String>,
    pub shop_address: Option<String>,
    pub company_address: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer-device link entity
///
/// Records that a customer possesses a device from a given start date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerDevice {
    pub customer_id: String,
    pub device_id: String,
    pub start_date: DateTime<Utc>,
    pub created_by: String,
}

// ============================================================================
// Structured Address
// ============================================================================

/// Structured address, serialized to JSON text before storage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub subdistrict: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Serialize an optional address to its stored JSON text form
pub fn serialize_address(addr: Option<&Address>) -> Result<Option<String>, serde_json::Error> {
    addr.map(serde_json::to_string).transpose()
}

// ============================================================================
// API Request Types
// ============================================================================

/// Device type descriptor within a registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceTypeDescriptor {
    pub device_type: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub common_issues: Option<String>,
}

/// Device descriptor within a registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceDescriptor {
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub installation_location: Option<String>,
    /// Warranty end date as YYYY-MM-DD; unparsable input fails the whole registration
    #[serde(default)]
    pub warranty_end_date: Option<String>,
    pub device_type: DeviceTypeDescriptor,
}

/// Create customer request (registration workflow input)
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub line_id: Option<String>,
    #[serde(default)]
    pub shop_address: Option<Address>,
    #[serde(default)]
    pub company_address: Option<Address>,
    #[serde(default)]
    pub devices: Vec<DeviceDescriptor>,
}

/// Update customer request (full-field replace)
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub line_id: Option<String>,
    #[serde(default)]
    pub shop_address: Option<Address>,
    #[serde(default)]
    pub company_address: Option<Address>,
}

// ============================================================================
// Extended Response Types
// ============================================================================

/// Flat row from the customer detail join (link -> device -> type)
#[derive(Debug, Clone, FromRow)]
pub struct OwnedDeviceRow {
    pub device_id: String,
    pub serial_number: Option<String>,
    pub installation_location: Option<String>,
    pub warranty_end_date: Option<NaiveDate>,
    pub start_date: DateTime<Utc>,
    pub type_id: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub common_issues: Option<String>,
    pub type_created_at: DateTime<Utc>,
    pub type_updated_at: DateTime<Utc>,
}

/// A customer's device with its type and ownership start date
#[derive(Debug, Clone, Serialize)]
pub struct OwnedDevice {
    pub device_id: String,
    pub serial_number: Option<String>,
    pub installation_location: Option<String>,
    pub warranty_end_date: Option<NaiveDate>,
    pub start_date: DateTime<Utc>,
    pub device_type: DeviceType,
}

impl From<OwnedDeviceRow> for OwnedDevice {
    fn from(row: OwnedDeviceRow) -> Self {
        Self {
            device_id: row.device_id,
            serial_number: row.serial_number,
            installation_location: row.installation_location,
            warranty_end_date: row.warranty_end_date,
            start_date: row.start_date,
            device_type: DeviceType {
                id: row.type_id,
                device_type: row.device_type,
                brand: row.brand,
                model: row.model,
                common_issues: row.common_issues,
                created_at: row.type_created_at,
                updated_at: row.type_updated_at,
            },
        }
    }
}

/// Customer with eagerly loaded devices for detail views
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub devices: Vec<OwnedDevice>,
}

// ============================================================================
// Validation
// ============================================================================

fn validate_profile_fields(name: &str, email: Option<&str>, phone: Option<&str>) -> Result<(), String> {
    if name.trim().is_empty() || name.len() > 200 {
        return Err("name must be 1-200 characters".to_string());
    }
    if let Some(email) = email {
        let email_regex = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
        if !email_regex.is_match(email) {
            return Err(format!("email '{}' is not a valid address", email));
        }
    }
    if let Some(phone) = phone {
        if phone.len() > 50 {
            return Err("phone must be at most 50 characters".to_string());
        }
    }
    Ok(())
}

impl DeviceTypeDescriptor {
    pub fn validate(&self) -> Result<(), String> {
        if self.device_type.trim().is_empty() || self.device_type.len() > 100 {
            return Err("device_type must be 1-100 characters".to_string());
        }
        if self.brand.trim().is_empty() || self.brand.len() > 100 {
            return Err("brand must be 1-100 characters".to_string());
        }
        if self.model.trim().is_empty() || self.model.len() > 100 {
            return Err("model must be 1-100 characters".to_string());
        }
        Ok(())
    }
}

impl CreateCustomerRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_profile_fields(&self.name, self.email.as_deref(), self.phone.as_deref())?;
        for descriptor in &self.devices {
            descriptor.device_type.validate()?;
        }
        Ok(())
    }
}

impl UpdateCustomerRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_profile_fields(&self.name, self.email.as_deref(), self.phone.as_deref())
    }
}

/// Parse a warranty end date in YYYY-MM-DD form
pub fn parse_warranty_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("warranty_end_date '{}' is not a valid YYYY-MM-DD date", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: "Acme".to_string(),
            company_name: None,
            contact_person: Some("Somchai".to_string()),
            phone: Some("021234567".to_string()),
            email: Some("acme@example.com".to_string()),
            line_id: None,
            shop_address: None,
            company_address: None,
            devices: vec![DeviceDescriptor {
                serial_number: Some("SN1".to_string()),
                installation_location: None,
                warranty_end_date: None,
                device_type: DeviceTypeDescriptor {
                    device_type: "Printer".to_string(),
                    brand: "Epson".to_string(),
                    model: "L3210".to_string(),
                    common_issues: None,
                },
            }],
        }
    }

    #[test]
    fn test_validate_accepts_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut req = valid_request();
        req.name = "  ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut req = valid_request();
        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_device_type_brand() {
        let mut req = valid_request();
        req.devices[0].device_type.brand = "".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_parse_warranty_date_valid() {
        assert_eq!(
            parse_warranty_date("2026-01-31"),
            Ok(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap())
        );
    }

    #[test]
    fn test_parse_warranty_date_invalid() {
        assert!(parse_warranty_date("31/01/2026").is_err());
        assert!(parse_warranty_date("2026-13-01").is_err());
        assert!(parse_warranty_date("soon").is_err());
    }

    #[test]
    fn test_serialize_address_json_form() {
        let addr = Address {
            street: Some("99 Rama IX Rd".to_string()),
            province: Some("Bangkok".to_string()),
            ..Default::default()
        };
        let json = serialize_address(Some(&addr)).unwrap().unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serialize_address(None).unwrap().is_none());
    }

    #[test]
    fn test_owned_device_from_row_nests_type() {
        let now = Utc::now();
        let row = OwnedDeviceRow {
            device_id: "d1".to_string(),
            serial_number: Some("SN1".to_string()),
            installation_location: None,
            warranty_end_date: None,
            start_date: now,
            type_id: "t1".to_string(),
            device_type: "Printer".to_string(),
            brand: "Epson".to_string(),
            model: "L3210".to_string(),
            common_issues: Some("paper jam".to_string()),
            type_created_at: now,
            type_updated_at: now,
        };

        let owned = OwnedDevice::from(row);
        assert_eq!(owned.device_id, "d1");
        assert_eq!(owned.device_type.id, "t1");
        assert_eq!(owned.device_type.brand, "Epson");
        assert_eq!(owned.device_type.common_issues.as_deref(), Some("paper jam"));
    }
}
