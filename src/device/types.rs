//! Device and DeviceType data structures

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Device type entity
///
/// A reusable (category, brand, model) classification shared across devices.
/// Uniquely identified by the (device_type, brand, model) triple.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeviceType {
    pub id: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub common_issues: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Device entity
///
/// A physical unit owned/used by a customer, referencing one DeviceType.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: String,
    pub device_type_id: String,
    pub serial_number: Option<String>,
    pub installation_location: Option<String>,
    pub warranty_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Device joined with its type, for list/detail views
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DeviceWithType {
    pub id: String,
    pub serial_number: Option<String>,
    pub installation_location: Option<String>,
    pub warranty_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub device_type_id: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub common_issues: Option<String>,
}
