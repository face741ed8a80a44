//! Canonical inventory record and sparse updates against it.

use serde::{Deserialize, Serialize};

use crate::extension::{ExtensionBag, ExtensionPatch};

/// The pivot shape every inventory format converts through.
///
/// Always fully populated: missing source values are replaced by `""`,
/// `0`, `[]` or the flag defaults of [`ExtensionBag`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalInventoryRecord {
    pub id: String,
    pub facility_id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub status: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub reorder_point: u32,
    /// RFC 3339 timestamp or empty.
    pub created_at: String,
    /// RFC 3339 timestamp or empty.
    pub updated_at: String,
    /// ISO 8601 date or empty.
    pub expiration_date: String,
    pub data: ExtensionBag,
}

impl CanonicalInventoryRecord {
    /// Expiry as shown to users: the bag value first, then the column.
    pub fn expiry(&self) -> &str {
        if self.data.expiration.is_empty() {
            &self.expiration_date
        } else {
            &self.data.expiration
        }
    }
}

/// A partial record; `None` means "leave unchanged".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// Bag keys to set; keys it omits keep their current values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtensionPatch>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl From<&CanonicalInventoryRecord> for RecordPatch {
    fn from(record: &CanonicalInventoryRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            facility_id: Some(record.facility_id.clone()),
            name: Some(record.name.clone()),
            category: Some(record.category.clone()),
            location: Some(record.location.clone()),
            status: Some(record.status.clone()),
            quantity: Some(record.quantity),
            unit_cost: Some(record.unit_cost),
            reorder_point: Some(record.reorder_point),
            created_at: Some(record.created_at.clone()),
            updated_at: Some(record.updated_at.clone()),
            expiration_date: Some(record.expiration_date.clone()),
            data: Some(ExtensionPatch::from(&record.data)),
        }
    }
}
