//! Read-only projections of canonical records for display, export and search.
//!
//! Each projection has its own fallback literal for a missing status, and
//! callers compare against those literals, so they are kept distinct.

use serde::Serialize;

use facility_model::CanonicalInventoryRecord;

use crate::utils::{is_low_stock, record_value};

/// Status shown in the detail modal and the table when nothing is set.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Resolve status from the column, then the bag's `currentPhase`.
fn status_or(record: &CanonicalInventoryRecord, fallback: &str) -> String {
    [record.status.as_str(), record.data.current_phase.as_str()]
        .into_iter()
        .find(|status| !status.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Detail view of a single item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub status: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub reorder_point: u32,
    pub expiration: String,
    pub barcode: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub model: String,
    pub supplier: String,
    pub warranty: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub tracked: bool,
    pub favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: u32,
    pub status: String,
    pub expiration: String,
    pub low_stock: bool,
    pub favorite: bool,
}

/// One row of a spreadsheet export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub total_value: f64,
    pub status: String,
    pub expiration: String,
    pub sku: String,
    pub barcode: String,
    pub supplier: String,
}

/// Search entry with a precomputed lowercase haystack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: String,
    pub haystack: String,
}

impl SearchEntry {
    /// Case-insensitive substring match; a blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.haystack.contains(&query)
    }
}

pub fn to_modal_view(records: &[CanonicalInventoryRecord]) -> Vec<ModalView> {
    records
        .iter()
        .map(|record| {
            let data = &record.data;
            ModalView {
                id: record.id.clone(),
                name: record.name.clone(),
                category: record.category.clone(),
                location: record.location.clone(),
                status: status_or(record, UNKNOWN_STATUS),
                quantity: record.quantity,
                unit_cost: record.unit_cost,
                reorder_point: record.reorder_point,
                expiration: record.expiry().to_string(),
                barcode: data.barcode.clone(),
                serial_number: data.serial_number.clone(),
                manufacturer: data.manufacturer.clone(),
                model: data.model.clone(),
                supplier: data.supplier.clone(),
                warranty: data.warranty.clone(),
                notes: data.notes.clone(),
                tags: data.tags.clone(),
                tracked: data.tracked,
                favorite: data.favorite,
                created_at: record.created_at.clone(),
                updated_at: record.updated_at.clone(),
            }
        })
        .collect()
}

pub fn to_table_view(records: &[CanonicalInventoryRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|record| TableRow {
            id: record.id.clone(),
            name: record.name.clone(),
            category: record.category.clone(),
            location: record.location.clone(),
            quantity: record.quantity,
            status: status_or(record, UNKNOWN_STATUS),
            expiration: record.expiry().to_string(),
            low_stock: is_low_stock(record),
            favorite: record.data.favorite,
        })
        .collect()
}

pub fn to_export_rows(records: &[CanonicalInventoryRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|record| ExportRow {
            name: record.name.clone(),
            category: record.category.clone(),
            location: record.location.clone(),
            quantity: record.quantity,
            unit_cost: record.unit_cost,
            total_value: record_value(record),
            status: status_or(record, ""),
            expiration: record.expiry().to_string(),
            sku: record.data.sku.clone(),
            barcode: record.data.barcode.clone(),
            supplier: record.data.supplier.clone(),
        })
        .collect()
}

pub fn to_search_index(records: &[CanonicalInventoryRecord]) -> Vec<SearchEntry> {
    records
        .iter()
        .map(|record| SearchEntry {
            id: record.id.clone(),
            name: record.name.clone(),
            category: record.category.clone(),
            status: status_or(record, ""),
            haystack: haystack(record),
        })
        .collect()
}

fn haystack(record: &CanonicalInventoryRecord) -> String {
    let data = &record.data;
    [
        record.name.as_str(),
        record.category.as_str(),
        record.location.as_str(),
        data.barcode.as_str(),
        data.serial_number.as_str(),
        data.manufacturer.as_str(),
        data.sku.as_str(),
        data.supplier.as_str(),
    ]
    .into_iter()
    .chain(data.tags.iter().map(String::as_str))
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_column_then_phase() {
        let mut record = CanonicalInventoryRecord::default();
        assert_eq!(status_or(&record, "x"), "x");
        record.data.current_phase = "Maintenance".to_string();
        assert_eq!(status_or(&record, "x"), "Maintenance");
        record.status = "active".to_string();
        assert_eq!(status_or(&record, "x"), "active");
    }

    #[test]
    fn test_haystack_skips_empty_parts() {
        let mut record = CanonicalInventoryRecord {
            name: "Gauze Pads".to_string(),
            ..Default::default()
        };
        record.data.tags = vec!["Sterile".to_string()];
        assert_eq!(haystack(&record), "gauze pads sterile");
    }
}
