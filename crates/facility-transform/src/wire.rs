//! HTTP API shape <-> canonical record.
//!
//! Field-for-field and symmetric: `from_wire(&to_wire(records))` gives the
//! records back unchanged.

use facility_model::{CanonicalInventoryRecord, ExtensionBag, WireRecord};

use crate::convert::{cost_from, count_from};

pub fn from_wire(rows: &[WireRecord]) -> Vec<CanonicalInventoryRecord> {
    rows.iter().map(from_wire_record).collect()
}

pub fn to_wire(records: &[CanonicalInventoryRecord]) -> Vec<WireRecord> {
    records.iter().map(to_wire_record).collect()
}

fn from_wire_record(row: &WireRecord) -> CanonicalInventoryRecord {
    CanonicalInventoryRecord {
        id: row.id.clone().unwrap_or_default(),
        facility_id: row.facility_id.clone().unwrap_or_default(),
        name: row.name.clone().unwrap_or_default(),
        category: row.category.clone().unwrap_or_default(),
        location: row.location.clone().unwrap_or_default(),
        status: row.status.clone().unwrap_or_default(),
        quantity: count_from(row.quantity),
        unit_cost: cost_from(row.unit_cost),
        reorder_point: count_from(row.reorder_point),
        created_at: row.created_at.clone().unwrap_or_default(),
        updated_at: row.updated_at.clone().unwrap_or_default(),
        expiration_date: row.expiration_date.clone().unwrap_or_default(),
        data: row
            .data
            .as_ref()
            .map(ExtensionBag::from_json)
            .unwrap_or_default(),
    }
}

fn to_wire_record(record: &CanonicalInventoryRecord) -> WireRecord {
    WireRecord {
        id: Some(record.id.clone()),
        facility_id: Some(record.facility_id.clone()),
        name: Some(record.name.clone()),
        category: Some(record.category.clone()),
        location: Some(record.location.clone()),
        status: Some(record.status.clone()),
        quantity: Some(i64::from(record.quantity)),
        unit_cost: Some(record.unit_cost),
        reorder_point: Some(i64::from(record.reorder_point)),
        created_at: Some(record.created_at.clone()),
        updated_at: Some(record.updated_at.clone()),
        expiration_date: Some(record.expiration_date.clone()),
        data: Some(record.data.to_json()),
    }
}
