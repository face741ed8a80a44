//! Database row <-> canonical record.

use facility_model::{
    CanonicalInventoryRecord, ExtensionBag, ExtensionPatch, PersistenceRow, RecordPatch,
};

use crate::convert::{cost_from, count_from, non_empty};

/// Category used when neither the column nor the blob carries one.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Build a canonical record from a stored row.
///
/// Category falls back from the column to `data.category` and finally to
/// [`UNKNOWN_CATEGORY`]; empty strings count as missing.
pub fn from_persistence(row: &PersistenceRow) -> CanonicalInventoryRecord {
    let data = row
        .data
        .as_ref()
        .map(ExtensionBag::from_json)
        .unwrap_or_default();
    let category = non_empty(row.category.as_deref())
        .or_else(|| non_empty(Some(data.category.as_str())))
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_string();

    CanonicalInventoryRecord {
        id: row.id.clone().unwrap_or_default(),
        facility_id: row.facility_id.clone().unwrap_or_default(),
        name: row.name.clone().unwrap_or_default(),
        category,
        location: row.location.clone().unwrap_or_default(),
        status: row.status.clone().unwrap_or_default(),
        quantity: count_from(row.quantity),
        unit_cost: cost_from(row.unit_cost),
        reorder_point: count_from(row.reorder_point),
        created_at: row.created_at.clone().unwrap_or_default(),
        updated_at: row.updated_at.clone().unwrap_or_default(),
        expiration_date: row.expiration_date.clone().unwrap_or_default(),
        data,
    }
}

/// Convert many rows at once.
pub fn from_persistence_rows(rows: &[PersistenceRow]) -> Vec<CanonicalInventoryRecord> {
    rows.iter().map(from_persistence).collect()
}

/// Build a sparse row for an insert or partial update.
///
/// Only fields set on the patch appear in the row, so columns the caller
/// did not touch are left alone. This is deliberately not the inverse of
/// [`from_persistence`], which fills every field with a default.
pub fn to_persistence(patch: &RecordPatch) -> PersistenceRow {
    PersistenceRow {
        id: patch.id.clone(),
        facility_id: patch.facility_id.clone(),
        name: patch.name.clone(),
        category: patch.category.clone(),
        location: patch.location.clone(),
        status: patch.status.clone(),
        quantity: patch.quantity.map(i64::from),
        unit_cost: patch.unit_cost,
        reorder_point: patch.reorder_point.map(i64::from),
        created_at: patch.created_at.clone(),
        updated_at: patch.updated_at.clone(),
        expiration_date: patch.expiration_date.clone(),
        data: patch.data.as_ref().map(ExtensionPatch::to_json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_prefers_column() {
        let row = PersistenceRow {
            category: Some("supplies".to_string()),
            data: Some(json!({ "category": "tools" })),
            ..Default::default()
        };
        assert_eq!(from_persistence(&row).category, "supplies");
    }

    #[test]
    fn test_category_falls_back_to_blob_then_unknown() {
        let row = PersistenceRow {
            category: Some(String::new()),
            data: Some(json!({ "category": "tools" })),
            ..Default::default()
        };
        assert_eq!(from_persistence(&row).category, "tools");

        let row = PersistenceRow::default();
        assert_eq!(from_persistence(&row).category, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_empty_patch_gives_empty_row() {
        assert_eq!(
            to_persistence(&RecordPatch::default()),
            PersistenceRow::default()
        );
    }
}
