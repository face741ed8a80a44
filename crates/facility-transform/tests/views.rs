//! Tests for projections and record utilities.

use chrono::{NaiveDate, TimeZone, Utc};
use facility_model::{CanonicalInventoryRecord, ExtensionPatch, RecordPatch};
use facility_transform::{
    apply_patch, create_new, days_until_expiration, is_expired, normalize_category,
    normalize_name, to_export_rows, to_modal_view, to_search_index, to_table_view, total_value,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(name: &str, quantity: u32, unit_cost: f64) -> CanonicalInventoryRecord {
    CanonicalInventoryRecord {
        id: format!("id-{name}"),
        name: name.to_string(),
        quantity,
        unit_cost,
        ..Default::default()
    }
}

#[test]
fn status_fallback_literal_differs_per_projection() {
    let records = [record("Gauze", 1, 1.0)];
    assert_eq!(to_modal_view(&records)[0].status, "Unknown");
    assert_eq!(to_table_view(&records)[0].status, "Unknown");
    assert_eq!(to_export_rows(&records)[0].status, "");
    assert_eq!(to_search_index(&records)[0].status, "");
}

#[test]
fn status_falls_back_to_current_phase() {
    let mut item = record("Gauze", 1, 1.0);
    item.data.current_phase = "Quarantine".to_string();
    let records = [item];
    assert_eq!(to_modal_view(&records)[0].status, "Quarantine");
    assert_eq!(to_export_rows(&records)[0].status, "Quarantine");
}

#[test]
fn table_flags_low_stock() {
    let mut low = record("Gloves", 2, 0.1);
    low.reorder_point = 5;
    let plenty = record("Masks", 200, 0.2);
    let rows = to_table_view(&[low, plenty]);
    assert!(rows[0].low_stock);
    assert!(!rows[1].low_stock);
}

#[test]
fn export_rows_carry_total_value() {
    let rows = to_export_rows(&[record("Syringe", 4, 2.5)]);
    assert_eq!(rows[0].total_value, 10.0);
    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["totalValue"], 10.0);
}

#[test]
fn search_is_case_insensitive_over_bag_fields() {
    let mut item = record("Pulse Oximeter", 1, 40.0);
    item.data.manufacturer = "Nonin".to_string();
    item.data.tags = vec!["Cardio".to_string()];
    let index = to_search_index(&[item]);
    let entry = &index[0];
    assert!(entry.matches("NONIN"));
    assert!(entry.matches("cardio"));
    assert!(entry.matches("  "));
    assert!(!entry.matches("stethoscope"));
}

#[test]
fn normalize_name_title_cases_and_collapses() {
    assert_eq!(normalize_name("  surgical   scissors "), "Surgical Scissors");
    assert_eq!(normalize_name("IV\tPOLE"), "Iv Pole");
    assert_eq!(normalize_name(""), "");
}

#[test]
fn normalize_category_keeps_safe_characters() {
    assert_eq!(normalize_category("Office Supplies!!"), "office_supplies");
    assert_eq!(normalize_category("  PPE   Kits 2 "), "ppe_kits_2");
    assert_eq!(normalize_category("Café"), "caf");
}

#[test]
fn create_new_applies_bag_defaults() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let partial = RecordPatch {
        name: Some("Defibrillator".to_string()),
        ..Default::default()
    };
    let created = create_new(&partial, now);
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Defibrillator");
    assert_eq!(created.created_at, "2024-06-01T12:00:00.000Z");
    assert_eq!(created.updated_at, created.created_at);
    assert!(created.data.tracked);
    assert!(!created.data.favorite);
    assert!(created.data.is_active);
    assert_eq!(created.data.current_phase, "Active");
}

#[test]
fn create_new_defaults_flags_the_partial_bag_omits() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let partial: RecordPatch =
        serde_json::from_str(r#"{"name":"Defib","data":{"barcode":"B1"}}"#).unwrap();
    let created = create_new(&partial, now);
    assert_eq!(created.data.barcode, "B1");
    assert!(created.data.tracked);
    assert!(!created.data.favorite);
    assert!(created.data.is_active);
    assert_eq!(created.data.current_phase, "Active");
}

#[test]
fn create_new_keeps_flags_the_partial_sets() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let partial = RecordPatch {
        id: Some("inv-7".to_string()),
        data: Some(
            ExtensionPatch::new()
                .with("tracked", false)
                .with("favorite", true)
                .with("currentPhase", "Retired"),
        ),
        ..Default::default()
    };
    let created = create_new(&partial, now);
    assert_eq!(created.id, "inv-7");
    assert!(created.data.favorite);
    assert!(!created.data.tracked);
    assert!(created.data.is_active);
    assert_eq!(created.data.current_phase, "Retired");
}

#[test]
fn apply_patch_keeps_identity() {
    let mut original = record("Gauze", 5, 1.0);
    original.created_at = "2024-01-01T00:00:00.000Z".to_string();
    let patch = RecordPatch {
        id: Some("other".to_string()),
        quantity: Some(9),
        ..Default::default()
    };
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let updated = apply_patch(&original, &patch, now);
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.quantity, 9);
    assert_eq!(updated.name, "Gauze");
    assert_eq!(updated.updated_at, "2024-02-01T00:00:00.000Z");
}

#[test]
fn apply_patch_merges_bag_keys() {
    let mut original = record("Gauze", 5, 1.0);
    original.data.tracked = true;
    original.data.sku = "SKU-1".to_string();
    let patch = RecordPatch {
        data: Some(ExtensionPatch::new().with("favorite", true)),
        ..Default::default()
    };
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let updated = apply_patch(&original, &patch, now);
    assert!(updated.data.favorite);
    assert!(updated.data.tracked);
    assert_eq!(updated.data.sku, "SKU-1");
}

#[test]
fn expiration_helpers() {
    let mut item = record("Saline", 1, 1.0);
    assert_eq!(days_until_expiration(&item, date(2025, 1, 1)), None);
    assert!(!is_expired(&item, date(2025, 1, 1)));

    item.expiration_date = "2025-01-10".to_string();
    assert_eq!(days_until_expiration(&item, date(2025, 1, 1)), Some(9));
    assert!(!is_expired(&item, date(2025, 1, 10)));
    assert!(is_expired(&item, date(2025, 1, 11)));
}

#[test]
fn total_value_sums_records() {
    let records = [record("A", 2, 1.5), record("B", 3, 2.0)];
    assert_eq!(total_value(&records), 9.0);
    assert_eq!(total_value(&[]), 0.0);
}
