//! Record construction, normalization and stock helpers.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use uuid::Uuid;

use facility_model::{CanonicalInventoryRecord, ExtensionBag, RecordPatch};

use crate::convert::parse_iso_date;

/// Phase given to records created without one.
pub const DEFAULT_PHASE: &str = "Active";

/// Trim, collapse whitespace runs and title-case each word.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Lowercase, join words with `_`, keep only `[a-z0-9_]`.
pub fn normalize_category(category: &str) -> String {
    category
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '_')
        .collect()
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a new record from user input.
///
/// Timestamps are set to `now`. The bag starts tracked, not a favorite,
/// active and in the [`DEFAULT_PHASE`]; keys present in the partial's bag
/// are applied over those defaults. An empty phase falls back to
/// [`DEFAULT_PHASE`].
pub fn create_new(partial: &RecordPatch, now: DateTime<Utc>) -> CanonicalInventoryRecord {
    let stamp = timestamp(now);
    let mut data = ExtensionBag::default();
    data.tracked = true;
    data.favorite = false;
    data.is_active = true;
    if let Some(patch) = &partial.data {
        patch.apply_to(&mut data);
    }
    if data.current_phase.is_empty() {
        data.current_phase = DEFAULT_PHASE.to_string();
    }

    CanonicalInventoryRecord {
        id: partial
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        facility_id: partial.facility_id.clone().unwrap_or_default(),
        name: partial.name.clone().unwrap_or_default(),
        category: partial.category.clone().unwrap_or_default(),
        location: partial.location.clone().unwrap_or_default(),
        status: partial.status.clone().unwrap_or_default(),
        quantity: partial.quantity.unwrap_or_default(),
        unit_cost: partial.unit_cost.unwrap_or_default(),
        reorder_point: partial.reorder_point.unwrap_or_default(),
        created_at: stamp.clone(),
        updated_at: stamp,
        expiration_date: partial.expiration_date.clone().unwrap_or_default(),
        data,
    }
}

/// Merge a sparse update into a record and stamp `updatedAt`.
///
/// `id` and `createdAt` never change. Bag keys in the patch are applied
/// over the current bag; keys it omits keep their values.
pub fn apply_patch(
    record: &CanonicalInventoryRecord,
    patch: &RecordPatch,
    now: DateTime<Utc>,
) -> CanonicalInventoryRecord {
    fn merge<T: Clone>(target: &mut T, value: Option<&T>) {
        if let Some(value) = value {
            target.clone_from(value);
        }
    }

    let mut updated = record.clone();
    merge(&mut updated.facility_id, patch.facility_id.as_ref());
    merge(&mut updated.name, patch.name.as_ref());
    merge(&mut updated.category, patch.category.as_ref());
    merge(&mut updated.location, patch.location.as_ref());
    merge(&mut updated.status, patch.status.as_ref());
    merge(&mut updated.quantity, patch.quantity.as_ref());
    merge(&mut updated.unit_cost, patch.unit_cost.as_ref());
    merge(&mut updated.reorder_point, patch.reorder_point.as_ref());
    merge(&mut updated.expiration_date, patch.expiration_date.as_ref());
    if let Some(bag_patch) = &patch.data {
        bag_patch.apply_to(&mut updated.data);
    }
    updated.updated_at = timestamp(now);
    updated
}

/// At or below the reorder point. A zero reorder point disables the check.
pub fn is_low_stock(record: &CanonicalInventoryRecord) -> bool {
    record.reorder_point > 0 && record.quantity <= record.reorder_point
}

/// Whole days from `today` to the expiry date; negative once past.
pub fn days_until_expiration(record: &CanonicalInventoryRecord, today: NaiveDate) -> Option<i64> {
    let expiry = parse_iso_date(record.expiry())?;
    Some(expiry.signed_duration_since(today).num_days())
}

/// Expired strictly before `today`; items expiring today are still usable.
pub fn is_expired(record: &CanonicalInventoryRecord, today: NaiveDate) -> bool {
    days_until_expiration(record, today).is_some_and(|days| days < 0)
}

pub(crate) fn record_value(record: &CanonicalInventoryRecord) -> f64 {
    f64::from(record.quantity) * record.unit_cost
}

/// Sum of quantity times unit cost.
pub fn total_value(records: &[CanonicalInventoryRecord]) -> f64 {
    records.iter().map(record_value).sum()
}
