//! The inventory extension bag.
//!
//! Stored as a JSON object next to the flat record columns. Decoding is
//! lenient: a known key holding the wrong JSON type is treated as absent
//! and gets the field's default. Keys this build does not know are kept
//! in [`ExtensionBag::extra`] and written back unchanged. A typed key can
//! never live in `extra`, so `from_json(&bag.to_json()) == bag` holds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shape-specific inventory fields that are not promoted to top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct ExtensionBag {
    pub barcode: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub model: String,
    pub supplier: String,
    pub warranty: String,
    pub notes: String,
    pub sku: String,
    /// Expiration date as entered (usually `YYYY-MM-DD`).
    pub expiration: String,
    /// Category as stored inside the blob by older writers.
    pub category: String,
    /// Status alias written by some screens instead of the top-level column.
    pub status: String,
    pub current_phase: String,
    pub tool_id: String,
    pub supply_id: String,
    pub equipment_id: String,
    pub hardware_id: String,
    pub tags: Vec<String>,
    pub tracked: bool,
    pub favorite: bool,
    pub is_active: bool,
    extra: BTreeMap<String, Value>,
}

impl Default for ExtensionBag {
    fn default() -> Self {
        Self {
            barcode: String::new(),
            serial_number: String::new(),
            manufacturer: String::new(),
            model: String::new(),
            supplier: String::new(),
            warranty: String::new(),
            notes: String::new(),
            sku: String::new(),
            expiration: String::new(),
            category: String::new(),
            status: String::new(),
            current_phase: String::new(),
            tool_id: String::new(),
            supply_id: String::new(),
            equipment_id: String::new(),
            hardware_id: String::new(),
            tags: Vec::new(),
            tracked: false,
            favorite: false,
            is_active: true,
            extra: BTreeMap::new(),
        }
    }
}

const TAGS: &str = "tags";
const TRACKED: &str = "tracked";
const FAVORITE: &str = "favorite";
const IS_ACTIVE: &str = "isActive";

/// Whether `key` names a typed field of [`ExtensionBag`].
pub fn is_typed_key(key: &str) -> bool {
    matches!(key, TAGS | TRACKED | FAVORITE | IS_ACTIVE)
        || ExtensionBag::default()
            .string_fields()
            .iter()
            .any(|(name, _)| *name == key)
}

impl ExtensionBag {
    /// Keys carried through without a typed field.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Store an untyped key. Returns `false`, leaving the bag unchanged,
    /// when `key` names a typed field.
    pub fn insert_extra(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if is_typed_key(&key) {
            return false;
        }
        self.extra.insert(key, value);
        true
    }

    fn string_fields(&self) -> [(&'static str, &String); 16] {
        [
            ("barcode", &self.barcode),
            ("serialNumber", &self.serial_number),
            ("manufacturer", &self.manufacturer),
            ("model", &self.model),
            ("supplier", &self.supplier),
            ("warranty", &self.warranty),
            ("notes", &self.notes),
            ("sku", &self.sku),
            ("expiration", &self.expiration),
            ("category", &self.category),
            ("status", &self.status),
            ("currentPhase", &self.current_phase),
            ("toolId", &self.tool_id),
            ("supplyId", &self.supply_id),
            ("equipmentId", &self.equipment_id),
            ("hardwareId", &self.hardware_id),
        ]
    }

    fn string_field_mut(&mut self, key: &str) -> Option<&mut String> {
        let field = match key {
            "barcode" => &mut self.barcode,
            "serialNumber" => &mut self.serial_number,
            "manufacturer" => &mut self.manufacturer,
            "model" => &mut self.model,
            "supplier" => &mut self.supplier,
            "warranty" => &mut self.warranty,
            "notes" => &mut self.notes,
            "sku" => &mut self.sku,
            "expiration" => &mut self.expiration,
            "category" => &mut self.category,
            "status" => &mut self.status,
            "currentPhase" => &mut self.current_phase,
            "toolId" => &mut self.tool_id,
            "supplyId" => &mut self.supply_id,
            "equipmentId" => &mut self.equipment_id,
            "hardwareId" => &mut self.hardware_id,
            _ => return None,
        };
        Some(field)
    }

    /// Decode a bag from a JSON blob. Non-objects yield the default bag.
    pub fn from_json(value: &Value) -> Self {
        let mut bag = Self::default();
        if let Some(object) = value.as_object() {
            bag.merge_object(object);
        }
        bag
    }

    /// Apply the keys present in `object` over the current values.
    ///
    /// A key holding the wrong JSON type leaves its field unchanged.
    pub fn merge_object(&mut self, object: &Map<String, Value>) {
        for (key, value) in object {
            if let Some(field) = self.string_field_mut(key) {
                if let Some(text) = value.as_str() {
                    *field = text.to_string();
                }
                continue;
            }
            match key.as_str() {
                TAGS => {
                    if let Some(tags) = decode_tags(value) {
                        self.tags = tags;
                    }
                }
                TRACKED => {
                    if let Some(flag) = value.as_bool() {
                        self.tracked = flag;
                    }
                }
                FAVORITE => {
                    if let Some(flag) = value.as_bool() {
                        self.favorite = flag;
                    }
                }
                IS_ACTIVE => {
                    if let Some(flag) = value.as_bool() {
                        self.is_active = flag;
                    }
                }
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Encode the bag as a JSON object.
    ///
    /// Empty strings and empty tag lists are omitted since they decode to
    /// the same defaults. Flags are always written.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        for (key, value) in self.string_fields() {
            if !value.is_empty() {
                object.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if !self.tags.is_empty() {
            object.insert(
                TAGS.to_string(),
                Value::Array(self.tags.iter().cloned().map(Value::String).collect()),
            );
        }
        object.insert(TRACKED.to_string(), Value::Bool(self.tracked));
        object.insert(FAVORITE.to_string(), Value::Bool(self.favorite));
        object.insert(IS_ACTIVE.to_string(), Value::Bool(self.is_active));
        Value::Object(object)
    }
}

/// Tags arrive either as an array of strings or as one comma-separated string.
fn decode_tags(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(text) => Some(
            text.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// A sparse bag update: only the keys it carries are applied.
///
/// Decoded from the same camelCase JSON object as [`ExtensionBag`], but a
/// missing key means "leave unchanged" rather than "use the default".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionPatch(Map<String, Value>);

impl ExtensionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one key, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn apply_to(&self, bag: &mut ExtensionBag) {
        bag.merge_object(&self.0);
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<&ExtensionBag> for ExtensionPatch {
    fn from(bag: &ExtensionBag) -> Self {
        match bag.to_json() {
            Value::Object(object) => Self(object),
            _ => Self::default(),
        }
    }
}

impl From<Value> for ExtensionBag {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<ExtensionBag> for Value {
    fn from(bag: ExtensionBag) -> Self {
        bag.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_missing_blob() {
        let bag = ExtensionBag::from_json(&Value::Null);
        assert_eq!(bag, ExtensionBag::default());
        assert!(!bag.tracked);
        assert!(!bag.favorite);
        assert!(bag.is_active);
    }

    #[test]
    fn test_wrong_types_are_defaulted() {
        let bag = ExtensionBag::from_json(&json!({
            "barcode": 12345,
            "tracked": "yes",
            "isActive": null,
            "tags": 7,
        }));
        assert_eq!(bag.barcode, "");
        assert!(!bag.tracked);
        assert!(bag.is_active);
        assert!(bag.tags.is_empty());
        assert!(bag.extra().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let blob = json!({
            "barcode": "0001",
            "calibrationDue": "2025-06-01",
            "tracked": true,
        });
        let bag = ExtensionBag::from_json(&blob);
        assert_eq!(bag.barcode, "0001");
        assert_eq!(bag.extra().get("calibrationDue"), Some(&json!("2025-06-01")));
        let encoded = bag.to_json();
        assert_eq!(encoded["calibrationDue"], json!("2025-06-01"));
        assert_eq!(ExtensionBag::from_json(&encoded), bag);
    }

    #[test]
    fn test_typed_keys_cannot_enter_extra() {
        let mut bag = ExtensionBag::default();
        assert!(!bag.insert_extra("barcode", json!("X")));
        assert!(!bag.insert_extra("tracked", json!(true)));
        assert!(bag.insert_extra("lotNumber", json!("L-1")));
        assert_eq!(bag.extra().len(), 1);
        assert_eq!(ExtensionBag::from_json(&bag.to_json()), bag);
    }

    #[test]
    fn test_merge_keeps_fields_the_object_omits() {
        let mut bag = ExtensionBag {
            tracked: true,
            current_phase: "Active".to_string(),
            ..Default::default()
        };
        let patch = ExtensionPatch::new()
            .with("barcode", "B1")
            .with("favorite", "not a bool");
        patch.apply_to(&mut bag);
        assert_eq!(bag.barcode, "B1");
        assert!(bag.tracked);
        assert!(!bag.favorite);
        assert_eq!(bag.current_phase, "Active");
    }

    #[test]
    fn test_patch_from_bag_restores_bag() {
        let mut bag = ExtensionBag {
            sku: "SKU-9".to_string(),
            favorite: true,
            ..Default::default()
        };
        bag.insert_extra("lotNumber", json!("L-2"));
        let mut restored = ExtensionBag::default();
        ExtensionPatch::from(&bag).apply_to(&mut restored);
        assert_eq!(restored, bag);
    }

    #[test]
    fn test_tags_from_comma_string() {
        let bag = ExtensionBag::from_json(&json!({ "tags": "sterile, single-use,," }));
        assert_eq!(bag.tags, vec!["sterile", "single-use"]);
    }
}
