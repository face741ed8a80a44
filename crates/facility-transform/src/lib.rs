//! Conversions between inventory record shapes.
//!
//! Every external shape converts through [`CanonicalInventoryRecord`]:
//!
//! - **persistence**: database rows (snake_case, sparse writes)
//! - **wire**: HTTP API records (camelCase, symmetric)
//! - **csv_format**: spreadsheet import and export
//! - **views**: modal, table, export and search projections
//! - **utils**: record creation, normalization and stock helpers
//!
//! Readers never fail on malformed input; they substitute defaults.
//!
//! [`CanonicalInventoryRecord`]: facility_model::CanonicalInventoryRecord

pub mod convert;
pub mod csv_format;
pub mod error;
pub mod persistence;
pub mod utils;
pub mod views;
pub mod wire;

pub use csv_format::{CsvImportOptions, EXPORT_HEADERS, from_csv, from_csv_with, to_csv, write_csv};
pub use error::{Result, TransformError};
pub use persistence::{UNKNOWN_CATEGORY, from_persistence, from_persistence_rows, to_persistence};
pub use utils::{
    apply_patch, create_new, days_until_expiration, is_expired, is_low_stock, normalize_category,
    normalize_name, total_value,
};
pub use views::{
    ExportRow, ModalView, SearchEntry, TableRow, to_export_rows, to_modal_view, to_search_index,
    to_table_view,
};
pub use wire::{from_wire, to_wire};
