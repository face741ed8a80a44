//! CSV import and export of inventory records.
//!
//! Fields are read and written with standard CSV quoting: a quoted field
//! may contain commas, and embedded quotes are doubled on output.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use facility_model::CanonicalInventoryRecord;

use crate::convert::{parse_cost, parse_count, parse_flag};
use crate::error::Result;

/// Column titles written by [`to_csv`].
pub const EXPORT_HEADERS: [&str; 5] = ["Name", "Quantity", "Category", "Status", "Expiry Date"];

/// Quantity used when a row has none or an unreadable one.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Values stamped onto every imported record.
#[derive(Debug, Clone, Default)]
pub struct CsvImportOptions {
    pub facility_id: Option<String>,
    /// Used for `createdAt`/`updatedAt`; left empty when `None`.
    pub imported_at: Option<DateTime<Utc>>,
}

/// Canonical field a CSV column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsvField {
    Name,
    Quantity,
    Category,
    Location,
    Status,
    UnitCost,
    ReorderPoint,
    Expiration,
    Barcode,
    SerialNumber,
    Manufacturer,
    Model,
    Supplier,
    Warranty,
    Sku,
    Notes,
    Tags,
    Tracked,
    Favorite,
}

/// Lowercase with whitespace, underscores and hyphens removed.
fn header_key(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .chars()
        .filter(|ch| !(ch.is_whitespace() || *ch == '_' || *ch == '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn field_for_header(raw: &str) -> Option<CsvField> {
    let field = match header_key(raw).as_str() {
        "name" | "itemname" | "item" => CsvField::Name,
        "quantity" | "qty" | "count" => CsvField::Quantity,
        "category" | "type" => CsvField::Category,
        "location" => CsvField::Location,
        "status" => CsvField::Status,
        "unitcost" | "cost" | "price" | "unitprice" => CsvField::UnitCost,
        "reorderpoint" | "reorderlevel" => CsvField::ReorderPoint,
        "expirydate" | "expirationdate" | "expiration" | "expiry" | "expires" => {
            CsvField::Expiration
        }
        "barcode" => CsvField::Barcode,
        "serialnumber" | "serial" => CsvField::SerialNumber,
        "manufacturer" => CsvField::Manufacturer,
        "model" => CsvField::Model,
        "supplier" | "vendor" => CsvField::Supplier,
        "warranty" => CsvField::Warranty,
        "sku" => CsvField::Sku,
        "notes" => CsvField::Notes,
        "tags" => CsvField::Tags,
        "tracked" => CsvField::Tracked,
        "favorite" | "favourite" => CsvField::Favorite,
        _ => return None,
    };
    Some(field)
}

/// Parse CSV text into canonical records.
///
/// Fewer than two non-blank lines (a header plus one row) yields an empty
/// list. Unspecified fields keep their defaults; quantity defaults to 1.
pub fn from_csv(text: &str) -> Vec<CanonicalInventoryRecord> {
    from_csv_with(text, &CsvImportOptions::default())
}

pub fn from_csv_with(text: &str, options: &CsvImportOptions) -> Vec<CanonicalInventoryRecord> {
    let content_lines = text.lines().filter(|line| !line.trim().is_empty()).count();
    if content_lines < 2 {
        debug!(lines = content_lines, "csv too short to hold records");
        return Vec::new();
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(error) => {
            warn!(%error, "unreadable csv header");
            return Vec::new();
        }
    };
    let columns: Vec<Option<CsvField>> = headers.iter().map(field_for_header).collect();
    let stamp = options
        .imported_at
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(error) => {
                warn!(row = index + 1, %error, "skipping unreadable csv row");
                continue;
            }
        };
        if row.iter().all(str::is_empty) {
            continue;
        }
        let mut record = record_from_row(&headers, &columns, &row);
        record.facility_id = options.facility_id.clone().unwrap_or_default();
        record.created_at.clone_from(&stamp);
        record.updated_at.clone_from(&stamp);
        records.push(record);
    }
    debug!(count = records.len(), "parsed csv records");
    records
}

fn record_from_row(
    headers: &StringRecord,
    columns: &[Option<CsvField>],
    row: &StringRecord,
) -> CanonicalInventoryRecord {
    let mut record = CanonicalInventoryRecord {
        id: Uuid::new_v4().to_string(),
        quantity: DEFAULT_QUANTITY,
        ..Default::default()
    };
    for (index, value) in row.iter().enumerate() {
        let value = strip_quotes(value);
        match columns.get(index).copied().flatten() {
            Some(field) => apply_field(&mut record, field, value),
            None => {
                let Some(header) = headers.get(index).filter(|h| !h.is_empty()) else {
                    continue;
                };
                if !value.is_empty()
                    && !record
                        .data
                        .insert_extra(header, Value::String(value.to_string()))
                {
                    debug!(header, "ignoring column that shadows an extension field");
                }
            }
        }
    }
    record
}

/// Drop one level of stray wrapping quotes left by hand-edited files.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn apply_field(record: &mut CanonicalInventoryRecord, field: CsvField, value: &str) {
    let data = &mut record.data;
    match field {
        CsvField::Name => record.name = value.to_string(),
        CsvField::Quantity => record.quantity = parse_count(value).unwrap_or(DEFAULT_QUANTITY),
        CsvField::Category => record.category = value.to_string(),
        CsvField::Location => record.location = value.to_string(),
        CsvField::Status => record.status = value.to_string(),
        CsvField::UnitCost => record.unit_cost = parse_cost(value).unwrap_or(0.0),
        CsvField::ReorderPoint => record.reorder_point = parse_count(value).unwrap_or(0),
        CsvField::Expiration => {
            data.expiration = value.to_string();
            record.expiration_date = value.to_string();
        }
        CsvField::Barcode => data.barcode = value.to_string(),
        CsvField::SerialNumber => data.serial_number = value.to_string(),
        CsvField::Manufacturer => data.manufacturer = value.to_string(),
        CsvField::Model => data.model = value.to_string(),
        CsvField::Supplier => data.supplier = value.to_string(),
        CsvField::Warranty => data.warranty = value.to_string(),
        CsvField::Sku => data.sku = value.to_string(),
        CsvField::Notes => data.notes = value.to_string(),
        CsvField::Tags => {
            data.tags = value
                .split([';', ',', '|'])
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
        }
        CsvField::Tracked => data.tracked = parse_flag(value),
        CsvField::Favorite => data.favorite = parse_flag(value),
    }
}

/// Write records as CSV: the five export columns, every field quoted.
pub fn write_csv<W: Write>(records: &[CanonicalInventoryRecord], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        let quantity = record.quantity.to_string();
        writer.write_record([
            record.name.as_str(),
            quantity.as_str(),
            record.category.as_str(),
            record.status.as_str(),
            record.expiry(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Render records as CSV text; see [`write_csv`].
pub fn to_csv(records: &[CanonicalInventoryRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
