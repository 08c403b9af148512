//! Approach feed transformer: raw CNEOS rows -> ordered display records.
//!
//! Pure and deterministic. Steps, per row:
//! 1. Select `des`, `cd`, `dist`, `h` by name
//! 2. Parse `dist` and `h` as numbers (no zero-coercion, no dropped rows)
//! 3. Derive diameter from H
//! 4. Derive whole-kilometer distance
//! 5. Derive lunar distance (0.1 LD)
//! 6. Parse and reformat the approach date
//!
//! and finally sort the whole table by the parsed date.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::conversions::{au_to_km, au_to_lunar_distance, estimated_diameter_m};
use super::error::TransformError;
use crate::types::{ApproachTable, CloseApproachDisplayRecord, RawApproachPayload};

/// Canonical display format for approach dates.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted `cd` formats; CNEOS sends the first, the rest are ISO-style fallbacks.
const APPROACH_DATE_FORMATS: &[&str] = &[
    "%Y-%b-%d %H:%M",
    "%Y-%b-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const FIELD_DESIGNATION: &str = "des";
const FIELD_DATE: &str = "cd";
const FIELD_DISTANCE: &str = "dist";
const FIELD_MAGNITUDE: &str = "h";

/// Positions of the four required columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    designation: usize,
    date: usize,
    distance: usize,
    magnitude: usize,
}

impl ColumnIndex {
    fn locate(payload: &RawApproachPayload) -> Result<Self, TransformError> {
        let find = |name: &str| {
            payload.field_index(name).ok_or_else(|| {
                TransformError::SchemaMismatch(format!("required field '{name}' is missing"))
            })
        };
        Ok(Self {
            designation: find(FIELD_DESIGNATION)?,
            date: find(FIELD_DATE)?,
            distance: find(FIELD_DISTANCE)?,
            magnitude: find(FIELD_MAGNITUDE)?,
        })
    }

    fn width(&self) -> usize {
        self.designation
            .max(self.date)
            .max(self.distance)
            .max(self.magnitude)
            + 1
    }
}

/// Transform a raw payload into an ordered approach table.
///
/// A payload with no fields and no rows (a zero-count response) yields an
/// empty table. Any bad row fails the whole transform.
pub fn transform(payload: &RawApproachPayload) -> Result<ApproachTable, TransformError> {
    if payload.fields.is_empty() && payload.rows.is_empty() {
        return Ok(ApproachTable::empty());
    }

    let columns = ColumnIndex::locate(payload)?;
    let records = payload
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| build_record(columns, row, cells))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApproachTable::new(records))
}

fn build_record(
    columns: ColumnIndex,
    row: usize,
    cells: &[Value],
) -> Result<CloseApproachDisplayRecord, TransformError> {
    if cells.len() < columns.width() {
        return Err(TransformError::SchemaMismatch(format!(
            "row {row} has {} cells, expected at least {}",
            cells.len(),
            columns.width()
        )));
    }

    let designation = match &cells[columns.designation] {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        other => {
            return Err(TransformError::SchemaMismatch(format!(
                "row {row}: designation is {other}"
            )))
        }
    };

    let distance_au = parse_numeric(&cells[columns.distance], FIELD_DISTANCE, row)?;
    let h = parse_numeric(&cells[columns.magnitude], FIELD_MAGNITUDE, row)?;
    let datetime = parse_approach_date(&cells[columns.date], row)?;

    Ok(CloseApproachDisplayRecord {
        designation,
        approach_date: datetime.format(DISPLAY_DATE_FORMAT).to_string(),
        distance_km: au_to_km(distance_au),
        lunar_distance: au_to_lunar_distance(distance_au),
        size_m: estimated_diameter_m(h),
        datetime,
    })
}

/// Parse a numeric cell; CNEOS encodes numbers as strings.
fn parse_numeric(cell: &Value, field: &'static str, row: usize) -> Result<f64, TransformError> {
    let parsed = match cell {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| TransformError::InvalidNumericField {
            field,
            row,
            value: cell.to_string(),
        })
}

fn parse_approach_date(cell: &Value, row: usize) -> Result<NaiveDateTime, TransformError> {
    let err = || TransformError::DateParseError {
        row,
        value: match cell {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    };

    let Value::String(raw) = cell else {
        return Err(err());
    };
    parse_date_str(raw.trim()).ok_or_else(err)
}

/// Parse an approach date in any accepted format. Date-only input means midnight.
pub fn parse_date_str(raw: &str) -> Option<NaiveDateTime> {
    APPROACH_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
