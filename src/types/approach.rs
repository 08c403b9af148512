//! Close-approach types: raw CNEOS payload, display records, chart series

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column headers shown for an approach table, in display order.
///
/// The trailing `datetime` column carries the parseable timestamp used by
/// the chart; tables drop it before rendering.
pub const DISPLAY_COLUMNS: [&str; 6] = [
    "Object",
    "Close-Approach Date",
    "Distance (km)",
    "Lunar Dist.",
    "Size (m)",
    "datetime",
];

// ============================================================================
// Raw Payload
// ============================================================================

/// Tabular close-approach payload as returned by the CNEOS `cad.api`.
///
/// `fields` names the columns; each row in `rows` holds one cell per field.
/// Column order is whatever the API sent, so consumers must look fields up
/// by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawApproachPayload {
    pub fields: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl RawApproachPayload {
    /// A payload for a zero-count response.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of a named column, if present.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }
}

// ============================================================================
// Display Records
// ============================================================================

/// One close approach, with derived physical quantities ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproachDisplayRecord {
    /// Object designation (e.g. "2024 AB1")
    pub designation: String,
    /// Approach time formatted as `YYYY-MM-DD HH:MM`
    pub approach_date: String,
    /// Nominal distance in kilometers, rounded to whole km
    pub distance_km: f64,
    /// Nominal distance in lunar distances, rounded to 0.1 LD
    pub lunar_distance: f64,
    /// Estimated diameter in meters (from absolute magnitude)
    pub size_m: f64,
    /// Parsed approach time, used for ordering and charting
    pub datetime: NaiveDateTime,
}

/// A single point of the lunar-distance time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub datetime: NaiveDateTime,
    pub lunar_distance: f64,
}

/// Ordered close-approach records with a fixed column schema.
///
/// Records are always sorted ascending by their parsed `datetime`; the
/// constructor enforces it so no table can exist out of order. The sort is
/// stable, so equal timestamps keep their upstream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachTable {
    columns: [&'static str; 6],
    records: Vec<CloseApproachDisplayRecord>,
}

impl ApproachTable {
    pub fn new(mut records: Vec<CloseApproachDisplayRecord>) -> Self {
        records.sort_by(|a, b| a.datetime.cmp(&b.datetime));
        Self {
            columns: DISPLAY_COLUMNS,
            records,
        }
    }

    /// An explicitly empty table with the same schema as a populated one.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn records(&self) -> &[CloseApproachDisplayRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Lunar distance over time, in table order.
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.records
            .iter()
            .map(|r| ChartPoint {
                datetime: r.datetime,
                lunar_distance: r.lunar_distance,
            })
            .collect()
    }
}

impl Default for ApproachTable {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(des: &str, day: u32, hour: u32) -> CloseApproachDisplayRecord {
        let datetime = NaiveDate::from_ymd_opt(2025, 3, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap();
        CloseApproachDisplayRecord {
            designation: des.to_string(),
            approach_date: datetime.format("%Y-%m-%d %H:%M").to_string(),
            distance_km: 1.0,
            lunar_distance: 0.1,
            size_m: 10.0,
            datetime,
        }
    }

    #[test]
    fn test_new_sorts_by_datetime() {
        let table = ApproachTable::new(vec![
            record("C", 20, 0),
            record("A", 2, 5),
            record("B", 10, 23),
        ]);
        let order: Vec<_> = table.records().iter().map(|r| r.designation.as_str()).collect();
        assert_eq!(order, ["A", "B", "C"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_times() {
        let table = ApproachTable::new(vec![record("first", 4, 1), record("second", 4, 1)]);
        assert_eq!(table.records()[0].designation, "first");
        assert_eq!(table.records()[1].designation, "second");
    }

    #[test]
    fn test_empty_table_keeps_schema() {
        let table = ApproachTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.columns(), &DISPLAY_COLUMNS);
    }

    #[test]
    fn test_chart_series_follows_table_order() {
        let table = ApproachTable::new(vec![record("late", 9, 0), record("early", 1, 0)]);
        let series = table.chart_series();
        assert_eq!(series.len(), 2);
        assert!(series[0].datetime < series[1].datetime);
    }

    #[test]
    fn test_payload_field_lookup() {
        let payload = RawApproachPayload {
            fields: vec!["cd".into(), "des".into()],
            rows: vec![],
        };
        assert_eq!(payload.field_index("des"), Some(1));
        assert_eq!(payload.field_index("h"), None);
        assert!(payload.is_empty());
    }
}
