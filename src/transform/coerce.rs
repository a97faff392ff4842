/// Numeric coercion.
///
/// The export this pipeline cleans contains empty cells, "N/A"
/// placeholders, and concatenation artifacts such as "205.0200.0" (two
/// readings glued together). One function defines the policy for all of
/// them: parse or go missing, never error. Coercion runs after
/// reassignment and grouping, before aggregation.

use crate::model::{RawRecord, Record};

/// Parse one measurement cell. Empty, malformed, and non-finite cells
/// all coerce to `None`.
pub fn parse_measurement(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce every measurement cell of every record.
pub fn coerce_records(records: Vec<RawRecord>) -> Vec<Record> {
    records
        .into_iter()
        .map(|r| Record {
            station: r.station,
            region: r.region,
            year: r.year,
            values: r.values.iter().map(|v| parse_measurement(v)).collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
