/// Header normalization.
///
/// Raw exports of the climate dataset carry long, inconsistently spaced
/// column titles ("Selected meteorological station", " Total Rainfall in
/// millimetres "). Every header is trimmed and mapped through a fixed
/// rename table before any other stage runs, so downstream code addresses
/// fields by canonical name only. Unknown headers pass through trimmed but
/// otherwise unchanged.

use crate::model::PipelineError;

// ---------------------------------------------------------------------------
// Rename table
// ---------------------------------------------------------------------------

/// Lookup keys are lowercased with inner whitespace collapsed, so the table
/// tolerates mixed case and sloppy spacing in the export.
static RENAME_TABLE: &[(&str, &str)] = &[
    ("selected meteorological station", "station"),
    ("state", "state"),
    ("year", "year"),
    ("number of days of rainfall", "rainfall_days"),
    ("total rainfall in millimetres", "rainfall_mm"),
    ("mean temperature", "mean_temp_c"),
    ("mean temperature in degree celsius", "mean_temp_c"),
    ("mean relative humidity", "humidity_pct"),
    ("mean relative humidity in percentage", "humidity_pct"),
];

fn lookup_key(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Trim `raw` and map it through the rename table. Headers with no table
/// entry pass through trimmed. Idempotent: canonical names map to
/// themselves.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim();
    let key = lookup_key(trimmed);
    for (from, to) in RENAME_TABLE {
        if *from == key {
            return (*to).to_string();
        }
    }
    trimmed.to_string()
}

/// Normalize every header of a parsed header row.
pub fn normalize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter().map(normalize_header).collect()
}

/// Index of `canonical` in the normalized header row, or `MissingColumn`.
pub fn find_column(headers: &[String], canonical: &str) -> Result<usize, PipelineError> {
    headers
        .iter()
        .position(|h| h == canonical)
        .ok_or_else(|| PipelineError::MissingColumn(canonical.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
