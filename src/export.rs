/// CSV export.
///
/// Serializes the final record sequence with a fixed column order: the
/// region column, `year`, then the configured measurement columns.
/// Missing means are written as empty cells. The output path is
/// overwritten unconditionally; if writing fails partway the partial
/// file is removed, so a run either produces a complete file or none.

use std::path::Path;

use crate::model::{AggregatedRecord, PipelineError};

/// Write `records` to `path`. Returns the number of data rows written.
pub fn write_output(
    path: &Path,
    region_column: &str,
    measurements: &[String],
    records: &[AggregatedRecord],
) -> Result<usize, PipelineError> {
    match try_write(path, region_column, measurements, records) {
        Ok(rows) => Ok(rows),
        Err(e) => {
            let _ = std::fs::remove_file(path);
            Err(e)
        }
    }
}

fn try_write(
    path: &Path,
    region_column: &str,
    measurements: &[String],
    records: &[AggregatedRecord],
) -> Result<usize, PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = vec![region_column, "year"];
    header.extend(measurements.iter().map(|m| m.as_str()));
    writer.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = vec![record.region.clone(), record.year.to_string()];
        row.extend(
            record
                .means
                .iter()
                .map(|m| m.map_or(String::new(), |v| v.to_string())),
        );
        writer.write_record(&row)?;
    }

    writer.flush().map_err(|e| PipelineError::Io(e.to_string()))?;
    Ok(records.len())
}

// ---------------------------------------------------------------------------
// Console preview
// ---------------------------------------------------------------------------

/// Render the first `limit` rows as console lines, header included.
pub fn preview_lines(
    region_column: &str,
    measurements: &[String],
    records: &[AggregatedRecord],
    limit: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    let header: Vec<&str> = std::iter::once(region_column)
        .chain(std::iter::once("year"))
        .chain(measurements.iter().map(|m| m.as_str()))
        .collect();
    lines.push(header.join("  "));

    for record in records.iter().take(limit) {
        let mut cells = vec![record.region.clone(), record.year.to_string()];
        cells.extend(
            record
                .means
                .iter()
                .map(|m| m.map_or("·".to_string(), |v| format!("{:.1}", v))),
        );
        lines.push(cells.join("  "));
    }

    if records.len() > limit {
        lines.push(format!("… and {} more rows", records.len() - limit));
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<AggregatedRecord> {
        vec![
            AggregatedRecord {
                region: "Kuala Lumpur".to_string(),
                year: 2020,
                means: vec![Some(100.0), None],
            },
            AggregatedRecord {
                region: "Melaka".to_string(),
                year: 2020,
                means: vec![Some(200.5), Some(12.0)],
            },
        ]
    }

    fn measurements() -> Vec<String> {
        vec!["rainfall_mm".to_string(), "rainfall_days".to_string()]
    }

    #[test]
    fn test_written_file_has_fixed_column_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");

        let rows =
            write_output(&path, "state", &measurements(), &sample_records()).expect("write");
        assert_eq!(rows, 2);

        let text = std::fs::read_to_string(&path).expect("read back");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("state,year,rainfall_mm,rainfall_days"));
        assert_eq!(lines.next(), Some("Kuala Lumpur,2020,100,"));
        assert_eq!(lines.next(), Some("Melaka,2020,200.5,12"));
    }

    #[test]
    fn test_missing_means_serialize_as_empty_cells() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");
        let records = vec![AggregatedRecord {
            region: "Negeri Sembilan".to_string(),
            year: 2001,
            means: vec![None, None],
        }];

        write_output(&path, "state", &measurements(), &records).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.lines().any(|l| l == "Negeri Sembilan,2001,,"));
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents\nfrom a previous run\n").expect("seed file");

        write_output(&path, "state", &measurements(), &sample_records()).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(!text.contains("stale contents"));
        assert!(text.starts_with("state,year"));
    }

    #[test]
    fn test_preview_caps_rows_and_marks_missing() {
        let lines = preview_lines("state", &measurements(), &sample_records(), 1);
        assert_eq!(lines.len(), 3); // header + 1 row + "more" marker
        assert!(lines[1].contains("Kuala Lumpur"));
        assert!(lines[1].contains("·"));
        assert!(lines[2].contains("1 more"));
    }
}
