/// CSV ingest.
///
/// Reads the input file into `RawRecord`s: headers are normalized first,
/// the required columns are resolved by canonical name (missing ones are
/// fatal), and then rows are extracted. Rows whose year cell does not
/// parse, or whose region cell is empty, are skipped with a warning;
/// a handful of bad rows must not abort a whole batch run.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::config::JobConfig;
use crate::ingest::columns::{find_column, normalize_headers};
use crate::logging::{self, Stage};
use crate::model::{PipelineError, RawRecord};

/// Parsed input plus the count of rows dropped during ingest.
#[derive(Debug)]
pub struct IngestOutcome {
    pub records: Vec<RawRecord>,
    pub skipped_rows: usize,
}

/// Read and parse the job's input file.
pub fn read_records(path: &Path, config: &JobConfig) -> Result<IngestOutcome, PipelineError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PipelineError::InputNotFound(path.display().to_string()));
        }
        Err(e) => return Err(PipelineError::Io(e.to_string())),
    };
    read_from(file, config)
}

/// Parse CSV text from any reader. Split out from `read_records` so unit
/// tests can feed in-memory input without touching the filesystem.
pub fn read_from<R: io::Read>(input: R, config: &JobConfig) -> Result<IngestOutcome, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = normalize_headers(reader.headers()?.iter());

    let station_idx = find_column(&headers, &config.station_column)?;
    let region_idx = find_column(&headers, &config.region_column)?;
    let year_idx = find_column(&headers, &config.year_column)?;
    let measurement_idxs: Vec<usize> = config
        .measurements
        .iter()
        .map(|name| find_column(&headers, name))
        .collect::<Result<_, _>>()?;

    let mut records = Vec::new();
    let mut skipped_rows = 0;

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Header row is line 1; enumerate starts at the first data row.
        let line = row + 2;

        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let region = cell(region_idx);
        if region.is_empty() {
            logging::warn(
                Stage::Ingest,
                Some(&format!("line {}", line)),
                "empty region cell, row skipped",
            );
            skipped_rows += 1;
            continue;
        }

        let year = match cell(year_idx).parse::<i32>() {
            Ok(y) => y,
            Err(_) => {
                logging::warn(
                    Stage::Ingest,
                    Some(&format!("line {}", line)),
                    &format!("unparseable year '{}', row skipped", cell(year_idx)),
                );
                skipped_rows += 1;
                continue;
            }
        };

        let values = measurement_idxs
            .iter()
            .map(|&idx| cell(idx).to_string())
            .collect();

        records.push(RawRecord {
            station: cell(station_idx).to_string(),
            region: region.to_string(),
            year,
            values,
        });
    }

    Ok(IngestOutcome {
        records,
        skipped_rows,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JobConfig {
        let mut config = JobConfig::default_job();
        config.measurements = vec!["rainfall_mm".to_string()];
        config
    }

    #[test]
    fn test_reads_rows_with_normalized_headers() {
        let csv = "\
Selected meteorological station, State ,Year,Total Rainfall in millimetres
Subang,Selangor,2020,2500.5
Melaka,Melaka,2020,1800
";
        let outcome = read_from(csv.as_bytes(), &test_config()).expect("should parse");
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped_rows, 0);
        assert_eq!(
            outcome.records[0],
            RawRecord {
                station: "Subang".to_string(),
                region: "Selangor".to_string(),
                year: 2020,
                values: vec!["2500.5".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_measurement_column_is_fatal() {
        let csv = "station,state,year\nSubang,Selangor,2020\n";
        let result = read_from(csv.as_bytes(), &test_config());
        assert_eq!(
            result.err(),
            Some(PipelineError::MissingColumn("rainfall_mm".to_string()))
        );
    }

    #[test]
    fn test_missing_key_column_is_fatal() {
        let csv = "station,year,rainfall_mm\nSubang,2020,100\n";
        let result = read_from(csv.as_bytes(), &test_config());
        assert!(matches!(result, Err(PipelineError::MissingColumn(c)) if c == "state"));
    }

    #[test]
    fn test_bad_year_rows_are_skipped_not_fatal() {
        let csv = "\
station,state,year,rainfall_mm
Subang,Selangor,2020,100
Subang,Selangor,not-a-year,200
Subang,Selangor,2021,300
";
        let outcome = read_from(csv.as_bytes(), &test_config()).expect("should parse");
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped_rows, 1);
        assert_eq!(outcome.records[1].year, 2021);
    }

    #[test]
    fn test_empty_region_rows_are_skipped() {
        let csv = "\
station,state,year,rainfall_mm
Subang,,2020,100
Melaka,Melaka,2020,200
";
        let outcome = read_from(csv.as_bytes(), &test_config()).expect("should parse");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.skipped_rows, 1);
        assert_eq!(outcome.records[0].region, "Melaka");
    }

    #[test]
    fn test_short_rows_yield_empty_measurement_cells() {
        // flexible() keeps rows with fewer fields; absent cells read as "".
        let csv = "\
station,state,year,rainfall_mm
Subang,Selangor,2020
";
        let outcome = read_from(csv.as_bytes(), &test_config()).expect("should parse");
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].values, vec!["".to_string()]);
    }

    #[test]
    fn test_malformed_measurement_cells_pass_through_raw() {
        // Coercion happens later; ingest must not judge measurement text.
        let csv = "\
station,state,year,rainfall_mm
KLIA,Negeri Sembilan,2020,205.0200.0
";
        let outcome = read_from(csv.as_bytes(), &test_config()).expect("should parse");
        assert_eq!(outcome.records[0].values[0], "205.0200.0");
    }

    #[test]
    fn test_input_not_found_maps_to_its_own_variant() {
        let result = read_records(Path::new("no/such/file.csv"), &test_config());
        assert!(matches!(result, Err(PipelineError::InputNotFound(_))));
    }
}
