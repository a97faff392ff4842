/// Pipeline driver.
///
/// Threads one record collection through the stages in fixed order:
///
///   Normalize → Reassign → Group → Coerce → Aggregate → Densify → Write
///
/// Each stage is a pure function from its own module; this module owns
/// only the sequencing, the logging, and the run report. A failure at
/// any stage aborts the run before the output file is touched (the
/// writer itself cleans up on a mid-write failure).

use crate::config::JobConfig;
use crate::export;
use crate::ingest::reader;
use crate::logging::{self, Stage};
use crate::model::{AggregatedRecord, PipelineError};
use crate::transform::{aggregate, coerce, densify, grouping, reassign};

/// Rows kept in the report for the console preview.
const SAMPLE_ROWS: usize = 8;

/// Counters and sample rows from one completed run.
#[derive(Debug)]
pub struct RunReport {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rule_hits: Vec<reassign::RuleHits>,
    pub group_count: usize,
    pub rows_written: usize,
    pub sample: Vec<AggregatedRecord>,
}

/// Execute one batch job.
pub fn run(config: &JobConfig) -> Result<RunReport, PipelineError> {
    config.validate()?;

    logging::info(
        Stage::Ingest,
        None,
        &format!("Reading {}", config.input_path.display()),
    );
    let ingested = reader::read_records(&config.input_path, config)?;
    let rows_read = ingested.records.len();
    let rows_skipped = ingested.skipped_rows;
    if rows_skipped > 0 {
        logging::warn(
            Stage::Ingest,
            None,
            &format!("{} rows skipped during ingest", rows_skipped),
        );
    }

    let mut records = ingested.records;

    let rule_hits = reassign::reassign(&mut records, &config.rules);
    for hit in &rule_hits {
        logging::info(
            Stage::Transform,
            Some(&hit.label),
            &format!("{} rows reassigned", hit.matched),
        );
    }

    if let Some(groups) = &config.groups {
        let unmatched = grouping::apply_grouping(&mut records, groups);
        if unmatched > 0 {
            logging::warn(
                Stage::Transform,
                None,
                &format!("{} rows fell into no region group", unmatched),
            );
        }
    }

    let coerced = coerce::coerce_records(records);
    let aggregated = aggregate::aggregate(&coerced, config.measurements.len());
    let group_count = aggregated.len();

    let output = match config.year_range {
        Some(range) => {
            let grid = densify::densify(aggregated, range, config.measurements.len());
            if grid.dropped_out_of_range > 0 {
                logging::warn(
                    Stage::Transform,
                    None,
                    &format!(
                        "{} aggregated rows outside {}–{} dropped from the grid",
                        grid.dropped_out_of_range, range.start, range.end
                    ),
                );
            }
            grid.records
        }
        None => aggregated,
    };

    let rows_written = export::write_output(
        &config.output_path,
        &config.region_column,
        &config.measurements,
        &output,
    )?;
    logging::info(
        Stage::Export,
        None,
        &format!("Wrote {}", config.output_path.display()),
    );
    logging::log_run_summary(rows_read, rows_skipped, rows_written);

    Ok(RunReport {
        rows_read,
        rows_skipped,
        rule_hits,
        group_count,
        rows_written,
        sample: output.into_iter().take(SAMPLE_ROWS).collect(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearRange;
    use crate::regions::default_reassignment_rules;
    use std::path::PathBuf;

    fn job_in(dir: &std::path::Path, input_csv: &str) -> JobConfig {
        let input_path = dir.join("input.csv");
        std::fs::write(&input_path, input_csv).expect("write input");
        JobConfig {
            input_path,
            output_path: dir.join("output.csv"),
            station_column: "station".to_string(),
            region_column: "state".to_string(),
            year_column: "year".to_string(),
            measurements: vec!["rainfall_mm".to_string()],
            rules: default_reassignment_rules(),
            groups: None,
            year_range: None,
            log_file: None,
        }
    }

    #[test]
    fn test_run_reassigns_and_averages() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = job_in(
            dir.path(),
            "\
station,state,year,rainfall_mm
Subang,Selangor,2020,100
Melaka,Melaka,2020,200
",
        );
        let report = run(&config).expect("run should succeed");

        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_written, 2);
        // Subang moved to Kuala Lumpur; Melaka moved to Negeri Sembilan.
        let regions: Vec<&str> = report.sample.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["Kuala Lumpur", "Negeri Sembilan"]);
    }

    #[test]
    fn test_run_densifies_when_range_is_set() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = job_in(
            dir.path(),
            "\
station,state,year,rainfall_mm
Ipoh,Perak,2000,100
Kuching,Sarawak,2002,300
",
        );
        config.rules = vec![];
        config.year_range = Some(YearRange {
            start: 2000,
            end: 2002,
        });
        let report = run(&config).expect("run should succeed");

        // 2 regions × 3 years.
        assert_eq!(report.rows_written, 6);
        assert_eq!(report.group_count, 2);
    }

    #[test]
    fn test_missing_input_aborts_without_output() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = job_in(dir.path(), "station,state,year,rainfall_mm\n");
        config.input_path = PathBuf::from(dir.path().join("absent.csv"));

        let result = run(&config);
        assert!(matches!(result, Err(PipelineError::InputNotFound(_))));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_invalid_config_fails_before_any_io() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = job_in(dir.path(), "station,state,year,rainfall_mm\n");
        config.measurements = vec![];

        assert!(matches!(
            run(&config),
            Err(PipelineError::InvalidConfig(_))
        ));
        assert!(!config.output_path.exists());
    }
}
