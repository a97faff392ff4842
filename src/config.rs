/// Job configuration for the aggregation pipeline.
///
/// Everything an invocation needs (paths, column names, rules, year range)
/// lives in one `JobConfig` passed into `pipeline::run`; nothing is read
/// from globals. The built-in default job covers the Malaysian rainfall
/// cleanup; a `climagg.toml` next to the invocation replaces it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::PipelineError;
use crate::regions::{default_reassignment_rules, ReassignmentRule, RegionGroup};

/// Name of the optional job file looked up in the working directory.
pub const JOB_FILE_NAME: &str = "climagg.toml";

// ---------------------------------------------------------------------------
// Year range
// ---------------------------------------------------------------------------

/// Inclusive year range used by the grid densifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn years(self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

// ---------------------------------------------------------------------------
// Job configuration
// ---------------------------------------------------------------------------

/// One batch invocation: where to read, what to rename, how to reassign,
/// what to average, and where to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    /// Canonical (post-normalization) names of the key columns.
    #[serde(default = "default_station_column")]
    pub station_column: String,
    #[serde(default = "default_region_column")]
    pub region_column: String,
    #[serde(default = "default_year_column")]
    pub year_column: String,

    /// Canonical names of the measurement columns to coerce and average,
    /// in output order.
    pub measurements: Vec<String>,

    /// Station reassignment rules, applied in order (first match wins).
    #[serde(default)]
    pub rules: Vec<ReassignmentRule>,

    /// Optional coarse region grouping applied after reassignment.
    #[serde(default)]
    pub groups: Option<Vec<RegionGroup>>,

    /// When set, the aggregated output is densified over this range so
    /// every region has exactly one row per year.
    #[serde(default)]
    pub year_range: Option<YearRange>,

    /// Optional append-only log file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_station_column() -> String {
    "station".to_string()
}

fn default_region_column() -> String {
    "state".to_string()
}

fn default_year_column() -> String {
    "year".to_string()
}

impl JobConfig {
    /// The built-in job: clean the 2000–2021 Malaysian climate export,
    /// synthesize the Negeri Sembilan and Kuala Lumpur series, and write
    /// the densified per-state averages.
    pub fn default_job() -> Self {
        JobConfig {
            input_path: PathBuf::from("data/2000-2021-climate-malaysia.csv"),
            output_path: PathBuf::from("processed_rainfall_data.csv"),
            station_column: default_station_column(),
            region_column: default_region_column(),
            year_column: default_year_column(),
            measurements: vec!["rainfall_days".to_string(), "rainfall_mm".to_string()],
            rules: default_reassignment_rules(),
            groups: None,
            year_range: Some(YearRange {
                start: 2000,
                end: 2021,
            }),
            log_file: None,
        }
    }

    /// Load a job from a TOML file. The file must describe a complete,
    /// valid job; there is no merging of partial files.
    pub fn from_toml_path(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PipelineError> {
        let config: JobConfig =
            toml::from_str(text).map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would make the pipeline fail later in
    /// a less obvious way. Runs before any file I/O.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.measurements.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one measurement column is required".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &self.measurements {
            if name.trim().is_empty() {
                return Err(PipelineError::InvalidConfig(
                    "measurement column names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(PipelineError::InvalidConfig(format!(
                    "duplicate measurement column '{}'",
                    name
                )));
            }
        }
        if let Some(range) = &self.year_range {
            if range.start > range.end {
                return Err(PipelineError::InvalidConfig(format!(
                    "year range start {} is after end {}",
                    range.start, range.end
                )));
            }
        }
        for rule in &self.rules {
            if rule.target_region.trim().is_empty() {
                return Err(PipelineError::InvalidConfig(format!(
                    "rule '{}' has an empty target region",
                    rule.label
                )));
            }
        }
        if let Some(groups) = &self.groups {
            for group in groups {
                if group.name.trim().is_empty() {
                    return Err(PipelineError::InvalidConfig(
                        "region group names must be non-empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
