/// Domain types shared across the aggregation pipeline.
///
/// Record shapes and the run-aborting error taxonomy live here; the module
/// itself has no logic and no I/O.
///
/// Measurement columns are configured per job as an ordered list of canonical
/// names (`config::JobConfig::measurements`); the record types below carry
/// their values in a `Vec` parallel to that list, so index `i` in any record
/// is always the measurement named at index `i` of the job's column list.

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single input row after header normalization, before numeric coercion.
///
/// `values` holds the raw cell text of each configured measurement column,
/// in job column order. Region is the state label as read from the file
/// (possibly rewritten later by reassignment or grouping).
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub station: String,
    pub region: String,
    pub year: i32,
    pub values: Vec<String>,
}

/// A record with coerced measurements. `None` means the cell was empty,
/// malformed, or a non-finite spelling; a bad cell is never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub station: String,
    pub region: String,
    pub year: i32,
    pub values: Vec<Option<f64>>,
}

/// One output row: the per-measurement means of every record sharing
/// (region, year). A mean is `None` only when every contributing value
/// was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub region: String,
    pub year: i32,
    pub means: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort a pipeline run.
///
/// Unparseable measurement cells are deliberately NOT represented here:
/// they coerce to missing (`transform::coerce`) and the run continues.
#[derive(Debug, PartialEq)]
pub enum PipelineError {
    /// The input file path does not resolve.
    InputNotFound(String),
    /// A required column is absent after header normalization.
    MissingColumn(String),
    /// The job configuration failed validation or could not be parsed.
    InvalidConfig(String),
    /// The CSV layer reported a malformed file.
    Csv(String),
    /// Any other I/O failure.
    Io(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::InputNotFound(path) => {
                write!(f, "Input file not found: {}", path)
            }
            PipelineError::MissingColumn(name) => {
                write!(f, "Required column missing from input: {}", name)
            }
            PipelineError::InvalidConfig(msg) => write!(f, "Invalid job config: {}", msg),
            PipelineError::Csv(msg) => write!(f, "CSV error: {}", msg),
            PipelineError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err.to_string())
    }
}
