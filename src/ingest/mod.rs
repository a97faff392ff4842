/// File ingest for the aggregation pipeline.
///
/// Submodules:
/// - `columns` — header normalization (trim + fixed rename table).
/// - `reader` — CSV parsing into `RawRecord`s with required-column checks.

pub mod columns;
pub mod reader;
