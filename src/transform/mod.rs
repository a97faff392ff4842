/// In-memory transform stages for the aggregation pipeline.
///
/// Each submodule is a pure function over record collections, applied in
/// this order by `pipeline::run`:
///
/// - `reassign` — move station rows under replacement region labels.
/// - `grouping` — optional state → coarse-region reclassification.
/// - `coerce` — raw measurement text → `Option<f64>`.
/// - `aggregate` — per-(region, year) means.
/// - `densify` — optional region × year grid completion.

pub mod aggregate;
pub mod coerce;
pub mod densify;
pub mod grouping;
pub mod reassign;
