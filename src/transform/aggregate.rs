/// Per-(region, year) aggregation.
///
/// Groups coerced records by (region, year) and computes the arithmetic
/// mean of each measurement column over its non-missing values. A group
/// whose values are all missing yields a missing mean (not zero), and
/// the group row is not dropped. Output is sorted by region then year
/// and does not depend on input row order.

use std::collections::BTreeMap;

use crate::model::{AggregatedRecord, Record};

/// Running (sum, count) per measurement column for one group.
struct GroupAccumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl GroupAccumulator {
    fn new(columns: usize) -> Self {
        GroupAccumulator {
            sums: vec![0.0; columns],
            counts: vec![0; columns],
        }
    }

    fn add(&mut self, values: &[Option<f64>]) {
        for (i, value) in values.iter().enumerate() {
            if let Some(v) = value {
                self.sums[i] += v;
                self.counts[i] += 1;
            }
        }
    }

    fn means(&self) -> Vec<Option<f64>> {
        self.sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, &n)| if n == 0 { None } else { Some(sum / n as f64) })
            .collect()
    }
}

/// Average `records` per (region, year). `columns` is the measurement
/// column count; it decides the output width even when `records` is
/// empty.
pub fn aggregate(records: &[Record], columns: usize) -> Vec<AggregatedRecord> {
    // BTreeMap keys give the region-then-year output order directly.
    let mut groups: BTreeMap<(String, i32), GroupAccumulator> = BTreeMap::new();

    for record in records {
        groups
            .entry((record.region.clone(), record.year))
            .or_insert_with(|| GroupAccumulator::new(columns))
            .add(&record.values);
    }

    groups
        .into_iter()
        .map(|((region, year), acc)| AggregatedRecord {
            region,
            year,
            means: acc.means(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
