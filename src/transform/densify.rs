/// Grid densification.
///
/// Downstream plotting expects every region to have exactly one row per
/// year, with gaps explicit rather than absent. This stage builds the
/// cross-product of the distinct regions present with an inclusive year
/// range and left-joins the aggregates onto it. Aggregates whose year
/// falls outside the range drop out of the grid; the caller is told how
/// many so it can warn instead of losing them silently.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::config::YearRange;
use crate::model::AggregatedRecord;

/// The completed grid plus the count of aggregates dropped for being
/// outside `range`.
#[derive(Debug)]
pub struct DenseGrid {
    pub records: Vec<AggregatedRecord>,
    pub dropped_out_of_range: usize,
}

/// Expand `aggregates` to a full region × year grid. `columns` is the
/// measurement column count, used to shape the all-missing filler rows.
pub fn densify(aggregates: Vec<AggregatedRecord>, range: YearRange, columns: usize) -> DenseGrid {
    let regions: BTreeSet<String> = aggregates.iter().map(|a| a.region.clone()).collect();

    let mut by_key: BTreeMap<(String, i32), AggregatedRecord> = BTreeMap::new();
    let mut dropped_out_of_range = 0;
    for aggregate in aggregates {
        if range.contains(aggregate.year) {
            by_key.insert((aggregate.region.clone(), aggregate.year), aggregate);
        } else {
            dropped_out_of_range += 1;
        }
    }

    let mut records = Vec::with_capacity(regions.len() * (range.end - range.start + 1) as usize);
    for region in &regions {
        for year in range.years() {
            let record = by_key
                .remove(&(region.clone(), year))
                .unwrap_or_else(|| AggregatedRecord {
                    region: region.clone(),
                    year,
                    means: vec![None; columns],
                });
            records.push(record);
        }
    }

    DenseGrid {
        records,
        dropped_out_of_range,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
