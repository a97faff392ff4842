/// Coarse region grouping.
///
/// Optional stage: replaces each record's state label with the name of
/// the region group containing it (West/East Malaysia in the default
/// grouping). States claimed by no group are labeled `UNKNOWN_GROUP`
/// rather than dropped, so misspelled or unexpected states stay visible
/// in the output.

use crate::model::RawRecord;
use crate::regions::{group_for, RegionGroup, UNKNOWN_GROUP};

/// Rewrite every record's region to its group name. Returns the number
/// of records that fell into no group.
pub fn apply_grouping(records: &mut [RawRecord], groups: &[RegionGroup]) -> usize {
    let mut unmatched = 0;
    for record in records.iter_mut() {
        match group_for(groups, &record.region) {
            Some(name) => record.region = name.to_string(),
            None => {
                record.region = UNKNOWN_GROUP.to_string();
                unmatched += 1;
            }
        }
    }
    unmatched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
