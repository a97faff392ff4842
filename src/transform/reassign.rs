/// Station reassignment.
///
/// Some regions in the source data have no usable station series of their
/// own and are synthesized from neighboring stations (see
/// `regions::default_reassignment_rules`). Rules are applied in declaration
/// order and each record is reassigned at most once: the first matching
/// rule claims the row and overwrites its region.
///
/// Reassigned rows are MOVED, not copied: a row that also stayed under
/// its source region would count the same physical readings under two
/// labels. The tests below lock in the move semantics.

use crate::model::RawRecord;
use crate::regions::ReassignmentRule;

/// Match counts per rule, in rule order. Reported in the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHits {
    pub label: String,
    pub matched: usize,
}

/// Apply `rules` to every record, first match wins.
pub fn reassign(records: &mut [RawRecord], rules: &[ReassignmentRule]) -> Vec<RuleHits> {
    let mut hits: Vec<RuleHits> = rules
        .iter()
        .map(|r| RuleHits {
            label: r.label.clone(),
            matched: 0,
        })
        .collect();

    for record in records.iter_mut() {
        for (i, rule) in rules.iter().enumerate() {
            if rule.matcher.matches(&record.station) {
                record.region = rule.target_region.clone();
                hits[i].matched += 1;
                break;
            }
        }
    }

    hits
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{default_reassignment_rules, StationMatcher};

    fn record(station: &str, region: &str, year: i32) -> RawRecord {
        RawRecord {
            station: station.to_string(),
            region: region.to_string(),
            year,
            values: vec!["1.0".to_string()],
        }
    }

    #[test]
    fn test_matching_rows_take_the_target_region() {
        let mut records = vec![
            record("Subang", "Selangor", 2020),
            record("Kuching", "Sarawak", 2020),
        ];
        let hits = reassign(&mut records, &default_reassignment_rules());

        assert_eq!(records[0].region, "Kuala Lumpur");
        assert_eq!(records[1].region, "Sarawak");
        assert_eq!(hits[1].matched, 1);
    }

    #[test]
    fn test_reassignment_moves_rather_than_copies() {
        // The Subang row must leave Selangor entirely; keeping a copy
        // would double count the same physical readings.
        let mut records = vec![
            record("Subang", "Selangor", 2020),
            record("Petaling Jaya", "Selangor", 2020),
        ];
        reassign(&mut records, &default_reassignment_rules());

        assert_eq!(records.len(), 2);
        let selangor: Vec<_> = records.iter().filter(|r| r.region == "Selangor").collect();
        assert_eq!(selangor.len(), 1);
        assert_eq!(selangor[0].station, "Petaling Jaya");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Both rules match this station name; only the first may claim it.
        let rules = vec![
            crate::regions::ReassignmentRule {
                label: "first".to_string(),
                matcher: StationMatcher::Contains("Subang".to_string()),
                target_region: "Kuala Lumpur".to_string(),
            },
            crate::regions::ReassignmentRule {
                label: "second".to_string(),
                matcher: StationMatcher::Contains("Subang".to_string()),
                target_region: "Putrajaya".to_string(),
            },
        ];
        let mut records = vec![record("Subang", "Selangor", 2020)];
        let hits = reassign(&mut records, &rules);

        assert_eq!(records[0].region, "Kuala Lumpur");
        assert_eq!(hits[0].matched, 1);
        assert_eq!(hits[1].matched, 0);
    }

    #[test]
    fn test_klia_and_melaka_feed_negeri_sembilan() {
        let mut records = vec![
            record(
                "Kuala Lumpur International Airport (KLIA), Sepang",
                "Selangor",
                2019,
            ),
            record("Melaka", "Melaka", 2019),
        ];
        let hits = reassign(&mut records, &default_reassignment_rules());

        assert!(records.iter().all(|r| r.region == "Negeri Sembilan"));
        assert_eq!(hits[0].matched, 2);
    }

    #[test]
    fn test_no_rules_leaves_records_untouched() {
        let mut records = vec![record("Subang", "Selangor", 2020)];
        let before = records.clone();
        let hits = reassign(&mut records, &[]);
        assert_eq!(records, before);
        assert!(hits.is_empty());
    }
}
