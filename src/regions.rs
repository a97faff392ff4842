/// Region registry for the climate aggregation job.
///
/// Defines the canonical Malaysian state lists, the default station
/// reassignment rules, and the default east/west region grouping.
/// This is the single source of truth for region membership — other
/// modules should reference regions from here rather than hardcoding
/// state names.

use serde::{Deserialize, Serialize};

/// Group name assigned to records whose state belongs to no configured
/// region group.
pub const UNKNOWN_GROUP: &str = "Unknown";

// ---------------------------------------------------------------------------
// Canonical state lists
// ---------------------------------------------------------------------------

/// States of Peninsular (West) Malaysia.
pub static PENINSULAR_STATES: &[&str] = &[
    "Johor",
    "Kedah",
    "Kelantan",
    "Melaka",
    "Negeri Sembilan",
    "Pahang",
    "Perak",
    "Perlis",
    "Pulau Pinang",
    "Selangor",
    "Terengganu",
];

/// States and territories of East Malaysia (Borneo).
pub static EAST_MALAYSIA_STATES: &[&str] = &[
    "Sabah",
    "Sarawak",
    "Wilayah Persekutuan Labuan",
];

/// Whether `state` appears in either canonical list.
pub fn is_known_state(state: &str) -> bool {
    PENINSULAR_STATES.contains(&state) || EAST_MALAYSIA_STATES.contains(&state)
}

// ---------------------------------------------------------------------------
// Station reassignment rules
// ---------------------------------------------------------------------------

/// Predicate over a station name, used to select the rows a
/// `ReassignmentRule` applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationMatcher {
    /// Exact membership in a list of station names.
    OneOf(Vec<String>),
    /// Case-sensitive substring of the station name.
    Contains(String),
}

impl StationMatcher {
    pub fn matches(&self, station: &str) -> bool {
        match self {
            StationMatcher::OneOf(names) => names.iter().any(|n| n == station),
            StationMatcher::Contains(fragment) => station.contains(fragment),
        }
    }
}

/// Moves the readings of matching stations under a replacement region label.
///
/// Rules are applied in declaration order and a record is reassigned at
/// most once (first matching rule wins), so a physical reading can never
/// be counted under two region labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReassignmentRule {
    /// Short identifier used in logs and the run report.
    pub label: String,
    pub matcher: StationMatcher,
    pub target_region: String,
}

/// The reassignment rules for the shipped Malaysian rainfall dataset.
///
/// Negeri Sembilan has no meteorological station of its own in the source
/// data; its series is synthesized from the two nearest stations (KLIA and
/// Melaka). The Subang station sits in Selangor but serves as the Kuala
/// Lumpur reference series.
pub fn default_reassignment_rules() -> Vec<ReassignmentRule> {
    vec![
        ReassignmentRule {
            label: "negeri-sembilan-backfill".to_string(),
            matcher: StationMatcher::OneOf(vec![
                "Kuala Lumpur International Airport (KLIA), Sepang".to_string(),
                "Melaka".to_string(),
            ]),
            target_region: "Negeri Sembilan".to_string(),
        },
        ReassignmentRule {
            label: "kuala-lumpur-split".to_string(),
            matcher: StationMatcher::Contains("Subang".to_string()),
            target_region: "Kuala Lumpur".to_string(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Region groups
// ---------------------------------------------------------------------------

/// A named coarse region covering a set of states. When grouping is
/// configured, each record's region is replaced by its group name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroup {
    pub name: String,
    pub states: Vec<String>,
}

/// The standard West/East Malaysia split.
pub fn default_region_groups() -> Vec<RegionGroup> {
    vec![
        RegionGroup {
            name: "West".to_string(),
            states: PENINSULAR_STATES.iter().map(|s| s.to_string()).collect(),
        },
        RegionGroup {
            name: "East".to_string(),
            states: EAST_MALAYSIA_STATES.iter().map(|s| s.to_string()).collect(),
        },
    ]
}

/// Looks up the group containing `state`. Returns `None` if no group
/// claims it; callers map that to `UNKNOWN_GROUP`.
pub fn group_for<'a>(groups: &'a [RegionGroup], state: &str) -> Option<&'a str> {
    groups
        .iter()
        .find(|g| g.states.iter().any(|s| s == state))
        .map(|g| g.name.as_str())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
