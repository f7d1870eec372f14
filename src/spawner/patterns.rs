//! Weighted spawn policies.
//!
//! One uniform roll in `[0, 1)` picks a policy from [`SPAWN_POLICY_TABLE`]:
//!
//! | Policy      | Weight | Roll range   |
//! |-------------|--------|--------------|
//! | `Single`    | 30%    | `[0.0, 0.3)` |
//! | `Formation` | 40%    | `[0.3, 0.7)` |
//! | `Chaos`     | 30%    | `[0.7, 1.0)` |

/// Top-level spawn policy chosen once per spawn event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// One obstacle in one uniformly chosen lane.
    Single,
    /// One of the hand-built [`Formation`]s.
    Formation,
    /// Two or three lanes, staggered in time.
    Chaos,
}

/// Policy table as `(policy, exclusive upper bound of its roll range)`,
/// checked in order.
pub const SPAWN_POLICY_TABLE: [(SpawnPolicy, f64); 3] = [
    (SpawnPolicy::Single, 0.30),
    (SpawnPolicy::Formation, 0.70),
    (SpawnPolicy::Chaos, 1.00),
];

/// Map a roll in `[0, 1)` to its policy. Rolls at or above 1.0 fall into the
/// last entry.
pub fn select_policy(roll: f64) -> SpawnPolicy {
    SPAWN_POLICY_TABLE
        .iter()
        .find(|(_, upper)| roll < *upper)
        .map(|(policy, _)| *policy)
        .unwrap_or(SpawnPolicy::Chaos)
}

/// Formation patterns, chosen uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formation {
    /// 2-3 ground obstacles in a spaced row.
    GroundRow,
    /// Two of the three underground slots blocked.
    UndergroundForced,
    /// 2-4 sky obstacles at random heights.
    SkyFormation,
    /// 2-3 lanes blocked at the same moment.
    VerticalWall,
}

impl Formation {
    pub const ALL: [Formation; 4] = [
        Formation::GroundRow,
        Formation::UndergroundForced,
        Formation::SkyFormation,
        Formation::VerticalWall,
    ];
}

/// What a spawn event produced, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPattern {
    Single,
    Formation(Formation),
    Chaos { lanes: usize },
}

impl SpawnPattern {
    pub fn policy(self) -> SpawnPolicy {
        match self {
            SpawnPattern::Single => SpawnPolicy::Single,
            SpawnPattern::Formation(_) => SpawnPolicy::Formation,
            SpawnPattern::Chaos { .. } => SpawnPolicy::Chaos,
        }
    }
}
