use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CountMode — how parties with several updated wishlists are counted
// ---------------------------------------------------------------------------

/// Counting strategy for the wishlist numerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// One per party/participant join row: a party with two updated
    /// wishlists counts twice.
    #[default]
    JoinRows,
    /// Each qualifying party counts once.
    DistinctParties,
}

impl CountMode {
    pub(crate) fn count_expr(self) -> &'static str {
        match self {
            CountMode::JoinRows => "COUNT(p.id) AS wishlistCount",
            CountMode::DistinctParties => "COUNT(DISTINCT p.id) AS wishlistCount",
        }
    }
}

// ---------------------------------------------------------------------------
// SeasonComparison — completion rate of one season against another
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeasonComparison {
    /// Both rates were computed; `delta = current - previous`.
    Difference {
        current: f64,
        previous: f64,
        delta: f64,
    },
    /// The second season's rate could not be computed.
    Incomparable { current: f64, reason: String },
}

impl SeasonComparison {
    /// The percentage-point difference, or the first season's rate when the
    /// seasons could not be compared.
    pub fn value(&self) -> f64 {
        match self {
            SeasonComparison::Difference { delta, .. } => *delta,
            SeasonComparison::Incomparable { current, .. } => *current,
        }
    }

    pub fn is_comparable(&self) -> bool {
        matches!(self, SeasonComparison::Difference { .. })
    }

    /// Completion rate of the first season.
    pub fn current(&self) -> f64 {
        match self {
            SeasonComparison::Difference { current, .. }
            | SeasonComparison::Incomparable { current, .. } => *current,
        }
    }
}
