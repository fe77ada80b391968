use serde::{Deserialize, Serialize};

/// Aggregation strategy turning per-rule amounts into one raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Start at zero, add bounded per-rule credits, then subtract the
    /// profile's complexity adjustment (floored at zero).
    AdditiveWithCap,
    /// Start at 100 and subtract bounded per-rule penalties.
    Subtractive,
}

impl AggregationPolicy {
    /// Per-rule share of the score: credit earned under the additive policy,
    /// penalty charged under the subtractive one.
    pub(crate) fn rule_amount(self, weight: f64, severity: f64) -> f64 {
        match self {
            Self::AdditiveWithCap => weight * (1.0 - severity),
            Self::Subtractive => weight * severity,
        }
    }

    pub(crate) fn raw_score(self, total: f64, complexity: f64) -> f64 {
        match self {
            Self::AdditiveWithCap => (total - complexity).max(0.0),
            Self::Subtractive => 100.0 - total,
        }
    }
}

/// One term of the additive profile's complexity adjustment: a weighted
/// absolute deviation of a parameter from a center point. The adjustment is
/// a pure function of the input vector, so scores stay reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityTerm {
    pub parameter: String,
    pub center: f64,
    pub factor: f64,
}

impl ComplexityTerm {
    pub fn new(parameter: &str, center: f64, factor: f64) -> Self {
        Self {
            parameter: parameter.to_string(),
            center,
            factor,
        }
    }

    pub(crate) fn apply(&self, value: f64) -> f64 {
        (value - self.center).abs() * self.factor
    }
}

/// Categorical quality label derived from contiguous score bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityTier {
    /// Bands are evaluated highest-first and cover 0-100 exhaustively.
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            Self::Excellent
        } else if score >= 75 {
            Self::Good
        } else if score >= 60 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Advisory confidence figure for the additive profile.
///
/// Deterministic linear map of the score into `[55, 95]`. It never feeds
/// back into the score, verdict, or risk factors.
pub(crate) fn confidence_from_score(score: u8) -> u8 {
    (55.0 + 0.4 * f64::from(score)).round() as u8
}
