use serde::{Deserialize, Serialize};

/// Side of the optimal band a measurement deviated toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Below,
    Above,
}

/// Declarative acceptance band for one measured quantity.
///
/// Values inside `optimal_low..=optimal_high` (inclusive) earn full credit or
/// zero penalty. Outside the band, severity grows linearly with distance and
/// reaches 1 at the matching hard bound, so a rule can never contribute more
/// than `weight` in either direction no matter how far out of range the
/// reading is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRule {
    pub name: String,
    pub optimal_low: f64,
    pub optimal_high: f64,
    pub hard_low: f64,
    pub hard_high: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_below: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_above: Option<String>,
}

impl ParameterRule {
    pub fn new(name: &str, optimal: (f64, f64), hard: (f64, f64), weight: f64) -> Self {
        Self {
            name: name.to_string(),
            optimal_low: optimal.0,
            optimal_high: optimal.1,
            hard_low: hard.0,
            hard_high: hard.1,
            weight,
            risk_below: None,
            risk_above: None,
        }
    }

    /// Attach the risk message emitted when a reading falls below the band.
    pub fn flag_below(mut self, message: &str) -> Self {
        self.risk_below = Some(message.to_string());
        self
    }

    /// Attach the risk message emitted when a reading exceeds the band.
    pub fn flag_above(mut self, message: &str) -> Self {
        self.risk_above = Some(message.to_string());
        self
    }

    pub fn deviation(&self, value: f64) -> Option<Deviation> {
        if value < self.optimal_low {
            Some(Deviation::Below)
        } else if value > self.optimal_high {
            Some(Deviation::Above)
        } else {
            None
        }
    }

    /// Normalized distance from the optimal band, clamped to `[0, 1]`.
    ///
    /// A degenerate span (hard bound equal to the optimal edge) treats any
    /// out-of-range reading on that side as maximally severe.
    pub fn severity(&self, value: f64) -> f64 {
        match self.deviation(value) {
            None => 0.0,
            Some(Deviation::Below) => {
                ramp(self.optimal_low - value, self.optimal_low - self.hard_low)
            }
            Some(Deviation::Above) => {
                ramp(value - self.optimal_high, self.hard_high - self.optimal_high)
            }
        }
    }

    /// Side-appropriate risk message, if the rule defines one for that side.
    pub fn risk_message(&self, value: f64) -> Option<&str> {
        match self.deviation(value)? {
            Deviation::Below => self.risk_below.as_deref(),
            Deviation::Above => self.risk_above.as_deref(),
        }
    }
}

fn ramp(distance: f64, span: f64) -> f64 {
    if span <= 0.0 {
        1.0
    } else {
        (distance / span).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> ParameterRule {
        ParameterRule::new("ph", (6.5, 8.5), (4.5, 10.5), 20.0)
            .flag_below("too acidic")
            .flag_above("too alkaline")
    }

    #[test]
    fn optimal_bounds_are_inclusive() {
        let rule = rule();
        assert_eq!(rule.severity(6.5), 0.0);
        assert_eq!(rule.severity(8.5), 0.0);
        assert_eq!(rule.severity(7.0), 0.0);
        assert!(rule.risk_message(6.5).is_none());
        assert!(rule.risk_message(8.5).is_none());
    }

    #[test]
    fn severity_grows_linearly_toward_hard_bound() {
        let rule = rule();
        assert!((rule.severity(5.5) - 0.5).abs() < 1e-12);
        assert!((rule.severity(9.5) - 0.5).abs() < 1e-12);
        assert_eq!(rule.severity(4.5), 1.0);
        assert_eq!(rule.severity(10.5), 1.0);
    }

    #[test]
    fn severity_clamps_beyond_hard_bound() {
        let rule = rule();
        assert_eq!(rule.severity(0.0), 1.0);
        assert_eq!(rule.severity(14.0), 1.0);
    }

    #[test]
    fn degenerate_span_is_maximally_severe() {
        let rule = ParameterRule::new("solids", (0.0, 500.0), (0.0, 1200.0), 13.0);
        assert_eq!(rule.severity(-1.0), 1.0);
    }

    #[test]
    fn risk_message_picks_the_deviation_side() {
        let rule = rule();
        assert_eq!(rule.risk_message(5.0), Some("too acidic"));
        assert_eq!(rule.risk_message(9.0), Some("too alkaline"));
    }

    #[test]
    fn one_sided_rule_stays_silent_on_the_unflagged_side() {
        let rule = ParameterRule::new("hardness", (60.0, 120.0), (0.0, 400.0), 12.0)
            .flag_above("too hard");
        assert_eq!(rule.deviation(30.0), Some(Deviation::Below));
        assert!(rule.risk_message(30.0).is_none());
        assert_eq!(rule.risk_message(500.0), Some("too hard"));
    }
}
