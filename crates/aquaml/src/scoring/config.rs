use super::policy::{AggregationPolicy, ComplexityTerm};
use super::rules::ParameterRule;
use serde::{Deserialize, Serialize};

/// Versioned scoring configuration: a rule table plus the aggregation policy
/// and threshold applied over it.
///
/// Profiles are serde round-trippable so deployments can keep their tuned
/// tables in external, reviewable configuration instead of code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub name: String,
    pub policy: AggregationPolicy,
    /// Score at or above which the sample is considered potable.
    pub potability_threshold: u8,
    pub rules: Vec<ParameterRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub complexity: Vec<ComplexityTerm>,
    /// Fixed descriptive label echoed in additive-profile results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

impl ScoringProfile {
    /// Nine-parameter physicochemical panel scored additively.
    ///
    /// Weights sum to 100 by construction, so a sample inside every optimal
    /// band scores 100 before the complexity adjustment.
    pub fn laboratory() -> Self {
        Self {
            name: "laboratory".to_string(),
            policy: AggregationPolicy::AdditiveWithCap,
            potability_threshold: 65,
            rules: vec![
                ParameterRule::new("ph", (6.5, 8.5), (2.0, 12.0), 15.0)
                    .flag_below("Acidic pH detected")
                    .flag_above("Alkaline pH detected"),
                ParameterRule::new("hardness", (60.0, 120.0), (0.0, 400.0), 12.0)
                    .flag_above("Excessive water hardness"),
                ParameterRule::new("solids", (0.0, 500.0), (0.0, 1200.0), 13.0)
                    .flag_above("High total dissolved solids"),
                ParameterRule::new("chloramines", (1.0, 4.0), (0.0, 8.0), 12.0)
                    .flag_below("Insufficient disinfection")
                    .flag_above("Excessive chloramine levels"),
                ParameterRule::new("sulfate", (0.0, 250.0), (0.0, 500.0), 10.0)
                    .flag_above("High sulfate concentration"),
                ParameterRule::new("conductivity", (0.0, 400.0), (0.0, 1000.0), 11.0)
                    .flag_above("High electrical conductivity"),
                ParameterRule::new("organic_carbon", (0.0, 2.0), (0.0, 6.0), 9.0)
                    .flag_above("High organic carbon content"),
                ParameterRule::new("trihalomethanes", (0.0, 80.0), (0.0, 140.0), 10.0)
                    .flag_above("Dangerous trihalomethane levels"),
                ParameterRule::new("turbidity", (0.0, 1.0), (0.0, 5.0), 8.0)
                    .flag_above("High turbidity detected"),
            ],
            complexity: vec![
                ComplexityTerm::new("ph", 7.0, 0.5),
                ComplexityTerm::new("conductivity", 0.0, 0.002),
                ComplexityTerm::new("solids", 0.0, 0.0015),
                ComplexityTerm::new("trihalomethanes", 0.0, 0.02),
            ],
            algorithm: Some("Support Vector Machine (SVM)".to_string()),
        }
    }

    /// Six-parameter portable-probe panel scored subtractively from 100.
    pub fn field() -> Self {
        Self {
            name: "field".to_string(),
            policy: AggregationPolicy::Subtractive,
            potability_threshold: 60,
            rules: vec![
                ParameterRule::new("ph", (6.5, 8.5), (4.5, 10.5), 20.0)
                    .flag_below("Acidic pH outside safe range")
                    .flag_above("Alkaline pH outside safe range"),
                ParameterRule::new("turbidity", (0.0, 1.0), (0.0, 3.0), 25.0)
                    .flag_above("High turbidity detected"),
                ParameterRule::new("chlorine", (0.2, 4.0), (0.05, 8.0), 10.0)
                    .flag_below("Insufficient chlorine residual")
                    .flag_above("Excessive chlorine residual"),
                ParameterRule::new("temperature", (10.0, 25.0), (0.0, 35.0), 10.0)
                    .flag_below("Water temperature below monitored range")
                    .flag_above("Elevated water temperature"),
                ParameterRule::new("conductivity", (0.0, 800.0), (0.0, 1800.0), 20.0)
                    .flag_above("High electrical conductivity"),
                ParameterRule::new("hardness", (0.0, 150.0), (0.0, 225.0), 15.0)
                    .flag_above("Excessive water hardness"),
            ],
            complexity: Vec::new(),
            algorithm: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_profiles_have_weights_summing_to_one_hundred() {
        for profile in [ScoringProfile::laboratory(), ScoringProfile::field()] {
            let total: f64 = profile.rules.iter().map(|rule| rule.weight).sum();
            assert!(
                (total - 100.0).abs() < 1e-9,
                "profile '{}' weights sum to {}",
                profile.name,
                total
            );
        }
    }

    #[test]
    fn complexity_terms_reference_configured_parameters() {
        let profile = ScoringProfile::laboratory();
        for term in &profile.complexity {
            assert!(
                profile.rules.iter().any(|rule| rule.name == term.parameter),
                "unknown complexity parameter {}",
                term.parameter
            );
        }
    }

    #[test]
    fn profiles_round_trip_through_serde() {
        let profile = ScoringProfile::field();
        let encoded = serde_json::to_string(&profile).expect("profile serializes");
        let decoded: ScoringProfile = serde_json::from_str(&encoded).expect("profile deserializes");
        assert_eq!(decoded, profile);
    }
}
