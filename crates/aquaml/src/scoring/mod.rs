mod config;
mod policy;
mod rules;
mod validation;

pub use config::ScoringProfile;
pub use policy::{AggregationPolicy, ComplexityTerm, QualityTier};
pub use rules::{Deviation, ParameterRule};
pub use validation::{validate, Measurements, ValidationError};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One rule's share of the final score, recorded in rule-table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub parameter: String,
    /// Credit earned (additive policy) or penalty charged (subtractive).
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

/// Classification output for a single measurement set.
///
/// `tier` is populated by subtractive profiles; `confidence` and `algorithm`
/// by additive ones. The confidence figure is advisory only and never feeds
/// back into the score or verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub score: u8,
    pub potable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<QualityTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    pub risk_factors: Vec<String>,
    pub breakdown: Vec<RuleContribution>,
}

/// Stateless classifier applying one scoring profile to measurement sets.
///
/// Each call is a single-pass pure computation over immutable configuration
/// and call-local state, so an engine can be shared across threads freely.
pub struct PotabilityEngine {
    profile: ScoringProfile,
}

impl PotabilityEngine {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn laboratory() -> Self {
        Self::new(ScoringProfile::laboratory())
    }

    pub fn field() -> Self {
        Self::new(ScoringProfile::field())
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Validate a raw form submission and classify it in one call.
    pub fn predict_raw(
        &self,
        raw: &HashMap<String, String>,
    ) -> Result<PredictionResult, ValidationError> {
        let measurements = validate(&self.profile.rules, raw)?;
        self.predict(&measurements)
    }

    /// Classify an already-numeric measurement set.
    ///
    /// Presence and finiteness are still enforced so directly constructed
    /// inputs obey the same precondition as validated form input.
    pub fn predict(&self, measurements: &Measurements) -> Result<PredictionResult, ValidationError> {
        let readings = self.readings(measurements)?;

        let mut total = 0.0;
        let mut breakdown = Vec::with_capacity(self.profile.rules.len());
        let mut risk_factors: Vec<String> = Vec::new();

        for (rule, value) in self.profile.rules.iter().zip(readings) {
            let severity = rule.severity(value);
            let amount = self.profile.policy.rule_amount(rule.weight, severity);
            let risk = rule.risk_message(value).map(str::to_owned);
            if let Some(message) = &risk {
                if !risk_factors.iter().any(|seen| seen == message) {
                    risk_factors.push(message.clone());
                }
            }
            total += amount;
            breakdown.push(RuleContribution {
                parameter: rule.name.clone(),
                amount,
                risk,
            });
        }

        let complexity = self.complexity_adjustment(measurements);
        let raw_score = self.profile.policy.raw_score(total, complexity);
        let score = raw_score.clamp(0.0, 100.0).round() as u8;
        let potable = score >= self.profile.potability_threshold;

        let (tier, confidence, algorithm) = match self.profile.policy {
            AggregationPolicy::Subtractive => (Some(QualityTier::from_score(score)), None, None),
            AggregationPolicy::AdditiveWithCap => (
                None,
                Some(policy::confidence_from_score(score)),
                self.profile.algorithm.clone(),
            ),
        };

        Ok(PredictionResult {
            score,
            potable,
            tier,
            confidence,
            algorithm,
            risk_factors,
            breakdown,
        })
    }

    /// Readings aligned with the rule table, or the full list of violations.
    fn readings(&self, measurements: &Measurements) -> Result<Vec<f64>, ValidationError> {
        let mut absent = Vec::new();
        let mut non_finite = Vec::new();
        let mut readings = Vec::with_capacity(self.profile.rules.len());

        for rule in &self.profile.rules {
            match measurements.get(&rule.name) {
                None => absent.push(rule.name.clone()),
                Some(value) if !value.is_finite() => non_finite.push(rule.name.clone()),
                Some(value) => readings.push(value),
            }
        }

        if !absent.is_empty() {
            return Err(ValidationError::MissingOrEmpty(absent));
        }
        if !non_finite.is_empty() {
            return Err(ValidationError::NotNumeric(non_finite));
        }
        Ok(readings)
    }

    fn complexity_adjustment(&self, measurements: &Measurements) -> f64 {
        self.profile
            .complexity
            .iter()
            .map(|term| {
                measurements
                    .get(&term.parameter)
                    .map_or(0.0, |value| term.apply(value))
            })
            .sum()
    }
}
