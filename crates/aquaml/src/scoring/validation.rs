use super::rules::ParameterRule;
use std::collections::HashMap;

/// Finite numeric readings keyed by parameter name.
///
/// Construction goes through [`validate`] for raw form input, or through the
/// `From`/`FromIterator` impls when the caller already holds numbers; the
/// engine re-checks presence and finiteness either way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements(HashMap<String, f64>);

impl Measurements {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }
}

impl From<HashMap<String, f64>> for Measurements {
    fn from(readings: HashMap<String, f64>) -> Self {
        Self(readings)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Measurements {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}

/// Input rejected before any scoring ran. Both variants carry the complete
/// list of offending parameters, in rule-table order, so collaborators can
/// surface every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing or empty parameters: {}", .0.join(", "))]
    MissingOrEmpty(Vec<String>),
    #[error("parameters are not finite numbers: {}", .0.join(", "))]
    NotNumeric(Vec<String>),
}

impl ValidationError {
    pub fn parameters(&self) -> &[String] {
        match self {
            ValidationError::MissingOrEmpty(names) => names,
            ValidationError::NotNumeric(names) => names,
        }
    }
}

/// Check a raw submission against a rule table and parse it into readings.
///
/// Presence is verified first: any configured parameter that is absent or
/// blank after trimming fails the whole submission before numeric parsing
/// starts. Surviving values must parse as finite `f64`s; unparsable or
/// non-finite readings are rejected together rather than flowing into the
/// arithmetic as NaN.
pub fn validate(
    rules: &[ParameterRule],
    raw: &HashMap<String, String>,
) -> Result<Measurements, ValidationError> {
    let missing: Vec<String> = rules
        .iter()
        .filter(|rule| {
            raw.get(&rule.name)
                .map_or(true, |value| value.trim().is_empty())
        })
        .map(|rule| rule.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingOrEmpty(missing));
    }

    let mut readings = HashMap::with_capacity(rules.len());
    let mut rejected = Vec::new();
    for rule in rules {
        let value = raw.get(&rule.name).map(|v| v.trim()).unwrap_or_default();
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => {
                readings.insert(rule.name.clone(), number);
            }
            _ => rejected.push(rule.name.clone()),
        }
    }
    if !rejected.is_empty() {
        return Err(ValidationError::NotNumeric(rejected));
    }

    Ok(Measurements(readings))
}
