use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DiagnosisSpec {
    /// Unconditional probability, expected in (0, 1]
    pub prior: f64,

    /// Documented P(symptom | diagnosis); everything else uses the catalog default
    #[serde(default)]
    pub likelihoods: BTreeMap<String, LikelihoodSpec>,
}

/// A likelihood written either as a probability or as a qualitative label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum LikelihoodSpec {
    Value(f64),
    Label(String),
}

impl fmt::Display for LikelihoodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikelihoodSpec::Value(v) => write!(f, "{}", v),
            LikelihoodSpec::Label(l) => write!(f, "\"{}\"", l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_likelihood_reads_as_value() {
        let spec: LikelihoodSpec = serde_json::from_str("1").unwrap();
        assert_eq!(spec, LikelihoodSpec::Value(1.0));
    }

    #[test]
    fn test_likelihoods_default_to_empty() {
        let spec: DiagnosisSpec = serde_json::from_str(r#"{ "prior": 0.2 }"#).unwrap();
        assert!(spec.likelihoods.is_empty());
    }
}
