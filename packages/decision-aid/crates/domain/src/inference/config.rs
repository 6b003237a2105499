use serde::{Deserialize, Serialize};
use std::fmt;

/// Which symptoms contribute a likelihood term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceMode {
    /// Multiply only over selected symptoms; unselected ones are non-events.
    PresentOnly,
    /// Selected symptoms contribute `p`, every other symptom in the universe `1 - p`.
    #[default]
    PresentAndAbsent,
}

/// What `infer` returns when every unnormalized score is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroTotalPolicy {
    /// Every diagnosis maps to 0.0.
    #[default]
    AllZero,
    /// Every diagnosis maps to its raw catalog prior, unnormalized.
    FallBackToPriors,
}

/// How factors are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accumulation {
    /// Plain products. Matches the textbook formula; can underflow on large universes.
    #[default]
    Linear,
    /// Sums of logs, normalized with log-sum-exp.
    LogSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: EvidenceMode,
    pub zero_total: ZeroTotalPolicy,
    pub accumulation: Accumulation,
}

impl EngineConfig {
    pub fn with_mode(mut self, mode: EvidenceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_zero_total(mut self, policy: ZeroTotalPolicy) -> Self {
        self.zero_total = policy;
        self
    }

    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }
}

impl fmt::Display for EvidenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceMode::PresentOnly => write!(f, "present-only"),
            EvidenceMode::PresentAndAbsent => write!(f, "present-and-absent"),
        }
    }
}

impl fmt::Display for ZeroTotalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroTotalPolicy::AllZero => write!(f, "all-zero"),
            ZeroTotalPolicy::FallBackToPriors => write!(f, "fall-back-to-priors"),
        }
    }
}

impl fmt::Display for Accumulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accumulation::Linear => write!(f, "linear"),
            Accumulation::LogSpace => write!(f, "log-space"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.mode, EvidenceMode::PresentAndAbsent);
        assert_eq!(config.zero_total, ZeroTotalPolicy::AllZero);
        assert_eq!(config.accumulation, Accumulation::Linear);
    }

    #[test]
    fn test_kebab_case_names() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "mode": "present-only", "zero_total": "fall-back-to-priors" }"#,
        )
        .unwrap();
        assert_eq!(config.mode, EvidenceMode::PresentOnly);
        assert_eq!(config.zero_total, ZeroTotalPolicy::FallBackToPriors);
        assert_eq!(config.accumulation, Accumulation::Linear);
        assert_eq!(config.mode.to_string(), "present-only");
    }
}
