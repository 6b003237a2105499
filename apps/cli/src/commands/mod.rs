use clap::{Args, ValueEnum};
use decision_aid::domain::{Accumulation, EngineConfig, EvidenceMode, ZeroTotalPolicy};

pub mod assess;
pub mod explain;
pub mod interactive;
pub mod schema;
pub mod symptoms;
pub mod validate;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Only selected symptoms contribute
    PresentOnly,
    /// Unselected symptoms contribute 1 - p
    PresentAndAbsent,
}

impl From<ModeArg> for EvidenceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::PresentOnly => EvidenceMode::PresentOnly,
            ModeArg::PresentAndAbsent => EvidenceMode::PresentAndAbsent,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroTotalArg {
    /// Report 0% for everything
    AllZero,
    /// Report the raw catalog priors
    FallBackToPriors,
}

impl From<ZeroTotalArg> for ZeroTotalPolicy {
    fn from(policy: ZeroTotalArg) -> Self {
        match policy {
            ZeroTotalArg::AllZero => ZeroTotalPolicy::AllZero,
            ZeroTotalArg::FallBackToPriors => ZeroTotalPolicy::FallBackToPriors,
        }
    }
}

/// Engine overrides; anything left unset comes from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Evidence model
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// What to report when every diagnosis scores zero
    #[arg(long, value_enum)]
    pub zero_total: Option<ZeroTotalArg>,

    /// Accumulate factors in log space (avoids underflow on large catalogs)
    #[arg(long)]
    pub log_space: bool,
}

impl EngineArgs {
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(mode) = self.mode {
            config = config.with_mode(mode.into());
        }
        if let Some(policy) = self.zero_total {
            config = config.with_zero_total(policy.into());
        }
        if self.log_space {
            config = config.with_accumulation(Accumulation::LogSpace);
        }
        config
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PatientArgs {
    /// Comma-separated symptoms, e.g. "fever, chest pain pressure"
    #[arg(short, long, value_delimiter = ',')]
    pub symptoms: Vec<String>,

    /// Age group label from the catalog's modifier table
    #[arg(long)]
    pub age: Option<String>,

    /// Sex label from the catalog's modifier table
    #[arg(long)]
    pub sex: Option<String>,
}

impl PatientArgs {
    pub fn request(&self) -> decision_aid::application::AssessmentRequest {
        let mut request = decision_aid::application::AssessmentRequest::new(
            self.symptoms
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty()),
        );
        request.age_group = self.age.clone();
        request.sex = self.sex.clone();
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_args_override_config() {
        let base = EngineConfig::default().with_zero_total(ZeroTotalPolicy::FallBackToPriors);

        let untouched = EngineArgs::default().apply(base);
        assert_eq!(untouched, base);

        let args = EngineArgs {
            mode: Some(ModeArg::PresentOnly),
            zero_total: None,
            log_space: true,
        };
        let config = args.apply(base);
        assert_eq!(config.mode, EvidenceMode::PresentOnly);
        assert_eq!(config.zero_total, ZeroTotalPolicy::FallBackToPriors);
        assert_eq!(config.accumulation, Accumulation::LogSpace);
    }

    #[test]
    fn test_patient_request_drops_blank_symptoms() {
        let args = PatientArgs {
            symptoms: vec!["fever".into(), " ".into(), " nausea".into()],
            age: Some("65_plus".into()),
            sex: None,
        };
        let request = args.request();
        assert_eq!(request.symptoms, vec!["fever", "nausea"]);
        assert_eq!(request.age_group.as_deref(), Some("65_plus"));
        assert_eq!(request.sex, None);
    }
}
