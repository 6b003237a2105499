use thiserror::Error;

/// Raised while building a [`crate::KnowledgeBase`]. An instance that failed
/// validation never exists, so the engine cannot run against one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("the catalog defines no symptoms")]
    EmptyUniverse,

    #[error("the catalog defines no diagnoses")]
    EmptyCatalog,

    #[error("symptom '{0}' is declared more than once")]
    DuplicateSymptom(String),

    #[error("diagnosis '{0}' is declared more than once")]
    DuplicateDiagnosis(String),

    #[error("prior {prior} of '{diagnosis}' is outside (0, 1]")]
    PriorOutOfRange { diagnosis: String, prior: f64 },

    #[error("likelihood {value} of '{symptom}' under '{diagnosis}' is outside [0, 1]")]
    LikelihoodOutOfRange {
        diagnosis: String,
        symptom: String,
        value: f64,
    },

    #[error("unknown qualitative label '{label}' for '{symptom}' under '{diagnosis}'")]
    UnknownLabel {
        diagnosis: String,
        symptom: String,
        label: String,
    },

    #[error("qualitative label '{label}' maps to {value}, outside [0, 1]")]
    ScaleOutOfRange { label: String, value: f64 },

    #[error("default absent-symptom likelihood {0} is outside [0, 1]")]
    DefaultOutOfRange(f64),

    #[error("{kind} modifier '{label}' must be a positive real, got {value}")]
    InvalidModifier {
        kind: &'static str,
        label: String,
        value: f64,
    },
}

/// Raised by the engine when a query names something the knowledge base does not hold.
/// Callers are expected to filter first; this is a backstop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidQueryError {
    #[error("symptom '{0}' is not in the knowledge base")]
    UnknownSymptom(String),

    #[error("diagnosis '{0}' is not in the knowledge base")]
    UnknownDiagnosis(String),
}
