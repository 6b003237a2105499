use domain::InvalidQueryError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AssessmentError {
    #[error(transparent)]
    Query(#[from] InvalidQueryError),

    #[error("No diagnosis matches '{0}'")]
    NoSuchDiagnosis(String),

    #[error("'{query}' matches several diagnoses: {}", candidates.join(", "))]
    AmbiguousDiagnosis {
        query: String,
        candidates: Vec<String>,
    },
}
