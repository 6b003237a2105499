pub mod error;
pub mod inference;
pub mod knowledge;
pub mod math;

pub use error::{ConfigurationError, InvalidQueryError};
pub use inference::{
    Accumulation, EngineConfig, EvidenceMode, Explanation, PosteriorDistribution, PosteriorEngine,
    Query, ZeroTotalPolicy,
};
pub use knowledge::{Diagnosis, KnowledgeBase, LikelihoodEntry, ModifierTable, QualitativeScale, Symptom};
