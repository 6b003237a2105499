pub mod base;
pub mod diagnosis;
pub mod modifiers;
pub mod scale;
pub mod symptom;

pub use base::{KnowledgeBase, KnowledgeBaseBuilder, SymptomGroup};
pub use diagnosis::{Diagnosis, LikelihoodEntry};
pub use modifiers::ModifierTable;
pub use scale::QualitativeScale;
pub use symptom::Symptom;
