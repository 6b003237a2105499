pub mod config;
pub mod engine;
pub mod explain;
pub mod posterior;
pub mod query;

pub use config::{Accumulation, EngineConfig, EvidenceMode, ZeroTotalPolicy};
pub use engine::PosteriorEngine;
pub use explain::{Explanation, Factor, FactorSource};
pub use posterior::{Normalization, PosteriorDistribution, PosteriorEntry};
pub use query::Query;
