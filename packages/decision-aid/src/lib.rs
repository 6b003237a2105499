//! Naive-Bayes decision aid: rank diagnoses from observed symptoms.
//!
//! - [`domain`]: knowledge base and posterior engine
//! - [`infrastructure`]: catalog files, embedded catalog, user config
//! - [`application`]: assessment service used by front ends

pub use application;
pub use domain;
pub use infrastructure;
