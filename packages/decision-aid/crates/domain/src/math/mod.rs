pub mod logspace;

pub use logspace::{ln_factor, normalize_log_weights};
