pub mod diagnosis;
pub mod modifiers;
pub mod scale;
pub mod symptoms;
pub mod validation;

pub use diagnosis::*;
pub use modifiers::*;
pub use scale::*;
pub use symptoms::*;
pub use validation::*;
