pub mod adapters;
pub mod system;

pub use adapters::catalog::{CatalogFormat, CatalogLoader, LoadedCatalog};
pub use system::config::{AidConfig, ConfigStore};
