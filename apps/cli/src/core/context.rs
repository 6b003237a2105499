use anyhow::Result;
use decision_aid::application::{AssessmentService, DemographicsPolicy};
use decision_aid::domain::{EngineConfig, KnowledgeBase, PosteriorEngine};
use decision_aid::infrastructure::{AidConfig, CatalogLoader, ConfigStore, LoadedCatalog};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::CliError;

/// Settings and catalog shared by every subcommand, resolved once from the
/// global flags and the user config file.
pub struct AppContext {
    pub config: AidConfig,
    pub catalog: LoadedCatalog,
    kb: Arc<KnowledgeBase>,
}

impl AppContext {
    /// `--catalog` wins over the config file; with neither, the embedded catalog is used.
    pub fn load(catalog: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let store = match config_path {
            Some(path) => ConfigStore::at(path),
            None => ConfigStore::new()?,
        };

        let mut config = store
            .load()
            .map_err(|e| CliError::Config(format!("{:#}", e)))?;

        if let Some(path) = catalog {
            config.catalog = Some(PathBuf::from(path));
        }

        let catalog = CatalogLoader::resolve(config.catalog.as_deref())?;
        let kb = catalog
            .knowledge_base()
            .map_err(|e| CliError::Catalog(format!("{:#}", e)))?;

        tracing::debug!(
            origin = %catalog.origin(),
            symptoms = kb.symptoms().len(),
            diagnoses = kb.diagnoses().len(),
            "Knowledge base ready"
        );

        Ok(Self {
            config,
            catalog,
            kb: Arc::new(kb),
        })
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Assessment service over the loaded catalog with the given engine settings.
    pub fn service(&self, engine: EngineConfig) -> AssessmentService {
        AssessmentService::new(Arc::clone(&self.kb), PosteriorEngine::new(engine))
            .with_top_n(self.config.top_n)
            .with_demographics(DemographicsPolicy::new(
                self.config.default_age_group.as_str(),
                self.config.default_sex.as_str(),
            ))
    }
}
