use aid_catalog::{CatalogDocument, CatalogValidator, ValidationLevel, ValidationResult};
use anyhow::{Context, Result};
use domain::KnowledgeBase;
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog shipped inside the binary, used when no file is configured.
pub const EMBEDDED_CATALOG: &str = include_str!("../../catalog/default.json");

/// Serialization formats a catalog file may use, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match ext {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!("Unsupported catalog format: {:?}", ext),
        }
    }

    pub fn parse(self, content: &str) -> Result<CatalogDocument> {
        match self {
            Self::Json => serde_json::from_str(content).context("Failed to parse JSON catalog"),
            Self::Toml => toml::from_str(content).context("Failed to parse TOML catalog"),
            Self::Yaml => serde_yaml::from_str(content).context("Failed to parse YAML catalog"),
        }
    }
}

/// A parsed catalog together with the text it came from, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    /// `None` for the embedded catalog.
    pub path: Option<PathBuf>,
    pub format: CatalogFormat,
    pub source: String,
    pub document: CatalogDocument,
}

impl LoadedCatalog {
    /// Display name for reports: the file path, or `<embedded>`.
    pub fn origin(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<embedded>".to_string())
    }

    pub fn validate(&self) -> ValidationResult {
        CatalogValidator::validate(&self.document)
    }

    /// Validates the document and builds an immutable knowledge base from it.
    ///
    /// Warnings are logged and do not stop the build. Errors are collected into a
    /// single failure so the caller sees all of them at once.
    pub fn knowledge_base(&self) -> Result<KnowledgeBase> {
        let report = self.validate();

        for issue in &report.issues {
            match issue.level {
                ValidationLevel::Warning => {
                    tracing::warn!(field = %issue.field, "{}", issue.message)
                }
                ValidationLevel::Info => {
                    tracing::debug!(field = %issue.field, "{}", issue.message)
                }
                ValidationLevel::Error => {}
            }
        }

        if report.has_errors() {
            let details: Vec<String> = report
                .errors()
                .map(|i| format!("  {}: {}", i.field, i.message))
                .collect();
            anyhow::bail!(
                "Catalog {} is invalid:\n{}",
                self.origin(),
                details.join("\n")
            );
        }

        KnowledgeBase::from_document(&self.document)
            .with_context(|| format!("Failed to build knowledge base from {}", self.origin()))
    }
}

pub struct CatalogLoader;

impl CatalogLoader {
    /// Reads and parses a catalog file, detecting format by extension.
    pub fn read(path: &Path) -> Result<LoadedCatalog> {
        let format = CatalogFormat::from_path(path)?;
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        let document = format
            .parse(&source)
            .with_context(|| format!("Invalid catalog: {:?}", path))?;

        tracing::debug!(path = ?path, diagnoses = document.diagnoses.len(), "Catalog read");

        Ok(LoadedCatalog {
            path: Some(path.to_path_buf()),
            format,
            source,
            document,
        })
    }

    pub fn embedded() -> Result<LoadedCatalog> {
        let document = CatalogFormat::Json.parse(EMBEDDED_CATALOG)?;

        Ok(LoadedCatalog {
            path: None,
            format: CatalogFormat::Json,
            source: EMBEDDED_CATALOG.to_string(),
            document,
        })
    }

    /// Reads `path` if given, otherwise the embedded catalog.
    pub fn resolve(path: Option<&Path>) -> Result<LoadedCatalog> {
        match path {
            Some(path) => Self::read(path),
            None => Self::embedded(),
        }
    }

    /// Shorthand for [`CatalogLoader::resolve`] followed by a knowledge base build.
    pub fn load(path: Option<&Path>) -> Result<KnowledgeBase> {
        Self::resolve(path)?.knowledge_base()
    }
}
