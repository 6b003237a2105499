use aid_catalog::{CatalogDocument, ValidationLevel, ValidationResult};
use anyhow::{Context, Result};
use clap::Parser;
use decision_aid::infrastructure::{CatalogFormat, LoadedCatalog};
use std::fs;
use std::path::PathBuf;

use crate::core::error::CliError;
use crate::ui::{self, diagnostic, Theme};

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    /// Catalog file (JSON, TOML or YAML)
    pub file: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Print the validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// A parse failure with the byte offset the parser pointed at, if any.
struct SyntaxError {
    offset: Option<usize>,
    reason: String,
}

fn parse(format: CatalogFormat, source: &str) -> Result<CatalogDocument, SyntaxError> {
    match format {
        CatalogFormat::Json => serde_json::from_str(source).map_err(|e| SyntaxError {
            offset: diagnostic::line_col_offset(source, e.line(), e.column()),
            reason: e.to_string(),
        }),
        CatalogFormat::Toml => toml::from_str(source).map_err(|e| SyntaxError {
            offset: e.span().map(|r| r.start),
            reason: e.message().to_string(),
        }),
        CatalogFormat::Yaml => serde_yaml::from_str(source).map_err(|e| SyntaxError {
            offset: e.location().map(|l| l.index()),
            reason: e.to_string(),
        }),
    }
}

impl ValidateCommand {
    pub fn execute(self) -> Result<()> {
        let format = CatalogFormat::from_path(&self.file)?;
        let source = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read catalog file: {:?}", self.file))?;
        let name = self.file.display().to_string();

        let document = match parse(format, &source) {
            Ok(document) => document,
            Err(err) => {
                diagnostic::report_syntax(&name, &source, err.offset, &err.reason);
                return Err(CliError::Catalog(format!("{} could not be parsed", name)).into());
            }
        };

        let catalog = LoadedCatalog {
            path: Some(self.file.clone()),
            format,
            source,
            document,
        };
        let result = catalog.validate();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            for issue in &result.issues {
                diagnostic::report_issue(&name, &catalog.source, issue);
            }
            summarize(&result);
        }

        let failed = result.has_errors() || (self.strict && result.has_warnings());
        if failed {
            return Err(CliError::Catalog(format!("{} failed validation", name)).into());
        }

        // Document checks passed; building the knowledge base must succeed too.
        let kb = catalog
            .knowledge_base()
            .map_err(|e| CliError::Catalog(format!("{:#}", e)))?;

        if !self.json {
            ui::success(format!(
                "{} is valid: {} symptoms, {} diagnoses",
                name,
                kb.symptoms().len(),
                kb.diagnoses().len()
            ));
        }

        Ok(())
    }
}

fn summarize(result: &ValidationResult) {
    let count = |level: ValidationLevel| result.issues.iter().filter(|i| i.level == level).count();
    let errors = count(ValidationLevel::Error);
    let warnings = count(ValidationLevel::Warning);

    for info in result.issues.iter().filter(|i| i.level == ValidationLevel::Info) {
        ui::info(Theme::muted(format!("{}: {}", info.field, info.message)));
    }

    if errors + warnings > 0 {
        println!(
            "{} error(s), {} warning(s)",
            Theme::error(errors),
            Theme::warning(warnings)
        );
    }
}
