use aid_catalog::CatalogDocument;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::ui;

#[derive(Parser, Debug, Clone)]
pub struct SchemaCommand {
    /// Write the schema to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SchemaCommand {
    pub fn execute(self) -> Result<()> {
        let schema = serde_json::to_string_pretty(&CatalogDocument::json_schema())?;

        match self.output {
            Some(path) => {
                fs::write(&path, schema)
                    .with_context(|| format!("Failed to write schema to {:?}", path))?;
                ui::success(format!("Catalog schema written to {}", path.display()));
            }
            None => println!("{}", schema),
        }

        Ok(())
    }
}
