use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::core::context::AppContext;
use crate::ui::{table, Icon, Theme};

#[derive(Parser, Debug, Clone)]
pub struct SymptomsCommand {
    /// Only show groups whose name contains this text
    #[arg(short, long)]
    pub group: Option<String>,

    /// One table row per group instead of one line per symptom
    #[arg(long, conflicts_with = "json")]
    pub table: bool,

    /// Print groups as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct GroupView<'a> {
    name: &'a str,
    symptoms: Vec<&'a str>,
}

impl SymptomsCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        let kb = ctx.knowledge_base();
        let filter = self.group.as_deref().map(str::to_lowercase);

        let groups: Vec<GroupView> = kb
            .groups()
            .iter()
            .filter(|g| {
                filter
                    .as_deref()
                    .map_or(true, |f| g.name.to_lowercase().contains(f))
            })
            .map(|g| GroupView {
                name: &g.name,
                symptoms: g.symptoms.iter().map(|s| s.as_str()).collect(),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&groups)?);
            return Ok(());
        }

        let meta = &ctx.catalog.document.metadata;
        println!(
            "{} {} {}",
            Icon::Catalog,
            Theme::primary(if meta.name.is_empty() {
                ctx.catalog.origin()
            } else {
                meta.name.clone()
            }),
            Theme::muted(format!(
                "{} symptoms · {} diagnoses",
                kb.symptoms().len(),
                kb.diagnoses().len()
            ))
        );

        if self.table {
            println!("{}", table::symptom_groups(groups.iter().map(|g| (g.name, &g.symptoms[..]))));
        } else {
            for group in &groups {
                println!("\n{}", Theme::bold(group.name));
                for symptom in &group.symptoms {
                    println!("  {}", Theme::symptom(symptom));
                }
            }
        }

        if groups.is_empty() {
            println!("{}", Theme::muted("No matching groups."));
        } else if self.group.is_none() {
            println!(
                "\n{}",
                Theme::muted("Enter symptoms with spaces or underscores; case does not matter.")
            );
        }

        Ok(())
    }
}
