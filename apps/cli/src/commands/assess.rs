use anyhow::Result;
use clap::Parser;
use decision_aid::application::Assessment;
use decision_aid::domain::inference::Normalization;

use super::{EngineArgs, PatientArgs};
use crate::core::context::AppContext;
use crate::core::error::CliError;
use crate::ui::{self, table, Theme};

#[derive(Parser, Debug, Clone)]
pub struct AssessCommand {
    #[command(flatten)]
    pub patient: PatientArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Number of diagnoses to show (defaults to the config's top_n)
    #[arg(long, conflicts_with = "all")]
    pub top: Option<usize>,

    /// Show every diagnosis
    #[arg(long)]
    pub all: bool,

    /// Print the full assessment as JSON
    #[arg(long)]
    pub json: bool,
}

impl AssessCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut service = ctx.service(self.engine.apply(ctx.config.engine));
        if self.all {
            service = service.with_top_n(ctx.knowledge_base().diagnoses().len());
        } else if let Some(n) = self.top {
            service = service.with_top_n(n);
        }

        let assessment = service
            .assess(&self.patient.request())
            .map_err(CliError::from)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        } else {
            render(&assessment);
        }

        Ok(())
    }
}

/// Human-readable report shared with the interactive flow.
pub fn render(assessment: &Assessment) {
    for clamped in &assessment.clamped {
        ui::warn(format!(
            "Unknown {} '{}', using '{}'",
            clamped.kind, clamped.given, clamped.used
        ));
    }

    if !assessment.ignored.is_empty() {
        ui::warn(format!(
            "Unrecognized symptoms (ignored): {}",
            assessment.ignored.join(", ")
        ));
    }

    if assessment.priors_only {
        ui::info("No valid symptoms entered. Using priors only.");
    } else {
        let used: Vec<String> = assessment.used.iter().map(Theme::symptom).collect();
        ui::info(format!("Using symptoms: {}", used.join(", ")));
    }

    println!(
        "{}",
        Theme::muted(format!(
            "age group: {} · sex: {} · mode: {} · accumulation: {}",
            assessment.age_group,
            assessment.sex,
            assessment.config.mode,
            assessment.config.accumulation
        ))
    );

    match assessment.distribution.normalization() {
        Normalization::Normalized => {}
        Normalization::AllZero => {
            ui::warn("Every diagnosis scored zero; no ranking is possible.")
        }
        Normalization::RawPriors => {
            ui::warn("Every diagnosis scored zero; showing raw catalog priors instead.")
        }
    }

    println!("\n{}", Theme::primary("Diagnosis probabilities"));
    println!("{}", table::ranking(&assessment.top));

    let hidden = assessment.distribution.len().saturating_sub(assessment.top.len());
    if hidden > 0 {
        println!(
            "{}",
            Theme::muted(format!("{} more not shown (use --all)", hidden))
        );
    }
}
