use anyhow::Result;
use clap::Parser;
use decision_aid::application::{AssessmentRequest, AssessmentService};

use super::EngineArgs;
use crate::core::context::AppContext;
use crate::core::error::CliError;
use crate::ui::{table, Theme};

#[derive(Parser, Debug, Clone)]
pub struct InteractiveCommand {
    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Asks for one demographic label. Skipped when the catalog defines none.
fn pick<'a>(
    prompt: &str,
    labels: impl Iterator<Item = &'a str>,
    default: &str,
) -> Result<Option<String>, CliError> {
    let labels: Vec<&str> = labels.collect();
    if labels.is_empty() {
        return Ok(None);
    }

    let mut select = cliclack::select(prompt);
    for label in &labels {
        select = select.item(label.to_string(), *label, "");
    }
    if labels.contains(&default) {
        select = select.initial_value(default.to_string());
    }

    select.interact().map(Some).map_err(CliError::from_prompt)
}

fn assess_once(service: &AssessmentService) -> Result<()> {
    let kb = service.knowledge_base();
    let policy = service.demographics();

    let age = pick(
        "Age group",
        kb.modifiers().age_groups(),
        policy.default_age_group(),
    )?;
    let sex = pick("Sex", kb.modifiers().sexes(), policy.default_sex())?;

    let line: String = cliclack::input("Enter symptoms separated by commas")
        .placeholder("fever, dizziness")
        .required(false)
        .interact()
        .map_err(CliError::from_prompt)?;

    let mut request = AssessmentRequest::from_line(&line);
    request.age_group = age;
    request.sex = sex;

    let assessment = service.assess(&request).map_err(CliError::from)?;

    if !assessment.ignored.is_empty() {
        cliclack::log::warning(format!(
            "Unrecognized symptoms (ignored): {}",
            assessment.ignored.join(", ")
        ))?;
    }

    if assessment.priors_only {
        cliclack::log::info("No valid symptoms entered. Using priors only.")?;
    } else {
        let used: Vec<&str> = assessment.used.iter().map(|s| s.as_str()).collect();
        cliclack::log::step(format!("Using symptoms: {}", used.join(", ")))?;
    }

    if assessment.is_degenerate() {
        cliclack::log::warning("Every diagnosis scored zero for this combination.")?;
    }

    println!("{}", table::ranking(&assessment.top));
    Ok(())
}

impl InteractiveCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        let service = ctx.service(self.engine.apply(ctx.config.engine));
        let kb = service.knowledge_base();

        cliclack::intro(console::style(" decision-aid ").on_cyan().black())?;
        cliclack::log::info(format!(
            "{} symptoms and {} diagnoses from {}",
            kb.symptoms().len(),
            kb.diagnoses().len(),
            ctx.catalog.origin()
        ))?;
        cliclack::log::remark(Theme::muted(
            "Run `decision-aid symptoms` in another terminal to browse symptom names.",
        ))?;

        loop {
            match assess_once(&service) {
                Ok(()) => {}
                Err(e) if matches!(e.downcast_ref::<CliError>(), Some(CliError::Cancelled)) => {
                    cliclack::outro_cancel("Cancelled")?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            }

            let again = cliclack::confirm("Assess another patient?")
                .initial_value(false)
                .interact()
                .map_err(CliError::from_prompt)?;
            if !again {
                break;
            }
        }

        cliclack::outro("Probabilities are decision support, not a diagnosis.")?;
        Ok(())
    }
}
