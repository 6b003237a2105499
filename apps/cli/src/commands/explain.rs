use anyhow::Result;
use clap::Parser;
use decision_aid::domain::inference::Factor;
use decision_aid::domain::Explanation;

use super::{EngineArgs, PatientArgs};
use crate::core::context::AppContext;
use crate::core::error::CliError;
use crate::ui::{table, Theme};

#[derive(Parser, Debug, Clone)]
pub struct ExplainCommand {
    /// Diagnosis name (case-insensitive; a unique fragment is enough)
    pub diagnosis: String,

    #[command(flatten)]
    pub patient: PatientArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Also list absent symptoms that use the catalog default
    #[arg(long)]
    pub all_factors: bool,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExplainCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        let service = ctx.service(self.engine.apply(ctx.config.engine));
        let request = self.patient.request();

        let explanation = service
            .explain(&request, &self.diagnosis)
            .map_err(CliError::from)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&explanation)?);
            return Ok(());
        }

        let posterior = service
            .assess(&request)
            .map_err(CliError::from)?
            .distribution
            .get(&explanation.diagnosis)
            .unwrap_or(0.0);

        render(&explanation, posterior, self.all_factors);
        Ok(())
    }
}

fn render(explanation: &Explanation, posterior: f64, all_factors: bool) {
    println!("{}", Theme::primary(&explanation.diagnosis));

    if all_factors {
        println!("{}", table::factors(&explanation.factors));
    } else {
        println!("{}", table::factors(explanation.informative()));

        let (count, product) = collapsed(&explanation.factors);
        if count > 0 {
            println!(
                "{}",
                Theme::muted(format!(
                    "{} absent symptoms at the catalog default contribute ×{:.4} (same for every diagnosis)",
                    count, product
                ))
            );
        }
    }

    println!(
        "score {:.3e} · ln {:.3} · posterior {}",
        explanation.score,
        explanation.log_score,
        Theme::probability(posterior)
    );
}

/// Count and combined value of the factors hidden from the default view.
fn collapsed(factors: &[Factor]) -> (usize, f64) {
    factors
        .iter()
        .filter(|f| !f.is_informative())
        .fold((0, 1.0), |(n, p), f| (n + 1, p * f.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision_aid::domain::inference::FactorSource;
    use decision_aid::domain::Symptom;

    #[test]
    fn test_collapsed_counts_only_default_absents() {
        let factors = vec![
            Factor {
                source: FactorSource::Prior,
                value: 0.1,
            },
            Factor {
                source: FactorSource::Absent {
                    symptom: Symptom::new("a"),
                    documented: false,
                },
                value: 0.99,
            },
            Factor {
                source: FactorSource::Absent {
                    symptom: Symptom::new("b"),
                    documented: true,
                },
                value: 0.5,
            },
            Factor {
                source: FactorSource::Absent {
                    symptom: Symptom::new("c"),
                    documented: false,
                },
                value: 0.99,
            },
        ];
        let (count, product) = collapsed(&factors);
        assert_eq!(count, 2);
        assert!((product - 0.99 * 0.99).abs() < 1e-12);
    }
}
