mod commands;
mod core;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::assess::AssessCommand;
use crate::commands::explain::ExplainCommand;
use crate::commands::interactive::InteractiveCommand;
use crate::commands::schema::SchemaCommand;
use crate::commands::symptoms::SymptomsCommand;
use crate::commands::validate::ValidateCommand;
use crate::core::context::AppContext;
use crate::core::error::CliError;

#[derive(Parser)]
#[command(name = "decision-aid", version)]
#[command(about = "Rank likely diagnoses from reported symptoms", long_about = None)]
struct Cli {
    /// Catalog file (JSON, TOML or YAML); overrides the config file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file (default: ~/.decision-aid/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank diagnoses for a set of symptoms
    Assess(AssessCommand),
    /// Guided prompts for symptoms, age group and sex
    Interactive(InteractiveCommand),
    /// List the symptom universe by group
    Symptoms(SymptomsCommand),
    /// Show the factors behind one diagnosis's score
    Explain(ExplainCommand),
    /// Check a catalog file and point at every problem
    Validate(ValidateCommand),
    /// Print the catalog JSON Schema
    Schema(SchemaCommand),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let context = || AppContext::load(cli.catalog.as_deref(), cli.config.as_deref());

    match cli.command {
        Commands::Assess(cmd) => cmd.execute(&context()?),
        Commands::Interactive(cmd) => cmd.execute(&context()?),
        Commands::Symptoms(cmd) => cmd.execute(&context()?),
        Commands::Explain(cmd) => cmd.execute(&context()?),
        Commands::Validate(cmd) => cmd.execute(),
        Commands::Schema(cmd) => cmd.execute(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => cli_err.render(),
                None => ui::error(format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assess_arguments() {
        let cli = Cli::try_parse_from([
            "decision-aid",
            "assess",
            "--symptoms",
            "fever,chest pain pressure",
            "--age",
            "65_plus",
            "--mode",
            "present-only",
            "--log-space",
            "--top",
            "3",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Assess(cmd) = cli.command else {
            panic!("expected assess");
        };
        assert_eq!(cmd.patient.symptoms, vec!["fever", "chest pain pressure"]);
        assert_eq!(cmd.patient.age.as_deref(), Some("65_plus"));
        assert_eq!(cmd.top, Some(3));
        assert!(cmd.engine.log_space);
    }

    #[test]
    fn test_top_conflicts_with_all() {
        assert!(Cli::try_parse_from(["decision-aid", "assess", "--top", "3", "--all"]).is_err());
    }

    #[test]
    fn test_global_catalog_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["decision-aid", "symptoms", "--catalog", "c.yaml"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("c.yaml")));
    }
}
