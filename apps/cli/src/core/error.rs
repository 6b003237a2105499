use decision_aid::application::AssessmentError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl CliError {
    /// Prompt errors: Ctrl-C and Esc surface as `Interrupted`.
    pub fn from_prompt(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted => CliError::Cancelled,
            _ => CliError::Io(err),
        }
    }

    /// Returns a themed, actionable suggestion for the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Catalog(_) => Some(
                "Run `decision-aid validate <file>` to see every issue with its location."
                    .to_string(),
            ),
            CliError::Config(_) => Some(
                "Check ~/.decision-aid/config.toml for misspelled keys or values.".to_string(),
            ),
            CliError::Assessment(AssessmentError::NoSuchDiagnosis(_)) => Some(
                "Diagnosis names match case-insensitively, and a unique fragment such as 'coronary' works too."
                    .to_string(),
            ),
            CliError::Assessment(AssessmentError::AmbiguousDiagnosis { .. }) => {
                Some("Use more of the name to pick one.".to_string())
            }
            _ => None,
        }
    }

    pub fn render(&self) {
        eprintln!("\n{} {}", console::style("Error:").red().bold(), self);
        if let Some(s) = self.suggestion() {
            eprintln!("{} {}", console::style("  help:").dim(), s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_prompt_is_cancel() {
        let err = CliError::from_prompt(io::Error::new(io::ErrorKind::Interrupted, "ctrl-c"));
        assert!(matches!(err, CliError::Cancelled));

        let err = CliError::from_prompt(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_suggestions() {
        assert!(CliError::Catalog("bad".into()).suggestion().is_some());
        assert!(CliError::Cancelled.suggestion().is_none());
        assert!(
            CliError::from(AssessmentError::NoSuchDiagnosis("gout".into()))
                .suggestion()
                .is_some()
        );
    }
}
