use owo_colors::OwoColorize;
use std::fmt;

/// Color palette for decision-aid output.
pub struct Theme;

impl Theme {
    /// Headings and diagnosis names.
    pub fn primary(text: impl fmt::Display) -> String {
        format!("{}", text.cyan().bold())
    }

    pub fn bold(text: impl fmt::Display) -> String {
        format!("{}", text.bold())
    }

    /// Symptom identifiers.
    pub fn symptom(text: impl fmt::Display) -> String {
        format!("{}", text.magenta())
    }

    pub fn success(text: impl fmt::Display) -> String {
        format!("{}", text.green().bold())
    }

    pub fn warning(text: impl fmt::Display) -> String {
        format!("{}", text.yellow().bold())
    }

    pub fn error(text: impl fmt::Display) -> String {
        format!("{}", text.red().bold())
    }

    /// Metadata, hints, low-weight rows.
    pub fn muted(text: impl fmt::Display) -> String {
        format!("{}", text.dimmed())
    }

    /// A probability as a percentage, brighter the more likely it is.
    pub fn probability(p: f64) -> String {
        let text = super::table::percent(p);
        if p >= 0.5 {
            format!("{}", text.red().bold())
        } else if p >= 0.1 {
            format!("{}", text.yellow())
        } else if p >= 0.01 {
            text
        } else {
            format!("{}", text.dimmed())
        }
    }
}

pub enum Icon {
    Check,
    Cross,
    Warning,
    Info,
    Catalog,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self {
            Icon::Check => "✔",
            Icon::Cross => "✖",
            Icon::Warning => "⚠️ ",
            Icon::Info => "ℹ️ ",
            Icon::Catalog => "📋",
        };
        write!(f, "{}", icon)
    }
}
