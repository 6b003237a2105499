use aid_catalog::{ValidationIssue, ValidationLevel};
use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(decision_aid::catalog::invalid))]
pub struct CatalogError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("declared here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(decision_aid::catalog::suspicious), severity(Warning))]
pub struct CatalogWarning {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("declared here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

#[derive(Error, Debug, Diagnostic)]
#[error("Catalog could not be parsed: {reason}")]
#[diagnostic(code(decision_aid::catalog::syntax))]
pub struct CatalogSyntaxError {
    pub reason: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("parser stopped here")]
    pub span: SourceSpan,
}

/// Finds the key a dotted validation path points at, e.g.
/// `diagnoses.Flu.likelihoods.fever`, by searching for each segment in turn.
/// Works for JSON, TOML and YAML because all three spell keys out in order.
pub fn locate(source: &str, field: &str) -> Option<SourceSpan> {
    let mut cursor = 0;
    let mut last = None;

    for segment in field.split('.') {
        let offset = cursor + source.get(cursor..)?.find(segment)?;
        last = Some(SourceSpan::new(offset.into(), segment.len()));
        cursor = offset + segment.len();
    }

    last
}

fn help_for(issue: &ValidationIssue) -> Option<String> {
    let field = issue.field.as_str();
    if field.contains(".likelihoods.") && issue.message.starts_with("Unknown qualitative label") {
        Some("Use a label defined under `scale`, or a number in [0, 1].".to_string())
    } else if field.ends_with(".prior") {
        Some("Priors must be greater than 0 and at most 1.".to_string())
    } else if issue.level == ValidationLevel::Warning && field.contains(".likelihoods.") {
        Some("Add the symptom to `symptoms` or remove this entry.".to_string())
    } else {
        None
    }
}

/// Prints one validation issue as a miette report. Info-level issues are skipped.
pub fn report_issue(file_name: &str, source: &str, issue: &ValidationIssue) {
    let src = NamedSource::new(file_name, source.to_string());
    let span = locate(source, &issue.field);
    let message = format!("{}: {}", issue.field, issue.message);
    let help = help_for(issue);

    let report = match issue.level {
        ValidationLevel::Error => miette::Report::new(CatalogError {
            message,
            src,
            span,
            help,
        }),
        ValidationLevel::Warning => miette::Report::new(CatalogWarning {
            message,
            src,
            span,
            help,
        }),
        ValidationLevel::Info => return,
    };

    println!("{:?}", report);
}

/// Prints a parse failure with the position the parser reported, when it reported one.
pub fn report_syntax(file_name: &str, source: &str, offset: Option<usize>, reason: &str) {
    let span = match offset {
        Some(offset) => SourceSpan::new(offset.min(source.len()).into(), 1_usize),
        None => SourceSpan::new(SourceOffset::from(0), 0_usize),
    };

    let err = CatalogSyntaxError {
        src: NamedSource::new(file_name, source.to_string()),
        span,
        reason: reason.to_string(),
    };

    println!("{:?}", miette::Report::new(err));
}

/// Byte offset of a 1-based line and column, as serde_json reports them.
pub fn line_col_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some(start + column.saturating_sub(1))
}
