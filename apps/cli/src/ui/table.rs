use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use decision_aid::application::RankedDiagnosis;
use decision_aid::domain::inference::{Factor, FactorSource};

/// `0.1234` renders as `12.3%`.
pub fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

fn base(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

pub fn ranking(rows: &[RankedDiagnosis]) -> Table {
    let mut table = base(&["#", "Diagnosis", "Probability"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.rank).set_alignment(CellAlignment::Right),
            Cell::new(&row.diagnosis),
            Cell::new(percent(row.probability)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn factor_label(source: &FactorSource) -> String {
    match source {
        FactorSource::Prior => "prior".to_string(),
        FactorSource::AgeModifier { label } => format!("age group: {}", label),
        FactorSource::SexModifier { label } => format!("sex: {}", label),
        FactorSource::Present { symptom, documented } => {
            let suffix = if *documented { "" } else { " (default)" };
            format!("+ {}{}", symptom, suffix)
        }
        FactorSource::Absent { symptom, documented } => {
            let suffix = if *documented { "" } else { " (default)" };
            format!("- {}{}", symptom, suffix)
        }
    }
}

pub fn factors<'a>(rows: impl IntoIterator<Item = &'a Factor>) -> Table {
    let mut table = base(&["Factor", "Value", "ln"]);
    for factor in rows {
        table.add_row(vec![
            Cell::new(factor_label(&factor.source)),
            Cell::new(format!("{:.4}", factor.value)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", factor.value.ln())).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Symptom groups, one row per group.
pub fn symptom_groups<'a>(groups: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Table {
    let mut table = base(&["Group", "#", "Symptoms"]);
    for (name, symptoms) in groups {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(symptoms.len()).set_alignment(CellAlignment::Right),
            Cell::new(symptoms.join(", ")),
        ]);
    }
    table
}
