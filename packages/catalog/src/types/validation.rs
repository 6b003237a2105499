use crate::{CatalogDocument, LikelihoodSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema, Serialize, Deserialize)]
pub enum ValidationLevel {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: ValidationLevel,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Error,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Warning,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_info(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            level: ValidationLevel::Info,
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == ValidationLevel::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.level == ValidationLevel::Error)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Document-level checks. Reports every problem instead of stopping at the first,
/// so a catalog author can fix a file in one pass.
pub struct CatalogValidator;

impl CatalogValidator {
    pub fn validate(doc: &CatalogDocument) -> ValidationResult {
        let mut result = ValidationResult::new();

        Self::validate_default_likelihood(doc, &mut result);
        Self::validate_scale(doc, &mut result);
        Self::validate_symptoms(doc, &mut result);
        Self::validate_diagnoses(doc, &mut result);
        Self::validate_modifiers(doc, &mut result);
        Self::validate_prior_mass(doc, &mut result);

        result
    }

    fn validate_default_likelihood(doc: &CatalogDocument, result: &mut ValidationResult) {
        if !is_probability(doc.default_likelihood) {
            result.add_error(
                "default_likelihood",
                format!("{} is not a probability in [0, 1]", doc.default_likelihood),
            );
        }
    }

    fn validate_scale(doc: &CatalogDocument, result: &mut ValidationResult) {
        for (label, p) in &doc.scale {
            if !is_probability(*p) {
                result.add_error(
                    format!("scale.{}", label),
                    format!("{} is not a probability in [0, 1]", p),
                );
            }
        }
    }

    fn validate_symptoms(doc: &CatalogDocument, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        let mut count = 0;

        for group in &doc.symptoms {
            for symptom in &group.symptoms {
                count += 1;
                if symptom.trim().is_empty() {
                    result.add_error(
                        format!("symptoms.{}", group.name),
                        "Symptom names must not be blank",
                    );
                } else if !seen.insert(symptom.as_str()) {
                    result.add_error(
                        format!("symptoms.{}", group.name),
                        format!("Symptom '{}' is listed more than once", symptom),
                    );
                }
            }
        }

        if count == 0 {
            result.add_error("symptoms", "At least one symptom is required");
        }
    }

    fn validate_diagnoses(doc: &CatalogDocument, result: &mut ValidationResult) {
        if doc.diagnoses.is_empty() {
            result.add_error("diagnoses", "At least one diagnosis is required");
            return;
        }

        let universe: HashSet<&str> = doc.symptom_names().collect();

        for (name, spec) in &doc.diagnoses {
            let field = format!("diagnoses.{}", name);

            if !(spec.prior > 0.0 && spec.prior <= 1.0) {
                result.add_error(
                    format!("{}.prior", field),
                    format!("Prior {} must lie in (0, 1]", spec.prior),
                );
            }

            if spec.likelihoods.is_empty() {
                result.add_warning(
                    format!("{}.likelihoods", field),
                    "No documented likelihoods; every symptom uses the default",
                );
            }

            for (symptom, likelihood) in &spec.likelihoods {
                let entry_field = format!("{}.likelihoods.{}", field, symptom);

                match likelihood {
                    LikelihoodSpec::Value(p) if !is_probability(*p) => {
                        result.add_error(
                            entry_field.clone(),
                            format!("{} is not a probability in [0, 1]", p),
                        );
                    }
                    LikelihoodSpec::Label(label) if !doc.scale.contains_key(label) => {
                        result.add_error(
                            entry_field.clone(),
                            format!("Unknown qualitative label '{}'", label),
                        );
                    }
                    _ => {}
                }

                if !universe.contains(symptom.as_str()) {
                    result.add_warning(
                        entry_field,
                        format!(
                            "Symptom '{}' is not in the symptom list and will never be consulted",
                            symptom
                        ),
                    );
                }
            }
        }
    }

    fn validate_modifiers(doc: &CatalogDocument, result: &mut ValidationResult) {
        let tables = [("age", &doc.modifiers.age), ("sex", &doc.modifiers.sex)];
        for (kind, table) in tables {
            for (label, multiplier) in table {
                if !(multiplier.is_finite() && *multiplier > 0.0) {
                    result.add_error(
                        format!("modifiers.{}.{}", kind, label),
                        format!("Multiplier {} must be a positive real", multiplier),
                    );
                }
            }
        }
    }

    fn validate_prior_mass(doc: &CatalogDocument, result: &mut ValidationResult) {
        let mass: f64 = doc.diagnoses.values().map(|d| d.prior).sum();
        if !doc.diagnoses.is_empty() && (mass - 1.0).abs() > 1e-9 {
            result.add_info(
                "diagnoses",
                format!(
                    "Priors sum to {:.3}; posteriors are renormalized so this is allowed",
                    mass
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CatalogDocument {
        serde_json::from_str(json).unwrap()
    }

    fn fields(result: &ValidationResult, level: ValidationLevel) -> Vec<String> {
        result
            .issues
            .iter()
            .filter(|i| i.level == level)
            .map(|i| i.field.clone())
            .collect()
    }

    #[test]
    fn test_well_formed_catalog_is_valid() {
        let doc = parse(
            r#"{
            "symptoms": ["x", "y"],
            "diagnoses": {
                "A": { "prior": 0.5, "likelihoods": { "x": 0.8 } },
                "B": { "prior": 0.5, "likelihoods": { "x": "might" } }
            }
        }"#,
        );
        let result = CatalogValidator::validate(&doc);
        assert!(result.valid);
        assert!(!result.has_errors());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_range_violations_are_errors() {
        let doc = parse(
            r#"{
            "default_likelihood": 1.5,
            "symptoms": ["x"],
            "diagnoses": {
                "A": { "prior": 0.0, "likelihoods": { "x": -0.1 } },
                "B": { "prior": 1.2, "likelihoods": { "x": "often" } }
            },
            "modifiers": { "age": { "old": 0.0 }, "sex": { "f": -1.0 } }
        }"#,
        );
        let result = CatalogValidator::validate(&doc);
        assert!(!result.valid);
        let errors = fields(&result, ValidationLevel::Error);
        for expected in [
            "default_likelihood",
            "diagnoses.A.prior",
            "diagnoses.A.likelihoods.x",
            "diagnoses.B.prior",
            "diagnoses.B.likelihoods.x",
            "modifiers.age.old",
            "modifiers.sex.f",
        ] {
            assert!(errors.iter().any(|f| f == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_empty_catalog_is_invalid() {
        let doc = parse(r#"{ "symptoms": [] }"#);
        let result = CatalogValidator::validate(&doc);
        let errors = fields(&result, ValidationLevel::Error);
        assert!(errors.contains(&"symptoms".to_string()));
        assert!(errors.contains(&"diagnoses".to_string()));
    }

    #[test]
    fn test_duplicate_symptom_is_error() {
        let doc = parse(
            r#"{
            "symptoms": [
                { "name": "A", "symptoms": ["x"] },
                { "name": "B", "symptoms": ["x"] }
            ],
            "diagnoses": { "D": { "prior": 1.0, "likelihoods": { "x": 0.5 } } }
        }"#,
        );
        let result = CatalogValidator::validate(&doc);
        assert_eq!(fields(&result, ValidationLevel::Error), vec!["symptoms.B"]);
    }

    #[test]
    fn test_likelihood_outside_universe_is_warning() {
        let doc = parse(
            r#"{
            "symptoms": ["x"],
            "diagnoses": {
                "Trauma": { "prior": 1.0, "likelihoods": { "x": 0.5, "high_mechanism": "usually" } }
            }
        }"#,
        );
        let result = CatalogValidator::validate(&doc);
        assert!(result.valid);
        assert_eq!(
            fields(&result, ValidationLevel::Warning),
            vec!["diagnoses.Trauma.likelihoods.high_mechanism"]
        );
    }

    #[test]
    fn test_prior_mass_reported_as_info() {
        let doc = parse(
            r#"{
            "symptoms": ["x"],
            "diagnoses": { "A": { "prior": 0.2, "likelihoods": { "x": 0.5 } } }
        }"#,
        );
        let result = CatalogValidator::validate(&doc);
        assert!(result.valid);
        assert_eq!(fields(&result, ValidationLevel::Info), vec!["diagnoses"]);
    }
}
