use crate::normalize::SymptomNormalizer;
use domain::{KnowledgeBase, ModifierTable};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelKind {
    AgeGroup,
    Sex,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::AgeGroup => write!(f, "age group"),
            LabelKind::Sex => write!(f, "sex"),
        }
    }
}

/// A demographic label that was replaced by the configured default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClampedLabel {
    pub kind: LabelKind,
    pub given: String,
    pub used: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub age_group: String,
    pub sex: String,
    pub clamped: Vec<ClampedLabel>,
}

/// Maps requested age group and sex onto the labels a knowledge base knows.
///
/// A missing label takes the default silently. An unknown label is clamped to the
/// default and reported. When the modifier table has no entries of a kind, every
/// label is neutral and passes through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicsPolicy {
    default_age_group: String,
    default_sex: String,
}

impl Default for DemographicsPolicy {
    fn default() -> Self {
        Self::new(
            infrastructure::system::config::UNSPECIFIED,
            infrastructure::system::config::UNSPECIFIED,
        )
    }
}

impl DemographicsPolicy {
    pub fn new(default_age_group: impl Into<String>, default_sex: impl Into<String>) -> Self {
        Self {
            default_age_group: default_age_group.into(),
            default_sex: default_sex.into(),
        }
    }

    pub fn default_age_group(&self) -> &str {
        &self.default_age_group
    }

    pub fn default_sex(&self) -> &str {
        &self.default_sex
    }

    pub fn resolve(
        &self,
        kb: &KnowledgeBase,
        age_group: Option<&str>,
        sex: Option<&str>,
    ) -> Demographics {
        let modifiers = kb.modifiers();
        let mut clamped = Vec::new();

        let age_group = clamp(
            LabelKind::AgeGroup,
            age_group,
            &self.default_age_group,
            modifiers,
            &mut clamped,
        );
        let sex = clamp(
            LabelKind::Sex,
            sex,
            &self.default_sex,
            modifiers,
            &mut clamped,
        );

        Demographics {
            age_group,
            sex,
            clamped,
        }
    }
}

fn clamp(
    kind: LabelKind,
    given: Option<&str>,
    default: &str,
    modifiers: &ModifierTable,
    clamped: &mut Vec<ClampedLabel>,
) -> String {
    let label = match given.map(SymptomNormalizer::canonical) {
        Some(label) if !label.is_empty() => label,
        _ => return default.to_string(),
    };

    let mut labels: Vec<&str> = match kind {
        LabelKind::AgeGroup => modifiers.age_groups().collect(),
        LabelKind::Sex => modifiers.sexes().collect(),
    };
    if labels.is_empty() {
        return label;
    }

    // Catalog spelling wins; exact matches before canonical ones.
    labels.sort_by_key(|l| *l != label);
    if let Some(known) = labels
        .into_iter()
        .find(|l| *l == label || SymptomNormalizer::canonical(l) == label)
    {
        return known.to_string();
    }

    tracing::warn!(kind = %kind, given = %label, used = %default, "Unknown label, using default");
    clamped.push(ClampedLabel {
        kind,
        given: label,
        used: default.to_string(),
    });
    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Diagnosis;
    use pretty_assertions::assert_eq;

    fn kb(modifiers: ModifierTable) -> KnowledgeBase {
        KnowledgeBase::builder()
            .symptoms(["x"])
            .diagnosis(Diagnosis::new("D", 1.0))
            .modifiers(modifiers)
            .build()
            .unwrap()
    }

    fn table() -> ModifierTable {
        ModifierTable::new()
            .with_age("under_40", 1.0)
            .with_age("unspecified", 1.0)
            .with_sex("female", 1.0)
            .with_sex("male", 1.0)
            .with_sex("unspecified", 1.0)
    }

    #[test]
    fn test_known_labels_pass_through() {
        let d = DemographicsPolicy::default().resolve(&kb(table()), Some(" Under_40"), Some("male"));
        assert_eq!(d.age_group, "under_40");
        assert_eq!(d.sex, "male");
        assert!(d.clamped.is_empty());
    }

    #[test]
    fn test_missing_labels_take_defaults_without_report() {
        let d = DemographicsPolicy::default().resolve(&kb(table()), None, Some(""));
        assert_eq!(d.age_group, "unspecified");
        assert_eq!(d.sex, "unspecified");
        assert!(d.clamped.is_empty());
    }

    #[test]
    fn test_unknown_labels_are_clamped() {
        let policy = DemographicsPolicy::new("unspecified", "female");
        let d = policy.resolve(&kb(table()), Some("teen"), Some("other"));
        assert_eq!(d.age_group, "unspecified");
        assert_eq!(d.sex, "female");
        assert_eq!(
            d.clamped,
            vec![
                ClampedLabel {
                    kind: LabelKind::AgeGroup,
                    given: "teen".into(),
                    used: "unspecified".into(),
                },
                ClampedLabel {
                    kind: LabelKind::Sex,
                    given: "other".into(),
                    used: "female".into(),
                },
            ]
        );
    }

    #[test]
    fn test_mixed_case_catalog_labels_match() {
        let table = ModifierTable::new()
            .with_age("Over 65", 1.5)
            .with_sex("Female", 1.1)
            .with_sex("Male", 0.9);
        let d = DemographicsPolicy::default().resolve(&kb(table), Some("over_65"), Some("female"));
        assert_eq!(d.age_group, "Over 65");
        assert_eq!(d.sex, "Female");
        assert!(d.clamped.is_empty());
    }

    #[test]
    fn test_empty_table_accepts_anything() {
        let d = DemographicsPolicy::default().resolve(&kb(ModifierTable::new()), Some("teen"), None);
        assert_eq!(d.age_group, "teen");
        assert!(d.clamped.is_empty());
    }
}
