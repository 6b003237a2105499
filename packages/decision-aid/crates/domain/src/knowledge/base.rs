use crate::error::ConfigurationError;
use crate::knowledge::{Diagnosis, LikelihoodEntry, ModifierTable, QualitativeScale, Symptom};
use aid_catalog::{CatalogDocument, DEFAULT_LIKELIHOOD};
use std::collections::{HashMap, HashSet};

/// Symptoms grouped for display. Grouping never affects inference.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomGroup {
    pub name: String,
    pub symptoms: Vec<Symptom>,
}

/// The validated, immutable catalog the posterior engine reads from.
///
/// Only [`KnowledgeBaseBuilder::build`] and [`KnowledgeBase::from_document`] create one,
/// and both reject catalogs that break a range invariant. There are no mutators, so a
/// base can be shared across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    symptoms: Vec<Symptom>,
    index: HashMap<Symptom, usize>,
    groups: Vec<SymptomGroup>,
    diagnoses: Vec<Diagnosis>,
    by_name: HashMap<String, usize>,
    scale: QualitativeScale,
    modifiers: ModifierTable,
    default_likelihood: f64,
}

impl KnowledgeBase {
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// Build from a parsed catalog document.
    pub fn from_document(doc: &CatalogDocument) -> Result<Self, ConfigurationError> {
        let modifiers = doc
            .modifiers
            .age
            .iter()
            .fold(ModifierTable::new(), |t, (l, m)| t.with_age(l.as_str(), *m));
        let modifiers = doc
            .modifiers
            .sex
            .iter()
            .fold(modifiers, |t, (l, m)| t.with_sex(l.as_str(), *m));

        let mut builder = Self::builder()
            .default_likelihood(doc.default_likelihood)
            .scale(doc.scale.iter().map(|(l, p)| (l.as_str(), *p)).collect())
            .modifiers(modifiers);

        for group in &doc.symptoms {
            builder = builder.symptom_group(&group.name, group.symptoms.iter().map(String::as_str));
        }

        for (name, spec) in &doc.diagnoses {
            let diagnosis = spec
                .likelihoods
                .iter()
                .fold(Diagnosis::new(name.as_str(), spec.prior), |d, (s, l)| {
                    d.with_likelihood(s.as_str(), LikelihoodEntry::from(l))
                });
            builder = builder.diagnosis(diagnosis);
        }

        builder.build()
    }

    /// The full symptom universe, in declaration order.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn symptom(&self, name: &str) -> Option<&Symptom> {
        self.index.get(name).map(|&i| &self.symptoms[i])
    }

    pub fn contains_symptom(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn groups(&self) -> &[SymptomGroup] {
        &self.groups
    }

    /// All diagnoses, in declaration order.
    pub fn diagnoses(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    pub fn diagnosis(&self, name: &str) -> Option<&Diagnosis> {
        self.by_name.get(name).map(|&i| &self.diagnoses[i])
    }

    pub fn scale(&self) -> &QualitativeScale {
        &self.scale
    }

    pub fn modifiers(&self) -> &ModifierTable {
        &self.modifiers
    }

    pub fn default_likelihood(&self) -> f64 {
        self.default_likelihood
    }

    /// P(symptom | diagnosis): the documented likelihood with labels resolved, or the
    /// default absent-symptom likelihood when the diagnosis has no entry.
    pub fn resolve(&self, diagnosis: &Diagnosis, symptom: &Symptom) -> f64 {
        diagnosis
            .entry(symptom.as_str())
            .and_then(|entry| self.scale.resolve(entry))
            .unwrap_or(self.default_likelihood)
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBaseBuilder {
    groups: Vec<SymptomGroup>,
    diagnoses: Vec<Diagnosis>,
    scale: QualitativeScale,
    modifiers: ModifierTable,
    default_likelihood: f64,
}

impl Default for KnowledgeBaseBuilder {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            diagnoses: Vec::new(),
            scale: QualitativeScale::standard(),
            modifiers: ModifierTable::default(),
            default_likelihood: DEFAULT_LIKELIHOOD,
        }
    }
}

impl KnowledgeBaseBuilder {
    /// Add ungrouped symptoms to the universe.
    pub fn symptoms<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        self.symptom_group(aid_catalog::UNGROUPED, names)
    }

    pub fn symptom_group<I, S>(mut self, name: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        let symptoms: Vec<Symptom> = names.into_iter().map(Into::into).collect();
        match self.groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.symptoms.extend(symptoms),
            None => self.groups.push(SymptomGroup {
                name: name.to_string(),
                symptoms,
            }),
        }
        self
    }

    pub fn diagnosis(mut self, diagnosis: Diagnosis) -> Self {
        self.diagnoses.push(diagnosis);
        self
    }

    pub fn scale(mut self, scale: QualitativeScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn modifiers(mut self, modifiers: ModifierTable) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn default_likelihood(mut self, p: f64) -> Self {
        self.default_likelihood = p;
        self
    }

    pub fn build(self) -> Result<KnowledgeBase, ConfigurationError> {
        let Self {
            groups,
            mut diagnoses,
            scale,
            modifiers,
            default_likelihood,
        } = self;

        if !is_probability(default_likelihood) {
            return Err(ConfigurationError::DefaultOutOfRange(default_likelihood));
        }

        for (label, value) in scale.labels() {
            if !is_probability(value) {
                return Err(ConfigurationError::ScaleOutOfRange {
                    label: label.to_string(),
                    value,
                });
            }
        }

        for (kind, label, value) in modifiers.entries() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidModifier {
                    kind,
                    label: label.to_string(),
                    value,
                });
            }
        }

        let mut symptoms = Vec::new();
        let mut index = HashMap::new();
        for symptom in groups.iter().flat_map(|g| g.symptoms.iter()) {
            if index.insert(symptom.clone(), symptoms.len()).is_some() {
                return Err(ConfigurationError::DuplicateSymptom(symptom.to_string()));
            }
            symptoms.push(symptom.clone());
        }
        if symptoms.is_empty() {
            return Err(ConfigurationError::EmptyUniverse);
        }

        if diagnoses.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }

        let mut by_name = HashMap::new();
        for (i, diagnosis) in diagnoses.iter().enumerate() {
            if by_name.insert(diagnosis.name().to_string(), i).is_some() {
                return Err(ConfigurationError::DuplicateDiagnosis(
                    diagnosis.name().to_string(),
                ));
            }
            validate_diagnosis(diagnosis, &scale)?;
        }

        // Evidence is only ever iterated over the universe, so entries outside it are dead.
        for diagnosis in &mut diagnoses {
            let mut dropped = HashSet::new();
            diagnosis.retain_symptoms(|s| {
                let known = index.contains_key(s);
                if !known {
                    dropped.insert(s.clone());
                }
                known
            });
            for symptom in dropped {
                tracing::warn!(
                    diagnosis = diagnosis.name(),
                    symptom = symptom.as_str(),
                    "Dropping likelihood for a symptom outside the universe"
                );
            }
        }

        tracing::debug!(
            symptoms = symptoms.len(),
            diagnoses = diagnoses.len(),
            "Knowledge base built"
        );

        Ok(KnowledgeBase {
            symptoms,
            index,
            groups,
            diagnoses,
            by_name,
            scale,
            modifiers,
            default_likelihood,
        })
    }
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

fn validate_diagnosis(
    diagnosis: &Diagnosis,
    scale: &QualitativeScale,
) -> Result<(), ConfigurationError> {
    let prior = diagnosis.prior();
    if !(prior > 0.0 && prior <= 1.0) {
        return Err(ConfigurationError::PriorOutOfRange {
            diagnosis: diagnosis.name().to_string(),
            prior,
        });
    }

    for (symptom, entry) in diagnosis.documented() {
        match entry {
            LikelihoodEntry::Value(value) if !is_probability(*value) => {
                return Err(ConfigurationError::LikelihoodOutOfRange {
                    diagnosis: diagnosis.name().to_string(),
                    symptom: symptom.to_string(),
                    value: *value,
                });
            }
            LikelihoodEntry::Label(label) if scale.get(label).is_none() => {
                return Err(ConfigurationError::UnknownLabel {
                    diagnosis: diagnosis.name().to_string(),
                    symptom: symptom.to_string(),
                    label: label.clone(),
                });
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> KnowledgeBaseBuilder {
        KnowledgeBase::builder()
            .symptoms(["x", "y"])
            .diagnosis(Diagnosis::new("D1", 0.5).with_likelihood("x", 0.8))
            .diagnosis(Diagnosis::new("D2", 0.5).with_likelihood("x", "might"))
    }

    #[test]
    fn test_resolve_uses_documented_label_or_default() {
        let kb = base().build().unwrap();
        let d1 = kb.diagnosis("D1").unwrap();
        let d2 = kb.diagnosis("D2").unwrap();
        let x = kb.symptom("x").unwrap();
        let y = kb.symptom("y").unwrap();

        assert_eq!(kb.resolve(d1, x), 0.8);
        assert_eq!(kb.resolve(d2, x), 0.3);
        assert_eq!(kb.resolve(d1, y), 0.01);
    }

    #[test]
    fn test_custom_default_likelihood() {
        let kb = base().default_likelihood(0.05).build().unwrap();
        let d1 = kb.diagnosis("D1").unwrap();
        assert_eq!(kb.resolve(d1, kb.symptom("y").unwrap()), 0.05);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = KnowledgeBase::builder().symptoms(["x"]).build().unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyCatalog);
    }

    #[test]
    fn test_empty_universe_rejected() {
        let err = KnowledgeBase::builder()
            .diagnosis(Diagnosis::new("D", 1.0))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyUniverse);
    }

    #[test]
    fn test_prior_bounds() {
        for prior in [0.0, -0.2, 1.01, f64::NAN] {
            let err = KnowledgeBase::builder()
                .symptoms(["x"])
                .diagnosis(Diagnosis::new("D", prior))
                .build()
                .unwrap_err();
            assert!(matches!(err, ConfigurationError::PriorOutOfRange { .. }));
        }

        let ok = KnowledgeBase::builder()
            .symptoms(["x"])
            .diagnosis(Diagnosis::new("D", 1.0))
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_likelihood_and_label_checks() {
        let err = base()
            .diagnosis(Diagnosis::new("D3", 0.1).with_likelihood("x", 1.5))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::LikelihoodOutOfRange {
                diagnosis: "D3".into(),
                symptom: "x".into(),
                value: 1.5,
            }
        );

        let err = base()
            .diagnosis(Diagnosis::new("D3", 0.1).with_likelihood("y", "often"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownLabel {
                diagnosis: "D3".into(),
                symptom: "y".into(),
                label: "often".into(),
            }
        );
    }

    #[test]
    fn test_default_and_scale_bounds() {
        let err = base().default_likelihood(1.2).build().unwrap_err();
        assert_eq!(err, ConfigurationError::DefaultOutOfRange(1.2));

        let err = base()
            .scale(QualitativeScale::standard().with_label("certain", 1.1))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ScaleOutOfRange { .. }));
    }

    #[test]
    fn test_modifier_bounds() {
        let err = base()
            .modifiers(ModifierTable::new().with_sex("female", 0.0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidModifier {
                kind: "sex",
                label: "female".into(),
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = base().symptom_group("Other", ["x"]).build().unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateSymptom("x".into()));

        let err = base().diagnosis(Diagnosis::new("D1", 0.2)).build().unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateDiagnosis("D1".into()));
    }

    #[test]
    fn test_entries_outside_universe_are_dropped() {
        let kb = base()
            .diagnosis(
                Diagnosis::new("Trauma", 0.01)
                    .with_likelihood("x", "sometimes")
                    .with_likelihood("high_mechanism", "usually"),
            )
            .build()
            .unwrap();
        let trauma = kb.diagnosis("Trauma").unwrap();
        assert!(trauma.documents("x"));
        assert!(!trauma.documents("high_mechanism"));
    }

    #[test]
    fn test_from_document_keeps_groups_and_modifiers() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{
            "default_likelihood": 0.02,
            "symptoms": [
                { "name": "Neurologic", "symptoms": ["confusion"] },
                { "name": "Skin", "symptoms": ["itchiness", "blistering"] }
            ],
            "diagnoses": {
                "Burn": { "prior": 0.1, "likelihoods": { "blistering": "sometimes" } },
                "Stroke": { "prior": 0.2, "likelihoods": { "confusion": 0.6 } }
            },
            "modifiers": { "age": { "65_plus": 1.3 }, "sex": { "male": 1.1 } }
        }"#,
        )
        .unwrap();

        let kb = KnowledgeBase::from_document(&doc).unwrap();
        let names: Vec<_> = kb.symptoms().iter().map(Symptom::as_str).collect();
        assert_eq!(names, vec!["confusion", "itchiness", "blistering"]);
        assert_eq!(kb.groups().len(), 2);
        assert_eq!(kb.groups()[1].name, "Skin");
        assert_eq!(kb.default_likelihood(), 0.02);
        assert_eq!(kb.modifiers().age_multiplier("65_plus"), 1.3);
        assert_eq!(kb.modifiers().sex_multiplier("male"), 1.1);

        let burn = kb.diagnosis("Burn").unwrap();
        assert_eq!(kb.resolve(burn, kb.symptom("blistering").unwrap()), 0.5);
        assert_eq!(kb.resolve(burn, kb.symptom("confusion").unwrap()), 0.02);
    }

    #[test]
    fn test_knowledge_base_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KnowledgeBase>();
    }
}
