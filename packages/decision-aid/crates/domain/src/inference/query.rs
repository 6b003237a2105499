use crate::knowledge::Symptom;
use std::collections::BTreeSet;

/// One inference request. Symptoms are a set: duplicates collapse and order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    selected: BTreeSet<Symptom>,
    age_group: String,
    sex: String,
}

impl Query {
    pub fn new(age_group: impl Into<String>, sex: impl Into<String>) -> Self {
        Self {
            selected: BTreeSet::new(),
            age_group: age_group.into(),
            sex: sex.into(),
        }
    }

    pub fn with_symptom(mut self, symptom: impl Into<Symptom>) -> Self {
        self.selected.insert(symptom.into());
        self
    }

    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        self.selected.extend(symptoms.into_iter().map(Into::into));
        self
    }

    pub fn selected(&self) -> &BTreeSet<Symptom> {
        &self.selected
    }

    pub fn is_selected(&self, symptom: &str) -> bool {
        self.selected.contains(symptom)
    }

    pub fn age_group(&self) -> &str {
        &self.age_group
    }

    pub fn sex(&self) -> &str {
        &self.sex
    }
}
