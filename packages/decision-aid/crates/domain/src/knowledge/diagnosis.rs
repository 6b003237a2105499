use crate::knowledge::Symptom;
use aid_catalog::LikelihoodSpec;
use std::collections::HashMap;

/// P(symptom present | diagnosis), as a number or a qualitative label.
#[derive(Debug, Clone, PartialEq)]
pub enum LikelihoodEntry {
    Value(f64),
    Label(String),
}

impl From<f64> for LikelihoodEntry {
    fn from(p: f64) -> Self {
        LikelihoodEntry::Value(p)
    }
}

impl From<&str> for LikelihoodEntry {
    fn from(label: &str) -> Self {
        LikelihoodEntry::Label(label.to_string())
    }
}

impl From<&LikelihoodSpec> for LikelihoodEntry {
    fn from(spec: &LikelihoodSpec) -> Self {
        match spec {
            LikelihoodSpec::Value(p) => LikelihoodEntry::Value(*p),
            LikelihoodSpec::Label(l) => LikelihoodEntry::Label(l.clone()),
        }
    }
}

/// A candidate diagnosis: a prior plus the symptoms it has documented evidence for.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    name: String,
    prior: f64,
    likelihoods: HashMap<Symptom, LikelihoodEntry>,
}

impl Diagnosis {
    pub fn new(name: impl Into<String>, prior: f64) -> Self {
        Self {
            name: name.into(),
            prior,
            likelihoods: HashMap::new(),
        }
    }

    pub fn with_likelihood(
        mut self,
        symptom: impl Into<Symptom>,
        entry: impl Into<LikelihoodEntry>,
    ) -> Self {
        self.likelihoods.insert(symptom.into(), entry.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// The raw entry, before label resolution. Use [`crate::KnowledgeBase::resolve`]
    /// for a probability.
    pub fn entry(&self, symptom: &str) -> Option<&LikelihoodEntry> {
        self.likelihoods.get(symptom)
    }

    pub fn documents(&self, symptom: &str) -> bool {
        self.likelihoods.contains_key(symptom)
    }

    pub fn documented(&self) -> impl Iterator<Item = (&Symptom, &LikelihoodEntry)> {
        self.likelihoods.iter()
    }

    pub(crate) fn retain_symptoms(&mut self, mut keep: impl FnMut(&Symptom) -> bool) {
        self.likelihoods.retain(|s, _| keep(s));
    }
}
