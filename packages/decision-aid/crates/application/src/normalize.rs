use domain::{KnowledgeBase, Symptom};
use serde::Serialize;
use std::collections::HashSet;

/// Free-text symptom input split against a knowledge base universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedSymptoms {
    /// Universe members, in first-seen order, without duplicates.
    pub recognized: Vec<Symptom>,
    /// Canonicalized inputs that are not in the universe.
    pub unrecognized: Vec<String>,
}

impl NormalizedSymptoms {
    pub fn is_empty(&self) -> bool {
        self.recognized.is_empty()
    }
}

pub struct SymptomNormalizer;

impl SymptomNormalizer {
    /// `" Chest Pain-Pressure "` becomes `"chest_pain_pressure"`.
    pub fn canonical(raw: &str) -> String {
        raw.trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Splits a comma-separated line into trimmed, non-empty tokens.
    pub fn split_line(line: &str) -> Vec<String> {
        line.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Finds the universe member spelled `name`, or failing that the one whose
    /// canonical form is `name`. Catalog names need not be canonical themselves.
    pub fn lookup<'kb>(kb: &'kb KnowledgeBase, name: &str) -> Option<&'kb Symptom> {
        kb.symptom(name).or_else(|| {
            kb.symptoms()
                .iter()
                .find(|s| Self::canonical(s.as_str()) == name)
        })
    }

    pub fn normalize<I, S>(kb: &KnowledgeBase, inputs: I) -> NormalizedSymptoms
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = NormalizedSymptoms::default();

        for input in inputs {
            let name = Self::canonical(input.as_ref());
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }

            match Self::lookup(kb, &name) {
                Some(symptom) if !out.recognized.contains(symptom) => {
                    out.recognized.push(symptom.clone())
                }
                Some(_) => {}
                None => out.unrecognized.push(name),
            }
        }

        out
    }
}
