use serde::Serialize;
use std::cmp::Ordering;

/// How the values of a [`PosteriorDistribution`] were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Scores divided by a positive total; values sum to 1.
    Normalized,
    /// Every score was zero; every value is 0.0.
    AllZero,
    /// Every score was zero; values are the raw catalog priors.
    RawPriors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorEntry {
    pub diagnosis: String,
    pub probability: f64,
}

/// The engine's output: one entry per catalog diagnosis, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorDistribution {
    entries: Vec<PosteriorEntry>,
    normalization: Normalization,
}

impl PosteriorDistribution {
    pub(crate) fn new(entries: Vec<PosteriorEntry>, normalization: Normalization) -> Self {
        Self {
            entries,
            normalization,
        }
    }

    pub fn get(&self, diagnosis: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.diagnosis == diagnosis)
            .map(|e| e.probability)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PosteriorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// True when every unnormalized score was zero, whichever fallback was applied.
    pub fn is_degenerate(&self) -> bool {
        self.normalization != Normalization::Normalized
    }

    /// Entries sorted by descending probability; ties break on name so output is stable.
    pub fn ranked(&self) -> Vec<&PosteriorEntry> {
        let mut ranked: Vec<&PosteriorEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.diagnosis.cmp(&b.diagnosis))
        });
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<&PosteriorEntry> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<'a> IntoIterator for &'a PosteriorDistribution {
    type Item = &'a PosteriorEntry;
    type IntoIter = std::slice::Iter<'a, PosteriorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
