use crate::knowledge::LikelihoodEntry;
use std::collections::BTreeMap;

/// Maps descriptive labels ("usually", "might", ...) to probabilities.
/// Shared by every diagnosis in a knowledge base.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualitativeScale {
    labels: BTreeMap<String, f64>,
}

impl QualitativeScale {
    pub fn new() -> Self {
        Self::default()
    }

    /// always 0.9, usually 0.7, sometimes 0.5, might 0.3
    pub fn standard() -> Self {
        aid_catalog::standard_scale().into_iter().collect()
    }

    pub fn with_label(mut self, label: impl Into<String>, probability: f64) -> Self {
        self.labels.insert(label.into(), probability);
        self
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels.get(label).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(|(l, p)| (l.as_str(), *p))
    }

    /// Numeric entries resolve to themselves; labels go through the scale.
    pub fn resolve(&self, entry: &LikelihoodEntry) -> Option<f64> {
        match entry {
            LikelihoodEntry::Value(p) => Some(*p),
            LikelihoodEntry::Label(label) => self.get(label),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for QualitativeScale {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|(l, p)| (l.into(), p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scale() {
        let scale = QualitativeScale::standard();
        assert_eq!(scale.get("always"), Some(0.9));
        assert_eq!(scale.get("usually"), Some(0.7));
        assert_eq!(scale.get("sometimes"), Some(0.5));
        assert_eq!(scale.get("might"), Some(0.3));
        assert_eq!(scale.get("rarely"), None);
    }

    #[test]
    fn test_resolve_entries() {
        let scale = QualitativeScale::new().with_label("often", 0.6);
        assert_eq!(scale.resolve(&LikelihoodEntry::Value(0.25)), Some(0.25));
        assert_eq!(scale.resolve(&LikelihoodEntry::from("often")), Some(0.6));
        assert_eq!(scale.resolve(&LikelihoodEntry::from("never")), None);
    }
}
