use crate::knowledge::Symptom;
use serde::Serialize;

/// Where a multiplicative factor in a diagnosis's score came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FactorSource {
    Prior,
    AgeModifier { label: String },
    SexModifier { label: String },
    /// `documented` is false when the likelihood came from the catalog default.
    Present { symptom: Symptom, documented: bool },
    Absent { symptom: Symptom, documented: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub source: FactorSource,
    pub value: f64,
}

impl Factor {
    /// Undocumented absent symptoms contribute the same `1 - default` to every
    /// diagnosis, so they never change a ranking.
    pub fn is_informative(&self) -> bool {
        !matches!(
            self.source,
            FactorSource::Absent {
                documented: false,
                ..
            }
        )
    }
}

/// The unnormalized score of one diagnosis, broken into the factors that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub diagnosis: String,
    pub factors: Vec<Factor>,
    pub score: f64,
    pub log_score: f64,
}

impl Explanation {
    pub fn informative(&self) -> impl Iterator<Item = &Factor> {
        self.factors.iter().filter(|f| f.is_informative())
    }
}
