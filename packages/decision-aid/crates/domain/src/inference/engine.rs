use crate::error::InvalidQueryError;
use crate::inference::{
    Accumulation, EngineConfig, EvidenceMode, Explanation, Factor, FactorSource, Normalization,
    PosteriorDistribution, PosteriorEntry, Query, ZeroTotalPolicy,
};
use crate::knowledge::{Diagnosis, KnowledgeBase, Symptom};
use crate::math::{ln_factor, normalize_log_weights};

/// Naive-Bayes posterior over every diagnosis in a [`KnowledgeBase`].
///
/// The engine holds only its configuration. Each call reads the knowledge base and
/// builds a fresh distribution, so one engine and one base can serve any number of
/// threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosteriorEngine {
    config: EngineConfig,
}

/// One multiplicative term of a diagnosis score, before it is named for display.
enum Term<'a> {
    Prior,
    Age(&'a str),
    Sex(&'a str),
    Evidence { symptom: &'a Symptom, present: bool },
}

impl PosteriorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes P(diagnosis | symptoms, age group, sex) for every diagnosis.
    ///
    /// Selected symptoms must belong to the knowledge base universe; anything else is
    /// rejected with [`InvalidQueryError::UnknownSymptom`]. Age and sex labels the
    /// modifier table does not know are treated as neutral.
    ///
    /// With [`Accumulation::Linear`], large universes can underflow every score to
    /// zero; that result is reported through the zero-total policy even where
    /// [`Accumulation::LogSpace`] would still separate the diagnoses. Scores that
    /// overflow are renormalized in log space.
    pub fn infer(
        &self,
        kb: &KnowledgeBase,
        query: &Query,
    ) -> Result<PosteriorDistribution, InvalidQueryError> {
        check_symptoms(kb, query)?;

        let diagnoses = kb.diagnoses();
        let mode = self.config.mode;

        let normalized = match self.config.accumulation {
            Accumulation::Linear => {
                let scores: Vec<f64> = diagnoses
                    .iter()
                    .map(|d| terms(kb, query, d, mode).map(|(_, f)| f).product::<f64>())
                    .collect();
                match normalize_linear(&scores) {
                    Linear::Normalized(values) => Some(values),
                    Linear::ZeroTotal => None,
                    Linear::Overflow => {
                        tracing::debug!("Linear scores overflowed, normalizing in log space");
                        normalize_log_weights(&self.log_scores(kb, query))
                    }
                }
            }
            Accumulation::LogSpace => normalize_log_weights(&self.log_scores(kb, query)),
        };

        let (values, normalization) = match normalized {
            Some(values) => (values, Normalization::Normalized),
            None => match self.config.zero_total {
                ZeroTotalPolicy::AllZero => (vec![0.0; diagnoses.len()], Normalization::AllZero),
                ZeroTotalPolicy::FallBackToPriors => (
                    diagnoses.iter().map(Diagnosis::prior).collect(),
                    Normalization::RawPriors,
                ),
            },
        };

        tracing::debug!(
            selected = query.selected().len(),
            diagnoses = diagnoses.len(),
            mode = %mode,
            normalization = ?normalization,
            "Posterior computed"
        );

        let entries = diagnoses
            .iter()
            .zip(values)
            .map(|(d, probability)| PosteriorEntry {
                diagnosis: d.name().to_string(),
                probability,
            })
            .collect();

        Ok(PosteriorDistribution::new(entries, normalization))
    }

    fn log_scores(&self, kb: &KnowledgeBase, query: &Query) -> Vec<f64> {
        kb.diagnoses()
            .iter()
            .map(|d| {
                terms(kb, query, d, self.config.mode)
                    .map(|(_, f)| ln_factor(f))
                    .sum::<f64>()
            })
            .collect()
    }

    /// The factor-by-factor breakdown of one diagnosis's unnormalized score, using the
    /// same terms as [`PosteriorEngine::infer`].
    pub fn explain(
        &self,
        kb: &KnowledgeBase,
        query: &Query,
        diagnosis: &str,
    ) -> Result<Explanation, InvalidQueryError> {
        check_symptoms(kb, query)?;
        let diagnosis = kb
            .diagnosis(diagnosis)
            .ok_or_else(|| InvalidQueryError::UnknownDiagnosis(diagnosis.to_string()))?;

        let factors: Vec<Factor> = terms(kb, query, diagnosis, self.config.mode)
            .map(|(term, value)| {
                let source = match term {
                    Term::Prior => FactorSource::Prior,
                    Term::Age(label) => FactorSource::AgeModifier {
                        label: label.to_string(),
                    },
                    Term::Sex(label) => FactorSource::SexModifier {
                        label: label.to_string(),
                    },
                    Term::Evidence { symptom, present } => {
                        let documented = diagnosis.documents(symptom.as_str());
                        let symptom = symptom.clone();
                        if present {
                            FactorSource::Present {
                                symptom,
                                documented,
                            }
                        } else {
                            FactorSource::Absent {
                                symptom,
                                documented,
                            }
                        }
                    }
                };
                Factor { source, value }
            })
            .collect();

        let score = factors.iter().map(|f| f.value).product::<f64>();
        let log_score = factors.iter().map(|f| ln_factor(f.value)).sum::<f64>();

        Ok(Explanation {
            diagnosis: diagnosis.name().to_string(),
            factors,
            score,
            log_score,
        })
    }
}

fn check_symptoms(kb: &KnowledgeBase, query: &Query) -> Result<(), InvalidQueryError> {
    match query.selected().iter().find(|s| !kb.contains_symptom(s.as_str())) {
        Some(unknown) => Err(InvalidQueryError::UnknownSymptom(unknown.to_string())),
        None => Ok(()),
    }
}

/// Prior, then the two demographic modifiers, then one evidence term per symptom.
/// Modifiers only ever scale the prior; they never touch likelihood terms.
fn terms<'a>(
    kb: &'a KnowledgeBase,
    query: &'a Query,
    diagnosis: &'a Diagnosis,
    mode: EvidenceMode,
) -> impl Iterator<Item = (Term<'a>, f64)> + 'a {
    let modifiers = kb.modifiers();
    let head = [
        (Term::Prior, diagnosis.prior()),
        (
            Term::Age(query.age_group()),
            modifiers.age_multiplier(query.age_group()),
        ),
        (Term::Sex(query.sex()), modifiers.sex_multiplier(query.sex())),
    ];

    let evidence = kb.symptoms().iter().filter_map(move |symptom| {
        let present = query.is_selected(symptom.as_str());
        let p = kb.resolve(diagnosis, symptom);
        match (present, mode) {
            (true, _) => Some((Term::Evidence { symptom, present }, p)),
            (false, EvidenceMode::PresentAndAbsent) => {
                Some((Term::Evidence { symptom, present }, 1.0 - p))
            }
            (false, EvidenceMode::PresentOnly) => None,
        }
    });

    head.into_iter().chain(evidence)
}

enum Linear {
    Normalized(Vec<f64>),
    ZeroTotal,
    /// A score or the total is not finite.
    Overflow,
}

fn normalize_linear(scores: &[f64]) -> Linear {
    let total: f64 = scores.iter().sum();
    if !total.is_finite() {
        Linear::Overflow
    } else if total > 0.0 {
        Linear::Normalized(scores.iter().map(|s| s / total).collect())
    } else {
        Linear::ZeroTotal
    }
}
