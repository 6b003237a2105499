use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use domain::inference::PosteriorEntry;
use domain::{
    Diagnosis, EngineConfig, Explanation, KnowledgeBase, PosteriorDistribution, PosteriorEngine,
    Query, Symptom,
};
use infrastructure::{AidConfig, CatalogLoader};

use crate::demographics::{ClampedLabel, Demographics, DemographicsPolicy};
use crate::error::AssessmentError;
use crate::normalize::{NormalizedSymptoms, SymptomNormalizer};

pub const DEFAULT_TOP_N: usize = 10;

/// Raw user input: free-text symptoms and optional demographic labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentRequest {
    pub symptoms: Vec<String>,
    pub age_group: Option<String>,
    pub sex: Option<String>,
}

impl AssessmentRequest {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses a comma-separated line such as `"fever, chest pain"`.
    pub fn from_line(line: &str) -> Self {
        Self::new(SymptomNormalizer::split_line(line))
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = Some(age_group.into());
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDiagnosis {
    pub rank: usize,
    pub diagnosis: String,
    pub probability: f64,
}

/// Everything a front end needs to report one inference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub used: Vec<Symptom>,
    pub ignored: Vec<String>,
    pub age_group: String,
    pub sex: String,
    pub clamped: Vec<ClampedLabel>,
    /// No symptom was recognized; the result reflects priors and modifiers alone.
    pub priors_only: bool,
    pub config: EngineConfig,
    pub distribution: PosteriorDistribution,
    pub top: Vec<RankedDiagnosis>,
}

impl Assessment {
    pub fn is_degenerate(&self) -> bool {
        self.distribution.is_degenerate()
    }
}

/// Wires normalization, demographic clamping and the posterior engine together.
///
/// The knowledge base is shared behind an [`Arc`]; the service itself is cheap to
/// clone and can be used from many threads.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    kb: Arc<KnowledgeBase>,
    engine: PosteriorEngine,
    top_n: usize,
    demographics: DemographicsPolicy,
}

struct Prepared {
    query: Query,
    symptoms: NormalizedSymptoms,
    demographics: Demographics,
}

impl AssessmentService {
    pub fn new(kb: Arc<KnowledgeBase>, engine: PosteriorEngine) -> Self {
        Self {
            kb,
            engine,
            top_n: DEFAULT_TOP_N,
            demographics: DemographicsPolicy::default(),
        }
    }

    /// Loads the configured catalog (or the embedded one) and applies the
    /// engine and display settings from `config`.
    pub fn from_config(config: &AidConfig) -> Result<Self> {
        let kb = CatalogLoader::load(config.catalog.as_deref())?;

        Ok(Self::new(Arc::new(kb), PosteriorEngine::new(config.engine))
            .with_top_n(config.top_n)
            .with_demographics(DemographicsPolicy::new(
                config.default_age_group.as_str(),
                config.default_sex.as_str(),
            )))
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_demographics(mut self, policy: DemographicsPolicy) -> Self {
        self.demographics = policy;
        self
    }

    pub fn with_engine(mut self, engine: PosteriorEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn engine(&self) -> &PosteriorEngine {
        &self.engine
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn demographics(&self) -> &DemographicsPolicy {
        &self.demographics
    }

    fn prepare(&self, request: &AssessmentRequest) -> Prepared {
        let symptoms = SymptomNormalizer::normalize(&self.kb, &request.symptoms);
        let demographics = self.demographics.resolve(
            &self.kb,
            request.age_group.as_deref(),
            request.sex.as_deref(),
        );

        if !symptoms.unrecognized.is_empty() {
            tracing::info!(ignored = ?symptoms.unrecognized, "Unrecognized symptoms ignored");
        }

        let query = Query::new(demographics.age_group.as_str(), demographics.sex.as_str())
            .with_symptoms(symptoms.recognized.iter());

        Prepared {
            query,
            symptoms,
            demographics,
        }
    }

    pub fn assess(&self, request: &AssessmentRequest) -> Result<Assessment, AssessmentError> {
        let Prepared {
            query,
            symptoms,
            demographics,
        } = self.prepare(request);

        let distribution = self.engine.infer(&self.kb, &query)?;
        let top = distribution
            .top(self.top_n)
            .into_iter()
            .enumerate()
            .map(|(i, PosteriorEntry { diagnosis, probability })| RankedDiagnosis {
                rank: i + 1,
                diagnosis: diagnosis.clone(),
                probability: *probability,
            })
            .collect();

        Ok(Assessment {
            priors_only: symptoms.is_empty(),
            used: symptoms.recognized,
            ignored: symptoms.unrecognized,
            age_group: demographics.age_group,
            sex: demographics.sex,
            clamped: demographics.clamped,
            config: *self.engine.config(),
            distribution,
            top,
        })
    }

    /// Factor breakdown for one diagnosis, named loosely (see [`Self::find_diagnosis`]).
    pub fn explain(
        &self,
        request: &AssessmentRequest,
        diagnosis: &str,
    ) -> Result<Explanation, AssessmentError> {
        let name = self.find_diagnosis(diagnosis)?.name().to_string();
        let prepared = self.prepare(request);
        Ok(self.engine.explain(&self.kb, &prepared.query, &name)?)
    }

    /// Exact name first, then a case-insensitive match, then a unique
    /// case-insensitive substring.
    pub fn find_diagnosis(&self, name: &str) -> Result<&Diagnosis, AssessmentError> {
        if let Some(d) = self.kb.diagnosis(name) {
            return Ok(d);
        }

        let needle = name.trim().to_lowercase();
        let diagnoses = self.kb.diagnoses();

        if let Some(d) = diagnoses.iter().find(|d| d.name().to_lowercase() == needle) {
            return Ok(d);
        }

        let partial: Vec<&Diagnosis> = diagnoses
            .iter()
            .filter(|d| !needle.is_empty() && d.name().to_lowercase().contains(&needle))
            .collect();

        match partial.as_slice() {
            [only] => Ok(*only),
            [] => Err(AssessmentError::NoSuchDiagnosis(name.to_string())),
            many => Err(AssessmentError::AmbiguousDiagnosis {
                query: name.to_string(),
                candidates: many.iter().map(|d| d.name().to_string()).collect(),
            }),
        }
    }
}
