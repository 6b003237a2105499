pub mod assessment_service;
pub mod demographics;
pub mod error;
pub mod normalize;

pub use assessment_service::{Assessment, AssessmentRequest, AssessmentService, RankedDiagnosis};
pub use demographics::{ClampedLabel, Demographics, DemographicsPolicy, LabelKind};
pub use error::AssessmentError;
pub use normalize::{NormalizedSymptoms, SymptomNormalizer};
