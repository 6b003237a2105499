use application::{AssessmentError, AssessmentRequest, AssessmentService, LabelKind};
use domain::inference::FactorSource;
use domain::{Diagnosis, EngineConfig, KnowledgeBase, ModifierTable, PosteriorEngine, ZeroTotalPolicy};
use infrastructure::AidConfig;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

fn service() -> AssessmentService {
    let kb = KnowledgeBase::builder()
        .symptom_group("General", ["fever", "fatigue"])
        .symptom_group("Respiratory", ["cough", "shortness_of_breath"])
        .diagnosis(
            Diagnosis::new("Influenza", 0.2)
                .with_likelihood("fever", "usually")
                .with_likelihood("cough", "usually")
                .with_likelihood("fatigue", "always"),
        )
        .diagnosis(
            Diagnosis::new("Pneumonia", 0.1)
                .with_likelihood("fever", "usually")
                .with_likelihood("cough", "always")
                .with_likelihood("shortness_of_breath", "usually"),
        )
        .diagnosis(Diagnosis::new("Pneumothorax", 0.05).with_likelihood("shortness_of_breath", "always"))
        .modifiers(
            ModifierTable::new()
                .with_age("adult", 1.0)
                .with_age("unspecified", 1.0)
                .with_sex("female", 1.0)
                .with_sex("male", 1.0)
                .with_sex("unspecified", 1.0),
        )
        .build()
        .unwrap();

    AssessmentService::new(Arc::new(kb), PosteriorEngine::default())
}

#[test]
fn test_assessment_reports_inputs() {
    let request = AssessmentRequest::from_line("Fever, cough, sneezing, fever")
        .with_age_group("toddler")
        .with_sex("Female");
    let assessment = service().assess(&request).unwrap();

    let used: Vec<_> = assessment.used.iter().map(|s| s.as_str()).collect();
    assert_eq!(used, vec!["fever", "cough"]);
    assert_eq!(assessment.ignored, vec!["sneezing"]);
    assert_eq!(assessment.age_group, "unspecified");
    assert_eq!(assessment.sex, "female");
    assert_eq!(assessment.clamped.len(), 1);
    assert_eq!(assessment.clamped[0].kind, LabelKind::AgeGroup);
    assert_eq!(assessment.clamped[0].given, "toddler");
    assert!(!assessment.priors_only);
    assert!(!assessment.is_degenerate());
    assert!((assessment.distribution.total() - 1.0).abs() < 1e-9);
}

#[test]
fn test_top_ranking_is_truncated_and_numbered() {
    let service = service().with_top_n(2);
    let assessment = service
        .assess(&AssessmentRequest::new(["cough", "shortness of breath"]))
        .unwrap();

    assert_eq!(assessment.top.len(), 2);
    assert_eq!(assessment.top[0].rank, 1);
    assert_eq!(assessment.top[0].diagnosis, "Pneumonia");
    assert_eq!(assessment.top[1].rank, 2);
    assert!(assessment.top[0].probability >= assessment.top[1].probability);
    assert_eq!(assessment.distribution.len(), 3);
}

#[test]
fn test_no_recognized_symptoms_is_priors_only() {
    let assessment = service()
        .assess(&AssessmentRequest::from_line("headache, , sneezing"))
        .unwrap();

    assert!(assessment.priors_only);
    assert!(assessment.used.is_empty());
    assert_eq!(assessment.ignored, vec!["headache", "sneezing"]);
    assert!((assessment.distribution.total() - 1.0).abs() < 1e-9);
}

#[test]
fn test_zero_total_policy_flows_through() {
    let kb = KnowledgeBase::builder()
        .symptoms(["x"])
        .diagnosis(Diagnosis::new("A", 0.4).with_likelihood("x", 0.0))
        .diagnosis(Diagnosis::new("B", 0.6).with_likelihood("x", 0.0))
        .build()
        .unwrap();
    let engine = PosteriorEngine::new(
        EngineConfig::default().with_zero_total(ZeroTotalPolicy::FallBackToPriors),
    );
    let service = AssessmentService::new(Arc::new(kb), engine);

    let assessment = service.assess(&AssessmentRequest::new(["x"])).unwrap();
    assert!(assessment.is_degenerate());
    assert_eq!(assessment.distribution.get("B"), Some(0.6));
    assert_eq!(assessment.config.zero_total, ZeroTotalPolicy::FallBackToPriors);
}

#[test]
fn test_find_diagnosis_is_forgiving() {
    let service = service();
    assert_eq!(service.find_diagnosis("Influenza").unwrap().name(), "Influenza");
    assert_eq!(service.find_diagnosis("influenza").unwrap().name(), "Influenza");
    assert_eq!(service.find_diagnosis("thorax").unwrap().name(), "Pneumothorax");

    assert_eq!(
        service.find_diagnosis("pneumo").unwrap_err(),
        AssessmentError::AmbiguousDiagnosis {
            query: "pneumo".into(),
            candidates: vec!["Pneumonia".into(), "Pneumothorax".into()],
        }
    );
    assert_eq!(
        service.find_diagnosis("gout").unwrap_err(),
        AssessmentError::NoSuchDiagnosis("gout".into())
    );
}

#[test]
fn test_explain_uses_normalized_request() {
    let explanation = service()
        .explain(&AssessmentRequest::new(["Fever"]), "influenza")
        .unwrap();

    assert_eq!(explanation.diagnosis, "Influenza");
    assert!(explanation.factors.iter().any(|f| matches!(
        &f.source,
        FactorSource::Present { symptom, documented: true } if symptom.as_str() == "fever"
    )));
    // prior, age, sex, then one term per universe symptom
    assert_eq!(explanation.factors.len(), 3 + 4);
}

#[test]
fn test_service_from_default_config() {
    let service = AssessmentService::from_config(&AidConfig::default()).unwrap();
    assert_eq!(service.top_n(), 10);
    assert_eq!(service.knowledge_base().diagnoses().len(), 31);

    let assessment = service
        .assess(
            &AssessmentRequest::new(["chest pain pressure", "shortness_of_breath", "nausea", "jaw-pain"])
                .with_age_group("65_plus")
                .with_sex("male"),
        )
        .unwrap();

    assert!(assessment.ignored.is_empty());
    assert!(assessment.clamped.is_empty());
    assert_eq!(assessment.top.len(), 10);
    assert_eq!(assessment.top[0].diagnosis, "Acute Coronary Syndrome");
}

#[test]
fn test_service_is_shared_across_threads() {
    let service = service();
    let expected = service.assess(&AssessmentRequest::new(["fever"])).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let got = service.assess(&AssessmentRequest::new(["fever"])).unwrap();
                assert_eq!(got, expected);
            });
        }
    });
}

#[test]
fn test_mixed_case_catalog_is_usable() {
    let kb = KnowledgeBase::builder()
        .symptoms(["Fever", "Cough"])
        .diagnosis(Diagnosis::new("Influenza", 0.2).with_likelihood("Fever", 0.9))
        .diagnosis(Diagnosis::new("Bronchitis", 0.2).with_likelihood("Cough", 0.9))
        .modifiers(ModifierTable::new().with_sex("Female", 1.0).with_sex("Male", 1.0))
        .build()
        .unwrap();
    let service = AssessmentService::new(Arc::new(kb), PosteriorEngine::default());

    let assessment = service
        .assess(&AssessmentRequest::new(["Fever"]).with_sex("Female"))
        .unwrap();

    let used: Vec<_> = assessment.used.iter().map(|s| s.as_str()).collect();
    assert_eq!(used, vec!["Fever"]);
    assert!(assessment.ignored.is_empty());
    assert_eq!(assessment.sex, "Female");
    assert!(assessment.clamped.is_empty());
    assert_eq!(assessment.top[0].diagnosis, "Influenza");
}
