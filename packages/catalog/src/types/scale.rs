use std::collections::BTreeMap;

/// Fallback P(symptom | diagnosis) for symptoms a diagnosis does not document.
pub const DEFAULT_LIKELIHOOD: f64 = 0.01;

pub fn default_likelihood() -> f64 {
    DEFAULT_LIKELIHOOD
}

/// The four-label qualitative scale shared by every diagnosis.
pub fn standard_scale() -> BTreeMap<String, f64> {
    [
        ("always", 0.9),
        ("usually", 0.7),
        ("sometimes", 0.5),
        ("might", 0.3),
    ]
    .into_iter()
    .map(|(label, p)| (label.to_string(), p))
    .collect()
}
