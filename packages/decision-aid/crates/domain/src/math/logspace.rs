/// Natural log of a probability factor. Zero maps to `-inf`, which keeps
/// "this diagnosis is impossible" exact instead of clamping it to a tiny number.
pub fn ln_factor(p: f64) -> f64 {
    if p <= 0.0 {
        f64::NEG_INFINITY
    } else {
        p.ln()
    }
}

/// Normalizes log-weights with the log-sum-exp trick.
///
/// Returns `None` when every weight is `-inf` (or the slice is empty): that is the
/// log-space form of a zero total and the caller decides the fallback.
pub fn normalize_log_weights(log_weights: &[f64]) -> Option<Vec<f64>> {
    let max = log_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if max == f64::NEG_INFINITY {
        return None;
    }

    // Shift by the max so the largest term is exp(0) = 1 and nothing overflows.
    let shifted: Vec<f64> = log_weights.iter().map(|w| (w - max).exp()).collect();
    let total: f64 = shifted.iter().sum();

    Some(shifted.into_iter().map(|w| w / total).collect())
}
