//! Piecewise score normalization.
//!
//! Raw decision scores are signed: negative means the row fell on the
//! outlier side of the calibrated threshold. This module remaps them
//! into a [0, 1] anomaly likelihood where 1.0 is the most anomalous
//! training-set score, 0.5 the decision boundary, and 0.0 the most
//! confidently normal score.

/// Midpoint fallback for a degenerate (zero-spread) anomalous subset.
const DEGENERATE_ANOMALOUS: f64 = 0.75;
/// Midpoint fallback for a degenerate normal subset.
const DEGENERATE_NORMAL: f64 = 0.25;

/// Normalize raw decision scores into [0, 1] likelihoods.
///
/// Scores below zero are remapped linearly from `[min, max]` onto
/// `[1.0, 0.5]`; scores at or above zero from `[min, max]` onto
/// `[0.5, 0.0]`. Index positions are preserved, so the output aligns
/// with the input row for row.
///
/// A subset whose scores are all identical has no spread to interpolate
/// over; its members map to the midpoint of the subset's output
/// interval instead (0.75 anomalous, 0.25 normal). An empty subset
/// contributes nothing. The result never contains NaN.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    let mut likelihoods = vec![0.0; scores.len()];

    remap_subset(scores, &mut likelihoods, |s| s < 0.0, 1.0, 0.5, DEGENERATE_ANOMALOUS);
    remap_subset(scores, &mut likelihoods, |s| s >= 0.0, 0.5, 0.0, DEGENERATE_NORMAL);

    likelihoods
}

/// Linearly remap the scores selected by `side` from their own
/// [min, max] onto [lo_target, hi_target], writing results back at the
/// original index positions.
fn remap_subset(
    scores: &[f64],
    out: &mut [f64],
    side: impl Fn(f64) -> bool,
    lo_target: f64,
    hi_target: f64,
    degenerate: f64,
) {
    let subset: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, s)| side(s))
        .collect();

    if subset.is_empty() {
        return;
    }

    let min = subset.iter().map(|&(_, s)| s).fold(f64::INFINITY, f64::min);
    let max = subset
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        // Zero spread: interpolation would divide by zero
        for &(i, _) in &subset {
            out[i] = degenerate;
        }
        return;
    }

    for &(i, s) in &subset {
        let fraction = (s - min) / (max - min);
        out[i] = lo_target + fraction * (hi_target - lo_target);
    }
}
