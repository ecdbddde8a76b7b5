//! Qualification-threshold scaling

/// Ceiling of the qualification scale (CGPA out of 10)
pub const DEFAULT_MAX_QUALIFICATION: f64 = 10.0;

/// Score awarded for exactly meeting the minimum
const BASE_SCORE: f64 = 50.0;

/// Qualification sub-score in [0, 100].
///
/// Falling below `threshold` zeroes the score. Meeting it earns 50, rising
/// linearly to 100 at `max`. A threshold at or above `max` gives any
/// qualifying candidate full credit.
pub fn qualification_score(metric: f64, threshold: f64, max: f64) -> f64 {
    if metric < threshold {
        return 0.0;
    }
    if threshold >= max {
        return 100.0;
    }

    let excellence = (metric - threshold) / (max - threshold) * (100.0 - BASE_SCORE);
    let score = (BASE_SCORE + excellence).min(100.0);
    debug_assert!(
        (0.0..=100.0).contains(&score),
        "qualification score out of range: {}",
        score
    );
    score
}
