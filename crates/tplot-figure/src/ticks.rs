//! Tick selection for numerical axes

/// Pick evenly spaced "nice" tick values covering `[min, max]`
///
/// The step is 1, 2, 5 or 10 times a power of ten, chosen as the smallest
/// such step that yields at most roughly `most` intervals. The first tick is
/// at or below `min` and the last at or above `max`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn best_ticks(min: f64, max: f64, most: usize) -> Vec<f64> {
    let (low, high) = if min < max { (min, max) } else { (max, min) };
    let (low, high) = if high > low {
        (low, high)
    } else {
        let pad = (low.abs() * f64::EPSILON).max(1.0);
        ((low - pad).max(f64::MIN), (high + pad).min(f64::MAX))
    };

    // Halved so that spans wider than f64::MAX stay finite
    let half_span = high / 2.0 - low / 2.0;
    let min_step = (half_span / most.max(1) as f64 * 2.0).min(f64::MAX);
    let magnitude = 10f64.powf(min_step.log10().floor());
    let residual = min_step / magnitude;
    let step = if residual > 5.0 {
        10.0 * magnitude
    } else if residual > 2.0 {
        5.0 * magnitude
    } else if residual > 1.0 {
        2.0 * magnitude
    } else {
        magnitude
    }
    .min(f64::MAX);

    let first = (low / step).floor() as i64;
    let last = (high / step).ceil() as i64;

    (first..=last)
        .map(|k| (k as f64 * step).clamp(f64::MIN, f64::MAX))
        .collect()
}
