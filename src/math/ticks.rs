//! Axis tick placement and labels.

/// `count` evenly spaced values from `min` to `max` inclusive.
///
/// `count == 1` yields `[min]`; `count == 0` yields nothing.
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => (0..count)
            .map(|k| {
                let t = k as f64 / (count - 1) as f64;
                // Interpolate instead of `min + step * k`: `max - min` can overflow.
                min * (1.0 - t) + max * t
            })
            .collect(),
    }
}

/// Tick label with two decimals (`%.02f`).
pub fn format_tick(v: f64) -> String {
    format!("{v:.2}")
}
