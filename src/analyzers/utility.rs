/// Rounds `value` to `places` decimal places, exact ties going to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Shortest round-trip decimal text, always keeping at least one fractional
/// digit (`0.0`, `0.02`, `1.5`).
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
