use crate::analyzers::types::RiskLevel;

/// Converts a safety score (0–95) into a [`RiskLevel`].
///
/// | Range       | Level    |
/// |-------------|----------|
/// | >= 65       | Safe     |
/// | >= 40       | Moderate |
/// | < 40        | Risky    |
pub fn grade(score: f64) -> RiskLevel {
    match score {
        s if s >= 65.0 => RiskLevel::Safe,
        s if s >= 40.0 => RiskLevel::Moderate,
        _ => RiskLevel::Risky,
    }
}
