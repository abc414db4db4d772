use crate::analyzers::grade::grade;
use crate::analyzers::time_segment::TimeSegment;
use crate::analyzers::types::{MetricsRecord, SafetyAssessment};
use crate::analyzers::utility::{format_decimal, round_to};

/// Per-unit contribution of each metric to the raw score.
const POLICE_WEIGHT: f64 = 5.0;
const HOSPITAL_WEIGHT: f64 = 3.0;
const OPEN_NOW_WEIGHT: f64 = 2.0;
const ACTIVITY_DENSITY_WEIGHT: f64 = 100.0;
const HIGH_ENGAGEMENT_WEIGHT: f64 = 2.0;

/// No place is reported as fully safe.
pub const SCORE_CEILING: f64 = 95.0;

/// Scores `metrics` for `segment`.
///
/// The weighted sum is scaled by the segment multiplier and capped at
/// [`SCORE_CEILING`]. The level is graded on the capped value; only the
/// reported score is rounded to two decimals.
pub fn score(metrics: &MetricsRecord, segment: TimeSegment) -> SafetyAssessment {
    let raw = f64::from(metrics.police_count) * POLICE_WEIGHT
        + f64::from(metrics.hospital_count) * HOSPITAL_WEIGHT
        + f64::from(metrics.open_now_count) * OPEN_NOW_WEIGHT
        + metrics.activity_density * ACTIVITY_DENSITY_WEIGHT
        + f64::from(metrics.high_engagement_count) * HIGH_ENGAGEMENT_WEIGHT;

    let capped = (raw * segment.multiplier()).min(SCORE_CEILING);

    SafetyAssessment {
        score: round_to(capped, 2),
        level: grade(capped),
        reasoning: reasoning(metrics),
    }
}

/// Fixed-order summary of the inputs. Consumers parse this text, so the
/// labels are kept as published even though the engagement threshold is
/// [`HIGH_ENGAGEMENT_THRESHOLD`](crate::analyzers::types::HIGH_ENGAGEMENT_THRESHOLD).
pub fn reasoning(metrics: &MetricsRecord) -> String {
    format!(
        "Police: {}, Hospitals: {}, Open Businesses: {}, Activity Density: {}, \
         Highly Rated Places (>1000 reviews): {}",
        metrics.police_count,
        metrics.hospital_count,
        metrics.open_now_count,
        format_decimal(round_to(metrics.activity_density, 3)),
        metrics.high_engagement_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::RiskLevel;

    fn sample() -> MetricsRecord {
        MetricsRecord {
            police_count: 2,
            hospital_count: 1,
            total_places: 20,
            open_now_count: 10,
            high_engagement_count: 5,
            activity_density: 0.02,
        }
    }

    #[test]
    fn test_evening_is_unscaled() {
        let a = score(&sample(), TimeSegment::Evening);
        assert_eq!(a.score, 45.0);
        assert_eq!(a.level, RiskLevel::Moderate);
    }

    #[test]
    fn test_after_midnight_scales_down() {
        let a = score(&sample(), TimeSegment::AfterMidnight);
        assert_eq!(a.score, 31.5);
        assert_eq!(a.level, RiskLevel::Risky);
    }

    #[test]
    fn test_night_and_early_morning() {
        assert_eq!(score(&sample(), TimeSegment::Night).score, 40.5);
        assert_eq!(score(&sample(), TimeSegment::EarlyMorning).score, 38.25);
    }

    #[test]
    fn test_unspecified_segment_is_identity() {
        let a = score(&sample(), TimeSegment::from_label("Midday"));
        assert_eq!(a.score, 45.0);
    }

    #[test]
    fn test_all_zero_metrics() {
        let a = score(&MetricsRecord::default(), TimeSegment::Night);
        assert_eq!(a.score, 0.0);
        assert_eq!(a.level, RiskLevel::Risky);
        assert_eq!(
            a.reasoning,
            "Police: 0, Hospitals: 0, Open Businesses: 0, Activity Density: 0.0, \
             Highly Rated Places (>1000 reviews): 0"
        );
    }

    #[test]
    fn test_ceiling_applies_for_every_segment() {
        // raw = 40 * 5 = 200
        let metrics = MetricsRecord {
            police_count: 40,
            total_places: 40,
            ..Default::default()
        };

        for segment in TimeSegment::ALL {
            let a = score(&metrics, segment);
            assert_eq!(a.score, SCORE_CEILING);
            assert_eq!(a.level, RiskLevel::Safe);
        }
    }

    #[test]
    fn test_level_uses_unrounded_score() {
        // 64.996 reports as 65.0 but is still below the Safe threshold
        let metrics = MetricsRecord {
            activity_density: 0.64996,
            ..Default::default()
        };

        let a = score(&metrics, TimeSegment::Evening);

        assert_eq!(a.score, 65.0);
        assert_eq!(a.level, RiskLevel::Moderate);
    }

    #[test]
    fn test_reasoning_density_ties_round_to_even() {
        let metrics = MetricsRecord {
            total_places: 1,
            activity_density: 1.0 / 16.0,
            ..Default::default()
        };
        assert!(reasoning(&metrics).contains("Activity Density: 0.062,"));
    }

    #[test]
    fn test_reasoning_format() {
        assert_eq!(
            reasoning(&sample()),
            "Police: 2, Hospitals: 1, Open Businesses: 10, Activity Density: 0.02, \
             Highly Rated Places (>1000 reviews): 5"
        );
    }

    #[test]
    fn test_reasoning_rounds_density_to_three_places() {
        let metrics = MetricsRecord {
            total_places: 7,
            activity_density: 7.0 / 3000.0,
            ..Default::default()
        };
        assert!(reasoning(&metrics).contains("Activity Density: 0.002,"));
    }

    #[test]
    fn test_score_is_deterministic() {
        let first = score(&sample(), TimeSegment::Night);
        let second = score(&sample(), TimeSegment::Night);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(first, second);
    }
}
