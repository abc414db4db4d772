//! Data types used by the metrics and scoring pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

use crate::services::place_data::{PlaceCategory, RawPlaceResult};

/// A place with strictly more ratings than this counts as high-engagement.
pub const HIGH_ENGAGEMENT_THRESHOLD: u32 = 100;

/// Counters gathered from one or more category queries.
///
/// Tallies are built independently per category and summed, so the order in
/// which categories complete never affects the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub police_count: u32,
    pub hospital_count: u32,
    pub total_places: u32,
    pub open_now_count: u32,
    pub high_engagement_count: u32,
}

impl CategoryTally {
    pub fn from_results(category: PlaceCategory, results: &[RawPlaceResult]) -> Self {
        let mut t = CategoryTally::default();

        for r in results {
            t.total_places += 1;

            // Restaurants and stores only feed the shared counters.
            match category {
                PlaceCategory::Police => t.police_count += 1,
                PlaceCategory::Hospital => t.hospital_count += 1,
                PlaceCategory::Restaurant | PlaceCategory::Store => {}
            }

            if r.is_open_now.unwrap_or(false) {
                t.open_now_count += 1;
            }

            if r.user_ratings_count.unwrap_or(0) > HIGH_ENGAGEMENT_THRESHOLD {
                t.high_engagement_count += 1;
            }
        }

        t
    }

    pub fn merge(self, other: CategoryTally) -> Self {
        CategoryTally {
            police_count: self.police_count + other.police_count,
            hospital_count: self.hospital_count + other.hospital_count,
            total_places: self.total_places + other.total_places,
            open_now_count: self.open_now_count + other.open_now_count,
            high_engagement_count: self.high_engagement_count + other.high_engagement_count,
        }
    }
}

impl Sum for CategoryTally {
    fn sum<I: Iterator<Item = CategoryTally>>(iter: I) -> Self {
        iter.fold(CategoryTally::default(), CategoryTally::merge)
    }
}

/// Fixed-shape aggregate of everything found around a coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub police_count: u32,
    pub hospital_count: u32,
    pub total_places: u32,
    pub open_now_count: u32,
    pub high_engagement_count: u32,
    /// `total_places / radius_meters`.
    pub activity_density: f64,
}

impl MetricsRecord {
    /// Finalizes a tally. `radius_meters` must already be validated as positive.
    pub(crate) fn from_tally(tally: CategoryTally, radius_meters: f64) -> Self {
        MetricsRecord {
            police_count: tally.police_count,
            hospital_count: tally.hospital_count,
            total_places: tally.total_places,
            open_now_count: tally.open_now_count,
            high_engagement_count: tally.high_engagement_count,
            activity_density: f64::from(tally.total_places) / radius_meters,
        }
    }
}

/// Discrete risk bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Moderate,
    Risky,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Risky => "Risky",
        })
    }
}

/// Scored result returned to callers, serialized as `{score, level, reasoning}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub score: f64,
    pub level: RiskLevel,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(open: Option<bool>, ratings: Option<u32>) -> RawPlaceResult {
        RawPlaceResult {
            is_open_now: open,
            user_ratings_count: ratings,
        }
    }

    #[test]
    fn test_tally_routes_dedicated_counters() {
        let results = vec![place(None, None), place(None, None)];

        let police = CategoryTally::from_results(PlaceCategory::Police, &results);
        let hospital = CategoryTally::from_results(PlaceCategory::Hospital, &results);
        let store = CategoryTally::from_results(PlaceCategory::Store, &results);

        assert_eq!(police.police_count, 2);
        assert_eq!(police.hospital_count, 0);
        assert_eq!(hospital.hospital_count, 2);
        assert_eq!(store.police_count + store.hospital_count, 0);
        assert_eq!(store.total_places, 2);
    }

    #[test]
    fn test_tally_engagement_threshold_is_exclusive() {
        let results = vec![
            place(None, Some(100)),
            place(None, Some(101)),
            place(None, Some(5000)),
        ];

        let t = CategoryTally::from_results(PlaceCategory::Restaurant, &results);

        assert_eq!(t.high_engagement_count, 2);
    }

    #[test]
    fn test_tally_unknown_open_state_is_closed() {
        let results = vec![
            place(Some(true), None),
            place(Some(false), None),
            place(None, None),
        ];

        let t = CategoryTally::from_results(PlaceCategory::Store, &results);

        assert_eq!(t.open_now_count, 1);
        assert_eq!(t.total_places, 3);
    }

    #[test]
    fn test_sum_is_order_independent() {
        let a = CategoryTally::from_results(PlaceCategory::Police, &[place(Some(true), Some(300))]);
        let b = CategoryTally::from_results(PlaceCategory::Hospital, &vec![place(None, None); 3]);
        let c = CategoryTally::from_results(PlaceCategory::Store, &vec![place(Some(true), None); 2]);

        let forward: CategoryTally = [a, b, c].into_iter().sum();
        let backward: CategoryTally = [c, b, a].into_iter().sum();

        assert_eq!(forward, backward);
        assert_eq!(forward.total_places, 6);
        assert_eq!(forward.open_now_count, 3);
    }

    #[test]
    fn test_record_density() {
        let tally = CategoryTally {
            total_places: 20,
            ..Default::default()
        };

        let record = MetricsRecord::from_tally(tally, 1000.0);

        assert_eq!(record.activity_density, 0.02);
    }

    #[test]
    fn test_assessment_json_shape() {
        let assessment = SafetyAssessment {
            score: 45.0,
            level: RiskLevel::Moderate,
            reasoning: "r".to_string(),
        };

        let json = serde_json::to_value(&assessment).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "score": 45.0, "level": "Moderate", "reasoning": "r" })
        );
    }
}
