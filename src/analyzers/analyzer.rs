use tracing::info;

use crate::analyzers::aggregate::MetricsAggregator;
use crate::analyzers::score::score;
use crate::analyzers::time_segment::TimeSegment;
use crate::analyzers::types::{MetricsRecord, SafetyAssessment};
use crate::error::AnalysisError;
use crate::services::place_data::PlaceDataProvider;

/// Metrics gathered for a place together with the assessment derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceAnalysis {
    pub place_id: String,
    pub time_segment: TimeSegment,
    pub metrics: MetricsRecord,
    pub assessment: SafetyAssessment,
}

/// Resolves `place_id`, aggregates its surroundings and scores them for `segment`.
///
/// # Errors
///
/// [`AnalysisError::NotFound`] when the place has no coordinate, or
/// [`AnalysisError::InvalidRadius`] when the aggregator is misconfigured.
#[tracing::instrument(skip(aggregator, segment), fields(segment = %segment))]
pub async fn analyze_place<P: PlaceDataProvider>(
    aggregator: &MetricsAggregator<P>,
    place_id: &str,
    segment: TimeSegment,
) -> Result<PlaceAnalysis, AnalysisError> {
    let metrics = aggregator.fetch_and_aggregate(place_id).await?;
    let assessment = score(&metrics, segment);

    info!(score = assessment.score, level = %assessment.level, "Place analyzed");

    Ok(PlaceAnalysis {
        place_id: place_id.to_string(),
        time_segment: segment,
        metrics,
        assessment,
    })
}
