use futures::future::join_all;
use tracing::{Instrument, debug, info, warn};

use crate::analyzers::types::{CategoryTally, MetricsRecord};
use crate::error::AnalysisError;
use crate::services::place_data::{Coordinate, PlaceCategory, PlaceDataProvider};

pub const DEFAULT_RADIUS_METERS: f64 = 1000.0;

/// Reduces nearby-search results around a coordinate into a [`MetricsRecord`].
///
/// One query is issued per [`PlaceCategory`]; the queries run concurrently and
/// their tallies are summed once every query has finished or failed. A failed
/// category contributes nothing and never aborts the others.
pub struct MetricsAggregator<P> {
    provider: P,
    radius_meters: f64,
}

impl<P: PlaceDataProvider> MetricsAggregator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }

    /// Radius used by [`fetch_and_aggregate`](Self::fetch_and_aggregate).
    pub fn with_radius(mut self, radius_meters: f64) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Queries every category around `coordinate` and reduces the results.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidRadius`] if `radius_meters` is not a positive,
    /// finite number. No provider query is issued in that case.
    #[tracing::instrument(skip(self, coordinate), fields(coordinate = %coordinate))]
    pub async fn aggregate(
        &self,
        coordinate: Coordinate,
        radius_meters: f64,
    ) -> Result<MetricsRecord, AnalysisError> {
        validate_radius(radius_meters)?;

        let queries = PlaceCategory::ALL
            .into_iter()
            .map(|category| self.tally_category(coordinate, radius_meters, category));
        let tally: CategoryTally = join_all(queries).await.into_iter().sum();

        let record = MetricsRecord::from_tally(tally, radius_meters);
        info!(
            total_places = record.total_places,
            police = record.police_count,
            hospitals = record.hospital_count,
            open_now = record.open_now_count,
            high_engagement = record.high_engagement_count,
            activity_density = record.activity_density,
            "Metrics aggregated"
        );

        Ok(record)
    }

    /// Resolves `place_id` to a coordinate.
    ///
    /// Provider failures are logged and reported as [`AnalysisError::NotFound`].
    #[tracing::instrument(skip(self))]
    pub async fn resolve_coordinate(&self, place_id: &str) -> Result<Coordinate, AnalysisError> {
        match self.provider.place_details(place_id).await {
            Ok(Some(coordinate)) => {
                debug!(coordinate = %coordinate, "Place resolved");
                Ok(coordinate)
            }
            Ok(None) => Err(AnalysisError::NotFound(place_id.to_string())),
            Err(e) => {
                warn!(error = %e, "Place details lookup failed");
                Err(AnalysisError::NotFound(place_id.to_string()))
            }
        }
    }

    /// Resolves `place_id` and aggregates around it with the configured radius.
    /// Category queries are only issued once the coordinate is known.
    pub async fn fetch_and_aggregate(&self, place_id: &str) -> Result<MetricsRecord, AnalysisError> {
        let coordinate = self.resolve_coordinate(place_id).await?;
        self.aggregate(coordinate, self.radius_meters).await
    }

    async fn tally_category(
        &self,
        coordinate: Coordinate,
        radius_meters: f64,
        category: PlaceCategory,
    ) -> CategoryTally {
        let span = tracing::info_span!("category_query", category = %category);

        async {
            match self
                .provider
                .nearby_search(coordinate, radius_meters, category)
                .await
            {
                Ok(results) => {
                    debug!(results = results.len(), "Category results received");
                    CategoryTally::from_results(category, &results)
                }
                Err(e) => {
                    warn!(error = %e, "Category query failed, counting it as empty");
                    CategoryTally::default()
                }
            }
        }
        .instrument(span)
        .await
    }
}

fn validate_radius(radius_meters: f64) -> Result<(), AnalysisError> {
    if radius_meters.is_finite() && radius_meters > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidRadius(radius_meters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::place_data::{RawPlaceResult, Suggestion};
    use anyhow::Result;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves fixed results per category; categories in `failing` return `Err`.
    #[derive(Default)]
    struct FakeProvider {
        coordinate: Option<Coordinate>,
        results: HashMap<PlaceCategory, Vec<RawPlaceResult>>,
        failing: Vec<PlaceCategory>,
        calls: Mutex<Vec<PlaceCategory>>,
    }

    #[async_trait::async_trait]
    impl PlaceDataProvider for FakeProvider {
        async fn autocomplete(&self, _text: &str) -> Result<Vec<Suggestion>> {
            Ok(Vec::new())
        }

        async fn place_details(&self, _place_id: &str) -> Result<Option<Coordinate>> {
            Ok(self.coordinate)
        }

        async fn nearby_search(
            &self,
            _coordinate: Coordinate,
            _radius_meters: f64,
            category: PlaceCategory,
        ) -> Result<Vec<RawPlaceResult>> {
            self.calls.lock().unwrap().push(category);
            if self.failing.contains(&category) {
                anyhow::bail!("timed out");
            }
            Ok(self.results.get(&category).cloned().unwrap_or_default())
        }
    }

    fn open(ratings: u32) -> RawPlaceResult {
        RawPlaceResult {
            is_open_now: Some(true),
            user_ratings_count: Some(ratings),
        }
    }

    fn provider() -> FakeProvider {
        let mut results = HashMap::new();
        results.insert(PlaceCategory::Police, vec![open(10), RawPlaceResult::default()]);
        results.insert(PlaceCategory::Hospital, vec![open(500)]);
        results.insert(PlaceCategory::Restaurant, vec![open(150), open(20), open(101)]);
        results.insert(PlaceCategory::Store, vec![RawPlaceResult::default(); 4]);

        FakeProvider {
            coordinate: Some(Coordinate::new(30.34, 76.39).unwrap()),
            results,
            ..Default::default()
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(30.34, 76.39).unwrap()
    }

    #[tokio::test]
    async fn test_aggregate_counts_every_category() {
        let aggregator = MetricsAggregator::new(provider());

        let record = aggregator.aggregate(origin(), 1000.0).await.unwrap();

        assert_eq!(
            record,
            MetricsRecord {
                police_count: 2,
                hospital_count: 1,
                total_places: 10,
                open_now_count: 5,
                high_engagement_count: 3,
                activity_density: 0.01,
            }
        );
        assert_eq!(aggregator.provider().calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_category_contributes_nothing() {
        let mut p = provider();
        p.failing = vec![PlaceCategory::Restaurant];
        let aggregator = MetricsAggregator::new(p);

        let record = aggregator.aggregate(origin(), 1000.0).await.unwrap();

        assert_eq!(record.total_places, 7);
        assert_eq!(record.police_count, 2);
        assert_eq!(record.open_now_count, 2);
        assert_eq!(record.high_engagement_count, 1);
        assert_eq!(aggregator.provider().calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_all_categories_failing_yields_zero_record() {
        let mut p = provider();
        p.failing = PlaceCategory::ALL.to_vec();
        let aggregator = MetricsAggregator::new(p);

        let record = aggregator.aggregate(origin(), 1000.0).await.unwrap();

        assert_eq!(record, MetricsRecord::default());
    }

    #[tokio::test]
    async fn test_invalid_radius_rejected_before_queries() {
        let aggregator = MetricsAggregator::new(provider());

        for radius in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = aggregator.aggregate(origin(), radius).await.unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidRadius(_)));
        }
        assert!(aggregator.provider().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_density_uses_radius() {
        let aggregator = MetricsAggregator::new(provider());

        let record = aggregator.aggregate(origin(), 500.0).await.unwrap();

        assert_eq!(record.activity_density, 10.0 / 500.0);
    }

    #[tokio::test]
    async fn test_fetch_and_aggregate_uses_configured_radius() {
        let aggregator = MetricsAggregator::new(provider()).with_radius(2000.0);

        let record = aggregator.fetch_and_aggregate("place").await.unwrap();

        assert_eq!(record.activity_density, 10.0 / 2000.0);
    }

    #[tokio::test]
    async fn test_unknown_place_short_circuits() {
        let mut p = provider();
        p.coordinate = None;
        let aggregator = MetricsAggregator::new(p);

        let err = aggregator.fetch_and_aggregate("nowhere").await.unwrap_err();

        assert_eq!(err, AnalysisError::NotFound("nowhere".to_string()));
        assert!(aggregator.provider().calls.lock().unwrap().is_empty());
    }
}
