//! Trait and types for interacting with a place-search provider.

use crate::error::AnalysisError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, AnalysisError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(AnalysisError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// The closed set of place kinds queried when gathering metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    Police,
    Hospital,
    Restaurant,
    Store,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 4] = [
        PlaceCategory::Police,
        PlaceCategory::Hospital,
        PlaceCategory::Restaurant,
        PlaceCategory::Store,
    ];

    /// Provider-side `type` filter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Police => "police",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Store => "store",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point of interest returned by a nearby search.
///
/// Missing fields mean "unknown" and count as `false` / `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlaceResult {
    pub is_open_now: Option<bool>,
    pub user_ratings_count: Option<u32>,
}

/// An autocomplete prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub description: String,
    pub place_id: String,
}

/// Abstraction over a place-search provider (e.g., Google Places).
///
/// Implementations return empty results for provider-level non-success
/// statuses; `Err` is reserved for transport and decoding failures.
#[async_trait::async_trait]
pub trait PlaceDataProvider: Send + Sync {
    /// Returns predictions matching `text`.
    async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>>;

    /// Resolves `place_id` to its coordinate, or `None` if the provider has none.
    async fn place_details(&self, place_id: &str) -> Result<Option<Coordinate>>;

    /// Returns places of `category` within `radius_meters` of `coordinate`.
    async fn nearby_search(
        &self,
        coordinate: Coordinate,
        radius_meters: f64,
        category: PlaceCategory,
    ) -> Result<Vec<RawPlaceResult>>;
}
