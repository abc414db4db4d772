//! Wire shapes for the subset of the Places responses we read.

use serde::Deserialize;

/// Every Places response carries a `status`; only `"OK"` has usable data.
pub(crate) const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
pub(crate) struct AutocompleteResponse {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Prediction {
    pub(crate) description: String,
    pub(crate) place_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub(crate) status: String,
    pub(crate) result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResult {
    pub(crate) geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub(crate) location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyResponse {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyResult {
    pub(crate) opening_hours: Option<OpeningHours>,
    pub(crate) user_ratings_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpeningHours {
    pub(crate) open_now: Option<bool>,
}
