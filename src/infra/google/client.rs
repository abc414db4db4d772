use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use super::types::{AutocompleteResponse, DetailsResponse, NearbyResponse, STATUS_OK};
use crate::fetch::{HttpClient, fetch_json};
use crate::services::place_data::{
    Coordinate, PlaceCategory, PlaceDataProvider, RawPlaceResult, Suggestion,
};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

pub struct GooglePlacesClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> GooglePlacesClient<C> {
    /// `http` is expected to inject the API key (see [`crate::fetch::auth::UrlParam`]).
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&raw, params)
            .with_context(|| format!("Invalid Places endpoint URL '{raw}'"))
    }
}

#[async_trait]
impl<C: HttpClient> PlaceDataProvider for GooglePlacesClient<C> {
    #[tracing::instrument(skip(self))]
    async fn autocomplete(&self, text: &str) -> Result<Vec<Suggestion>> {
        let url = self.endpoint("autocomplete/json", &[("input", text)])?;
        let response: AutocompleteResponse = fetch_json(&self.http, url)
            .await
            .context("Autocomplete request failed")?;

        if response.status != STATUS_OK {
            debug!(status = %response.status, "Autocomplete returned no usable predictions");
            return Ok(Vec::new());
        }

        Ok(response
            .predictions
            .into_iter()
            .map(|p| Suggestion {
                description: p.description,
                place_id: p.place_id,
            })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<Option<Coordinate>> {
        let url = self.endpoint(
            "details/json",
            &[("place_id", place_id), ("fields", "geometry")],
        )?;
        let response: DetailsResponse = fetch_json(&self.http, url)
            .await
            .context("Place details request failed")?;

        if response.status != STATUS_OK {
            debug!(status = %response.status, "Place details returned no result");
            return Ok(None);
        }

        let Some(result) = response.result else {
            return Ok(None);
        };
        let location = result.geometry.location;

        match Coordinate::new(location.lat, location.lng) {
            Ok(coordinate) => Ok(Some(coordinate)),
            Err(e) => {
                warn!(error = %e, "Provider returned an unusable coordinate");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip_all, fields(coordinate = %coordinate, radius_meters = radius_meters, category = %category))]
    async fn nearby_search(
        &self,
        coordinate: Coordinate,
        radius_meters: f64,
        category: PlaceCategory,
    ) -> Result<Vec<RawPlaceResult>> {
        let location = coordinate.to_string();
        let radius = radius_meters.to_string();
        let url = self.endpoint(
            "nearbysearch/json",
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category.as_str()),
            ],
        )?;
        let response: NearbyResponse = fetch_json(&self.http, url)
            .await
            .with_context(|| format!("Nearby search for '{category}' failed"))?;

        if response.status != STATUS_OK {
            debug!(status = %response.status, "Nearby search returned no usable results");
            return Ok(Vec::new());
        }

        Ok(response
            .results
            .into_iter()
            .map(|r| RawPlaceResult {
                is_open_now: r.opening_hours.and_then(|h| h.open_now),
                user_ratings_count: r.user_ratings_total,
            })
            .collect())
    }
}
