//! Google Places web-service implementation of [`PlaceDataProvider`].
//!
//! [`PlaceDataProvider`]: crate::services::place_data::PlaceDataProvider

pub mod client;
mod types;

pub use client::GooglePlacesClient;
