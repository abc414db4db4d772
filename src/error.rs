//! Typed failures that callers of the analysis pipeline branch on.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// The search radius was zero, negative, or not a finite number.
    #[error("search radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),

    #[error("coordinate ({lat}, {lng}) is outside the valid latitude/longitude range")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// The place id could not be resolved to a coordinate.
    #[error("no coordinate found for place '{0}'")]
    NotFound(String),
}
