//! Output formatting and persistence for place analyses.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::analyzer::PlaceAnalysis;
use crate::analyzers::types::RiskLevel;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row: the assessment plus every metric it was derived from.
#[derive(Debug, Serialize)]
pub struct AssessmentRecord {
    pub timestamp: DateTime<Utc>,
    pub place_id: String,
    pub time_segment: String,
    pub score: f64,
    pub level: RiskLevel,
    pub police_count: u32,
    pub hospital_count: u32,
    pub total_places: u32,
    pub open_now_count: u32,
    pub high_engagement_count: u32,
    pub activity_density: f64,
    pub reasoning: String,
}

impl AssessmentRecord {
    pub fn from_analysis(analysis: &PlaceAnalysis) -> Self {
        let m = &analysis.metrics;
        AssessmentRecord {
            timestamp: Utc::now(),
            place_id: analysis.place_id.clone(),
            time_segment: analysis.time_segment.label().to_string(),
            score: analysis.assessment.score,
            level: analysis.assessment.level,
            police_count: m.police_count,
            hospital_count: m.hospital_count,
            total_places: m.total_places,
            open_now_count: m.open_now_count,
            high_engagement_count: m.high_engagement_count,
            activity_density: m.activity_density,
            reasoning: analysis.assessment.reasoning.clone(),
        }
    }
}

/// Logs an analysis using Rust's debug pretty-print format.
pub fn print_pretty(analysis: &PlaceAnalysis) {
    debug!("{:#?}", analysis);
}

/// Logs a serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends an [`AssessmentRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &AssessmentRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
