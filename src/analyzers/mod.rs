//! Place metrics aggregation and safety scoring.
//!
//! Nearby-search results are reduced into a fixed [`MetricsRecord`], which is
//! then weighted, adjusted for the time of day and graded into a
//! [`SafetyAssessment`].
//!
//! [`MetricsRecord`]: types::MetricsRecord
//! [`SafetyAssessment`]: types::SafetyAssessment

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod score;
pub mod time_segment;
pub mod types;
pub mod utility;
