//! Recommendation error types

use crate::records::RecordType;

/// Errors raised at the recommendation boundary
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// A record type name with no field schema (unknown type or collection)
    #[error("Configuration error: no field schema for record type '{0}'")]
    Configuration(String),
    /// The record source could not deliver records for a type
    #[error("Record source unavailable for {record_type}: {reason}")]
    DependencyUnavailable {
        /// Type whose records were being fetched
        record_type: RecordType,
        /// Underlying failure, rendered for diagnosis
        reason: String,
    },
}

/// Recommendation result type
pub type Result<T> = std::result::Result<T, RecommendError>;
