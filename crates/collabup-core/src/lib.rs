//! # CollabUp Core
//!
//! Recommendation engine for the CollabUp collaboration platform. Matches a
//! free-text query against four kinds of records:
//!
//! - **Student projects** looking for collaborators
//! - **Startup projects** and openings
//! - **Mentor profiles** from industry
//! - **Research projects** run by faculty
//!
//! ## Pipeline
//!
//! 1. **Tokenize**: lower-case, split on commas, semicolons and whitespace,
//!    drop single-character tokens
//! 2. **Categorize**: bucket each term (skills, domains, roles, locations, ...)
//!    by keyword affinity, falling back to `general`
//! 3. **Score**: best weighted fuzzy match of each term over a record's
//!    searchable fields, boosted when the term's category suits the record type
//! 4. **Rank**: drop weak matches, sort best first (stable) and keep the top N
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use collabup_core::{Query, Recommender, RecordType, Storage};
//! use serde_json::json;
//!
//! let storage = Storage::new(None)?;
//! storage.insert_record(
//!     RecordType::StartupProjects,
//!     None,
//!     json!({"name": "AgriSense", "location": "Bangalore", "domain": "Agritech"}),
//! )?;
//!
//! let result = Recommender::default().recommend(&Query::new("agritech, bangalore", 5), &storage)?;
//! for hit in &result.startup_projects {
//!     println!("{} {:.3}", hit.record.id, hit.similarity_score);
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod error;
pub mod fuzzy;
pub mod query;
pub mod ranking;
pub mod records;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use error::{RecommendError, Result};

// Query parsing
pub use query::{categorize, parse_query, tokenize, CategorizedTerms, Category};

// Similarity
pub use fuzzy::similarity;

// Records
pub use records::{
    extract_fields, field_schema, score_term, FieldEntry, FieldKind, FieldSpec, Record,
    RecordBatch, RecordSource, RecordType,
};

// Ranking
pub use ranking::{
    Query, RankingConfig, Ranker, RecommendationResult, Recommender, ScoredRecord, DEFAULT_TOP_N,
};

// Storage layer
pub use storage::{CollectionHealth, CollectionInfo, CollectionStatus, Storage, StorageError};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        parse_query, Query, RankingConfig, RecommendError, RecommendationResult, Recommender,
        Record, RecordSource, RecordType, ScoredRecord, Storage, StorageError,
    };
}
