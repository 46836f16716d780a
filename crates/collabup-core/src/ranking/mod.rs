//! Ranking
//!
//! Scores records against categorized query terms and keeps the best ones per
//! record type:
//!
//! 1. Each term takes its best weighted field match
//! 2. Terms whose category suits the record type get an affinity boost
//! 3. Term scores are summed; multi-term queries get one extra boost
//! 4. Records at or below the retention threshold are dropped
//! 5. Survivors are sorted by score (stable) and truncated to top-N

mod recommender;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::{CategorizedTerms, Category};
use crate::records::{extract_fields, score_term, Record, RecordType};

pub use recommender::{Query, RecommendationResult, Recommender, DEFAULT_TOP_N};

/// Records must score strictly above this to be returned
pub const DEFAULT_RETENTION_THRESHOLD: f64 = 0.1;
/// Boost for a term whose category suits the record type
pub const DEFAULT_AFFINITY_MULTIPLIER: f64 = 1.2;
/// Boost for queries with more than one term
pub const DEFAULT_MULTI_TERM_MULTIPLIER: f64 = 1.1;

/// (category, record types it is boosted for)
const AFFINITY_PAIRS: &[(Category, &[RecordType])] = &[
    (
        Category::Skills,
        &[RecordType::StudentProjects, RecordType::MentorProfiles],
    ),
    (
        Category::Domains,
        &[RecordType::StudentProjects, RecordType::StartupProjects],
    ),
    (Category::Companies, &[RecordType::MentorProfiles]),
    (Category::Institutes, &[RecordType::ResearchProjects]),
    (Category::Locations, &[RecordType::StartupProjects]),
];

/// Whether terms of `category` are boosted for `record_type`
pub fn has_affinity(category: Category, record_type: RecordType) -> bool {
    AFFINITY_PAIRS
        .iter()
        .any(|(c, types)| *c == category && types.contains(&record_type))
}

/// Scoring constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub retention_threshold: f64,
    pub affinity_multiplier: f64,
    pub multi_term_multiplier: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            retention_threshold: DEFAULT_RETENTION_THRESHOLD,
            affinity_multiplier: DEFAULT_AFFINITY_MULTIPLIER,
            multi_term_multiplier: DEFAULT_MULTI_TERM_MULTIPLIER,
        }
    }
}

/// A record with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Record,
    pub similarity_score: f64,
}

/// Per-type scorer and ranker
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankingConfig,
}

impl Ranker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Similarity of one record to the query terms
    pub fn score(
        &self,
        terms: &CategorizedTerms,
        record: &Record,
        record_type: RecordType,
    ) -> Result<f64> {
        let fields = extract_fields(record, record_type)?;
        let mut score = 0.0;

        for (category, bucket) in terms.iter() {
            for term in bucket {
                let mut term_score = score_term(term, &fields);
                if has_affinity(category, record_type) {
                    term_score *= self.config.affinity_multiplier;
                }
                score += term_score;
            }
        }

        if terms.total_terms() > 1 && score > 0.0 {
            score *= self.config.multi_term_multiplier;
        }

        Ok(score)
    }

    /// Top `top_n` records of one type, best first.
    ///
    /// Equal scores keep their input order.
    pub fn rank(
        &self,
        terms: &CategorizedTerms,
        records: &[Record],
        record_type: RecordType,
        top_n: usize,
    ) -> Result<Vec<ScoredRecord>> {
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let mut scored = Vec::new();
        for record in records {
            let similarity_score = self.score(terms, record, record_type)?;
            if similarity_score > self.config.retention_threshold {
                scored.push(ScoredRecord {
                    record: record.clone(),
                    similarity_score,
                });
            }
        }

        scored.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_n);

        tracing::debug!(
            record_type = %record_type,
            candidates = records.len(),
            returned = scored.len(),
            "Ranked records"
        );

        Ok(scored)
    }
}

// ============================================================================
// TESTS
// ============================================================================
