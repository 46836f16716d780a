//! Recommendation orchestration across all record types

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{RankingConfig, Ranker, ScoredRecord};
use crate::error::Result;
use crate::query::{parse_query, CategorizedTerms};
use crate::records::{RecordBatch, RecordSource, RecordType};

/// Results per type when the caller does not say
pub const DEFAULT_TOP_N: usize = 5;

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// A recommendation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Query {
    pub fn new(query: impl Into<String>, top_n: usize) -> Self {
        Self {
            query: query.into(),
            top_n,
        }
    }
}

/// Best matches of each record type, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub student_projects: Vec<ScoredRecord>,
    pub startup_projects: Vec<ScoredRecord>,
    pub mentor_profiles: Vec<ScoredRecord>,
    pub research_projects: Vec<ScoredRecord>,
}

impl RecommendationResult {
    pub fn get(&self, record_type: RecordType) -> &[ScoredRecord] {
        match record_type {
            RecordType::StudentProjects => &self.student_projects,
            RecordType::StartupProjects => &self.startup_projects,
            RecordType::MentorProfiles => &self.mentor_profiles,
            RecordType::ResearchProjects => &self.research_projects,
        }
    }

    fn slot(&mut self, record_type: RecordType) -> &mut Vec<ScoredRecord> {
        match record_type {
            RecordType::StudentProjects => &mut self.student_projects,
            RecordType::StartupProjects => &mut self.startup_projects,
            RecordType::MentorProfiles => &mut self.mentor_profiles,
            RecordType::ResearchProjects => &mut self.research_projects,
        }
    }

    /// Number of records across all types
    pub fn total(&self) -> usize {
        RecordType::ALL.iter().map(|t| self.get(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Ranks every record type against one query
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    ranker: Ranker,
}

impl Recommender {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            ranker: Ranker::new(config),
        }
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Parse the query, fetch candidates from `source`, and rank each type.
    ///
    /// A query with no usable terms returns an empty result without
    /// fetching anything.
    pub fn recommend(
        &self,
        query: &Query,
        source: &dyn RecordSource,
    ) -> Result<RecommendationResult> {
        let terms = parse_query(&query.query);
        debug!(query = %query.query, terms = ?terms, "Parsed query");

        if terms.is_empty() {
            info!(query = %query.query, "No meaningful terms in query");
            return Ok(RecommendationResult::default());
        }

        let mut result = RecommendationResult::default();
        for record_type in RecordType::ALL {
            let records = source.fetch(record_type)?;
            *result.slot(record_type) =
                self.ranker.rank(&terms, &records, record_type, query.top_n)?;
        }

        info!(
            student_projects = result.student_projects.len(),
            startup_projects = result.startup_projects.len(),
            mentor_profiles = result.mentor_profiles.len(),
            research_projects = result.research_projects.len(),
            "Recommendations ready"
        );

        Ok(result)
    }

    /// Rank already-materialized records
    pub fn recommend_records(
        &self,
        terms: &CategorizedTerms,
        batch: &RecordBatch,
        top_n: usize,
    ) -> Result<RecommendationResult> {
        let mut result = RecommendationResult::default();
        if terms.is_empty() {
            return Ok(result);
        }

        for record_type in RecordType::ALL {
            *result.slot(record_type) =
                self.ranker
                    .rank(terms, batch.get(record_type), record_type, top_n)?;
        }
        Ok(result)
    }
}
