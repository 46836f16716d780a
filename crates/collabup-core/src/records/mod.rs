//! Record Model
//!
//! Candidate records are weakly-typed documents: a stable id plus a map of
//! field name to JSON value. The [`RecordType`] decides which fields are
//! searchable and how much each one counts (see [`fields`]).

pub mod fields;

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RecommendError, Result};

pub use fields::{extract_fields, field_schema, score_term, FieldEntry, FieldKind, FieldSpec};

/// Kind of record being recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    /// Student-created projects looking for collaborators
    StudentProjects,
    /// Startups and their openings
    StartupProjects,
    /// Industry mentors
    MentorProfiles,
    /// Faculty and their research
    ResearchProjects,
}

impl RecordType {
    /// All record types, in response order
    pub const ALL: [RecordType; 4] = [
        RecordType::StudentProjects,
        RecordType::StartupProjects,
        RecordType::MentorProfiles,
        RecordType::ResearchProjects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::StudentProjects => "student_projects",
            RecordType::StartupProjects => "startup_projects",
            RecordType::MentorProfiles => "mentor_profiles",
            RecordType::ResearchProjects => "research_projects",
        }
    }

    /// Name of the document-store collection holding this type
    pub fn collection(&self) -> &'static str {
        match self {
            RecordType::StudentProjects => "projects",
            RecordType::StartupProjects => "startups",
            RecordType::MentorProfiles => "mentors",
            RecordType::ResearchProjects => "faculty",
        }
    }

    /// Human-readable description of the collection
    pub fn description(&self) -> &'static str {
        match self {
            RecordType::StudentProjects => "Student-created projects looking for collaborators",
            RecordType::StartupProjects => "Startup projects and opportunities",
            RecordType::MentorProfiles => "Professional mentors available for guidance",
            RecordType::ResearchProjects => "Academic faculty and research projects",
        }
    }

    /// Resolve a collection name (`projects`, `startups`, `mentors`, `faculty`)
    pub fn from_collection(collection: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.collection() == collection)
            .ok_or_else(|| RecommendError::Configuration(collection.to_string()))
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RecommendError::Configuration(s.to_string()))
    }
}

/// A candidate record: opaque id plus its fields
///
/// Serializes flat, with `id` alongside the document's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a record from a JSON object; non-objects yield `None`
    pub fn from_value(id: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(id, fields)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Supplies the candidate records for each type
///
/// Implementations own retrieval, identity and availability; the ranking
/// core never retries a failed fetch.
pub trait RecordSource {
    /// All records of one type, in a stable order
    fn fetch(&self, record_type: RecordType) -> Result<Vec<Record>>;
}

impl<T: RecordSource + ?Sized> RecordSource for std::sync::Arc<T> {
    fn fetch(&self, record_type: RecordType) -> Result<Vec<Record>> {
        (**self).fetch(record_type)
    }
}

/// Materialized records grouped by type
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    records: HashMap<RecordType, Vec<Record>>,
}

impl RecordBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records of one type
    pub fn insert(&mut self, record_type: RecordType, records: Vec<Record>) {
        self.records.insert(record_type, records);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, record_type: RecordType, records: Vec<Record>) -> Self {
        self.insert(record_type, records);
        self
    }

    /// Records of one type (empty if none were supplied)
    pub fn get(&self, record_type: RecordType) -> &[Record] {
        self.records
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSource for RecordBatch {
    fn fetch(&self, record_type: RecordType) -> Result<Vec<Record>> {
        Ok(self.get(record_type).to_vec())
    }
}
