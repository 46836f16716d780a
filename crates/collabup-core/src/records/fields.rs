//! Searchable Fields
//!
//! Each record type declares which document keys are searchable and how much a
//! match on each one is worth. List-valued keys (skills, expertise, research
//! areas) expand into one entry per element, all at the list's weight.
//!
//! A term is scored against a record by taking its best weighted match over
//! all entries; fields never add up.

use serde_json::Value;

use super::{Record, RecordType};
use crate::error::{RecommendError, Result};
use crate::fuzzy::similarity;

/// How a document key is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One value, stringified; zero, `false` and empty values are skipped
    Scalar,
    /// One value, stringified even when zero or `false`
    Text,
    /// Array of values, one entry per non-empty element
    List,
}

/// One searchable key of a record type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Name reported for entries read from this key
    pub name: &'static str,
    /// Document key the value is read from
    pub key: &'static str,
    pub kind: FieldKind,
    pub weight: f64,
}

const fn scalar(key: &'static str, weight: f64) -> FieldSpec {
    FieldSpec {
        name: key,
        key,
        kind: FieldKind::Scalar,
        weight,
    }
}

const fn text(key: &'static str, weight: f64) -> FieldSpec {
    FieldSpec {
        name: key,
        key,
        kind: FieldKind::Text,
        weight,
    }
}

const fn list(name: &'static str, key: &'static str, weight: f64) -> FieldSpec {
    FieldSpec {
        name,
        key,
        kind: FieldKind::List,
        weight,
    }
}

const STUDENT_PROJECT_FIELDS: &[FieldSpec] = &[
    scalar("title", 3.0),
    scalar("description", 1.5),
    scalar("domain", 2.5),
    scalar("difficulty", 1.0),
    scalar("type", 1.0),
    list("skill", "skillsRequired", 2.0),
];

const STARTUP_PROJECT_FIELDS: &[FieldSpec] = &[
    scalar("name", 3.0),
    scalar("description", 1.5),
    scalar("domain", 2.5),
    scalar("location", 1.5),
    scalar("mission", 2.0),
    scalar("founder", 1.0),
    scalar("funding", 0.5),
];

const MENTOR_PROFILE_FIELDS: &[FieldSpec] = &[
    scalar("name", 2.0),
    scalar("bio", 1.5),
    scalar("currentCompany", 2.0),
    scalar("designation", 1.5),
    text("experience", 1.0),
    list("expertise", "expertise", 3.0),
];

const RESEARCH_PROJECT_FIELDS: &[FieldSpec] = &[
    scalar("name", 2.0),
    scalar("bio", 1.5),
    scalar("department", 2.0),
    scalar("institute", 1.5),
    scalar("designation", 1.5),
    text("experience", 1.0),
    list("researchArea", "researchAreas", 3.0),
];

/// Field schema per record type
const FIELD_SCHEMAS: &[(RecordType, &[FieldSpec])] = &[
    (RecordType::StudentProjects, STUDENT_PROJECT_FIELDS),
    (RecordType::StartupProjects, STARTUP_PROJECT_FIELDS),
    (RecordType::MentorProfiles, MENTOR_PROFILE_FIELDS),
    (RecordType::ResearchProjects, RESEARCH_PROJECT_FIELDS),
];

/// Searchable fields declared for a record type
pub fn field_schema(record_type: RecordType) -> Result<&'static [FieldSpec]> {
    FIELD_SCHEMAS
        .iter()
        .find(|(t, _)| *t == record_type)
        .map(|(_, specs)| *specs)
        .ok_or_else(|| RecommendError::Configuration(record_type.to_string()))
}

/// A stringified field value ready for matching
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    pub name: &'static str,
    pub value: String,
    pub weight: f64,
}

/// Extract the `(name, value, weight)` entries of a record.
///
/// Missing, null and empty values produce no entry. Zero and `false` count as
/// empty everywhere except in [`FieldKind::Text`] keys.
pub fn extract_fields(record: &Record, record_type: RecordType) -> Result<Vec<FieldEntry>> {
    let schema = field_schema(record_type)?;
    let mut entries = Vec::with_capacity(schema.len());

    for spec in schema {
        let Some(value) = record.get(spec.key) else {
            continue;
        };

        let entry = |value: String| FieldEntry {
            name: spec.name,
            value,
            weight: spec.weight,
        };

        match (spec.kind, value) {
            (FieldKind::List, Value::Array(items)) => {
                entries.extend(
                    items
                        .iter()
                        .filter(|item| !is_falsy(item))
                        .filter_map(render_value)
                        .map(entry),
                );
            }
            (FieldKind::Text, _) => entries.extend(render_value(value).map(entry)),
            _ if is_falsy(value) => {}
            _ => entries.extend(render_value(value).map(entry)),
        }
    }

    Ok(entries)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Render a JSON value as matchable text; `None` when there is nothing to match
fn render_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Best weighted similarity of one term over all entries (0.0 if none)
pub fn score_term(term: &str, fields: &[FieldEntry]) -> f64 {
    fields
        .iter()
        .map(|field| similarity(term, &field.value) * field.weight)
        .fold(0.0, f64::max)
}
