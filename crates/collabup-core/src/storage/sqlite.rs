//! SQLite Storage Implementation
//!
//! Document store for candidate records. Every record type lives in its own
//! collection; documents are JSON objects stored with a stable id and returned
//! in insertion order.

use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::RecommendError;
use crate::records::{Record, RecordSource, RecordType};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored or submitted document is not usable
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// HEALTH
// ============================================================================

/// Reachability of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CollectionStatus {
    /// Collection can be read
    Accessible { sample_count: usize },
    /// Collection could not be read
    Error { error: String },
}

/// Health of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionHealth {
    pub collection: &'static str,
    pub record_type: RecordType,
    #[serde(flatten)]
    pub status: CollectionStatus,
}

impl CollectionHealth {
    pub fn is_accessible(&self) -> bool {
        matches!(self.status, CollectionStatus::Accessible { .. })
    }
}

/// Record count and description of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionInfo {
    pub collection: &'static str,
    pub record_type: RecordType,
    pub count: usize,
    pub description: &'static str,
}

/// Records sampled per collection by the health check
const HEALTH_SAMPLE_SIZE: usize = 1;

// ============================================================================
// STORAGE
// ============================================================================

/// Document store for all record types
///
/// Uses separate reader/writer connections for interior mutability.
/// All methods take `&self`, so the store can be shared as `Arc<Storage>`.
pub struct Storage {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl Storage {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -16000;
             PRAGMA temp_store = MEMORY;
             PRAGMA busy_timeout = 5000;",
        )?;

        Ok(())
    }

    /// Default database location under the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "collabup", "recommend").ok_or_else(|| {
            StorageError::Init("Could not determine project directories".to_string())
        })?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("collabup.db"))
    }

    /// Open (or create) the store at `db_path`, or at [`Storage::default_path`]
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => {
                if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                p
            }
            None => Self::default_path()?,
        };

        let writer_conn = Connection::open(&path)?;
        Self::configure_connection(&writer_conn)?;

        // Apply migrations on writer only
        let applied = super::migrations::apply_migrations(&writer_conn)?;
        if applied > 0 {
            tracing::debug!(path = %path.display(), applied, "Database schema migrated");
        }

        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        tracing::info!(path = %path.display(), "Opened record store");

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
        })
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Split a submitted document into `(id, stored fields)`.
    ///
    /// An explicit `id` wins over an `id` key inside the document; the key is
    /// always removed from the stored fields. Without either, a v4 UUID is
    /// generated.
    fn prepare_document(id: Option<String>, document: Value) -> Result<(String, Map<String, Value>)> {
        let Value::Object(mut fields) = document else {
            return Err(StorageError::InvalidDocument(format!(
                "expected a JSON object, got {}",
                json_kind(&document)
            )));
        };

        let embedded = match fields.remove("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => {
                return Err(StorageError::InvalidDocument(format!(
                    "id must be a string or number, got {}",
                    json_kind(&other)
                )));
            }
        };

        let id = id
            .or(embedded)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok((id, fields))
    }

    fn upsert(
        conn: &Connection,
        record_type: RecordType,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let data = serde_json::to_string(fields)?;
        conn.execute(
            "INSERT INTO records (id, collection, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(collection, id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at",
            params![id, record_type.collection(), data, now],
        )?;
        Ok(())
    }

    /// Insert or replace one document, returning its id.
    ///
    /// Replacing keeps the record's original position in fetch order.
    pub fn insert_record(
        &self,
        record_type: RecordType,
        id: Option<String>,
        document: Value,
    ) -> Result<String> {
        let (id, fields) = Self::prepare_document(id, document)?;

        let writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        Self::upsert(&writer, record_type, &id, &fields)?;

        tracing::debug!(collection = record_type.collection(), id = %id, "Stored record");
        Ok(id)
    }

    /// Insert many documents in one transaction, returning how many were stored.
    ///
    /// Any non-object entry aborts the whole import.
    pub fn import_records(&self, record_type: RecordType, documents: Vec<Value>) -> Result<usize> {
        let prepared = documents
            .into_iter()
            .enumerate()
            .map(|(index, doc)| {
                Self::prepare_document(None, doc).map_err(|e| match e {
                    StorageError::InvalidDocument(msg) => {
                        StorageError::InvalidDocument(format!("entry {}: {}", index, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let tx = writer.transaction()?;
        for (id, fields) in &prepared {
            Self::upsert(&tx, record_type, id, fields)?;
        }
        tx.commit()?;

        tracing::info!(
            collection = record_type.collection(),
            count = prepared.len(),
            "Imported records"
        );
        Ok(prepared.len())
    }

    /// Delete one record; `false` when it did not exist
    pub fn delete_record(&self, record_type: RecordType, id: &str) -> Result<bool> {
        let writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let deleted = writer.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2",
            params![record_type.collection(), id],
        )?;
        Ok(deleted > 0)
    }

    // ========================================================================
    // READS
    // ========================================================================

    fn row_to_parts(row: &rusqlite::Row) -> rusqlite::Result<(String, String)> {
        Ok((row.get("id")?, row.get("data")?))
    }

    fn to_record(id: String, data: &str) -> Result<Record> {
        let value: Value = serde_json::from_str(data)?;
        Record::from_value(id.clone(), value).ok_or_else(|| {
            StorageError::InvalidDocument(format!("stored record '{}' is not an object", id))
        })
    }

    fn query_records(
        &self,
        record_type: RecordType,
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        // LIMIT -1 means no limit in SQLite
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let mut stmt = reader.prepare(
            "SELECT id, data FROM records
             WHERE collection = ?1
             ORDER BY seq
             LIMIT ?2",
        )?;

        let rows = stmt
            .query_map(params![record_type.collection(), limit], Self::row_to_parts)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, data)| Self::to_record(id, &data))
            .collect()
    }

    /// All records of a type, in insertion order
    pub fn get_records(&self, record_type: RecordType) -> Result<Vec<Record>> {
        self.query_records(record_type, None)
    }

    /// The first `limit` records of a type, in insertion order
    pub fn sample_records(&self, record_type: RecordType, limit: usize) -> Result<Vec<Record>> {
        self.query_records(record_type, Some(limit))
    }

    /// One record by id
    pub fn get_record(&self, record_type: RecordType, id: &str) -> Result<Option<Record>> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let parts = reader
            .query_row(
                "SELECT id, data FROM records WHERE collection = ?1 AND id = ?2",
                params![record_type.collection(), id],
                Self::row_to_parts,
            )
            .optional()?;

        parts.map(|(id, data)| Self::to_record(id, &data)).transpose()
    }

    /// Number of records of a type
    pub fn count_records(&self, record_type: RecordType) -> Result<usize> {
        let reader = self
            .reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let count: i64 = reader.query_row(
            "SELECT COUNT(*) FROM records WHERE collection = ?1",
            params![record_type.collection()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Probe every collection by reading a small sample
    pub fn collection_health(&self) -> Vec<CollectionHealth> {
        RecordType::ALL
            .into_iter()
            .map(|record_type| {
                let status = match self.sample_records(record_type, HEALTH_SAMPLE_SIZE) {
                    Ok(sample) => CollectionStatus::Accessible {
                        sample_count: sample.len(),
                    },
                    Err(e) => {
                        tracing::warn!(
                            collection = record_type.collection(),
                            "Collection unreadable: {}",
                            e
                        );
                        CollectionStatus::Error {
                            error: e.to_string(),
                        }
                    }
                };
                CollectionHealth {
                    collection: record_type.collection(),
                    record_type,
                    status,
                }
            })
            .collect()
    }

    /// Count and description of every collection
    pub fn collections_info(&self) -> Result<Vec<CollectionInfo>> {
        RecordType::ALL
            .into_iter()
            .map(|record_type| {
                Ok(CollectionInfo {
                    collection: record_type.collection(),
                    record_type,
                    count: self.count_records(record_type)?,
                    description: record_type.description(),
                })
            })
            .collect()
    }
}

impl RecordSource for Storage {
    fn fetch(&self, record_type: RecordType) -> crate::error::Result<Vec<Record>> {
        self.get_records(record_type)
            .map_err(|e| RecommendError::DependencyUnavailable {
                record_type,
                reason: e.to_string(),
            })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
