//! API endpoint handlers
//!
//! Storage access and scoring are synchronous, so every handler moves its
//! work onto the blocking pool.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use collabup_core::{
    parse_query, RecommendError, RecommendationResult, RecordType, StorageError,
    Query as RecommendRequest,
};

use super::state::AppState;

// ============================================================================
// ERRORS
// ============================================================================

/// Handler failure, reported as `500 {"detail": ...}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Error getting recommendations: {0}")]
    Recommend(#[from] RecommendError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

/// Run synchronous work on the blocking pool
async fn run_blocking<T, E, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await?.map_err(Into::into)
}

// ============================================================================
// RECOMMEND
// ============================================================================

/// Best matches of every record type for a query
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendationResult>, ApiError> {
    info!(query = %request.query, top_n = request.top_n, "Recommendation request");

    let result = run_blocking(move || {
        state
            .recommender
            .recommend(&request, state.storage.as_ref())
    })
    .await?;

    Ok(Json(result))
}

// ============================================================================
// HEALTH
// ============================================================================

/// Per-collection reachability
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let storage = state.storage.clone();
    let timestamp = Utc::now().to_rfc3339();

    let collections = match tokio::task::spawn_blocking(move || storage.collection_health()).await
    {
        Ok(collections) => collections,
        Err(e) => {
            return Json(json!({
                "status": "error",
                "error": e.to_string(),
                "timestamp": timestamp,
            }));
        }
    };

    let failed = collections.iter().filter(|c| !c.is_accessible()).count();
    let (status, storage_status) = match failed {
        0 => ("healthy", "connected"),
        n if n == collections.len() => ("unhealthy", "error"),
        _ => ("healthy", "partial"),
    };

    let collections: Map<String, Value> = collections
        .iter()
        .map(|c| {
            (
                c.collection.to_string(),
                serde_json::to_value(&c.status).unwrap_or_default(),
            )
        })
        .collect();

    Json(json!({
        "status": status,
        "storage_status": storage_status,
        "collections": collections,
        "timestamp": timestamp,
    }))
}

// ============================================================================
// DEBUG QUERY
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DebugQueryParams {
    pub query: String,
}

/// How a query is parsed and how it scores against one sample per collection
pub async fn debug_query(
    State(state): State<AppState>,
    Query(params): Query<DebugQueryParams>,
) -> Result<Json<Value>, ApiError> {
    let report = run_blocking(move || Ok::<_, ApiError>(debug_report(&state, &params.query)))
        .await?;
    Ok(Json(report))
}

fn debug_report(state: &AppState, query: &str) -> Value {
    let terms = parse_query(query);
    debug!(query, terms = ?terms, "Debugging query");

    let mut sample_data = Map::new();
    let mut sample_scores = Map::new();

    for record_type in RecordType::ALL {
        let collection = record_type.collection();
        let sample = match state.storage.sample_records(record_type, 1) {
            Ok(mut records) => records.pop(),
            Err(e) => {
                warn!(collection, "Could not sample collection: {}", e);
                continue;
            }
        };
        let Some(record) = sample else {
            debug!(collection, "No data in collection");
            continue;
        };

        let score = state
            .recommender
            .ranker()
            .score(&terms, &record, record_type)
            .unwrap_or_else(|e| {
                warn!(collection, "Could not score sample: {}", e);
                0.0
            });
        sample_scores.insert(record_type.as_str().to_string(), json!(score));
        sample_data.insert(collection.to_string(), Value::Object(record.fields));
    }

    json!({
        "query": query,
        "categorized_tokens": terms,
        "sample_scores": sample_scores,
        "sample_data": sample_data,
    })
}

// ============================================================================
// COLLECTIONS INFO
// ============================================================================

/// Record count and description of every collection
pub async fn collections_info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let infos = run_blocking(move || state.storage.collections_info()).await?;

    let info: Map<String, Value> = infos
        .into_iter()
        .map(|i| {
            (
                i.collection.to_string(),
                json!({ "count": i.count, "description": i.description }),
            )
        })
        .collect();

    Ok(Json(Value::Object(info)))
}

// ============================================================================
// TESTS
// ============================================================================
