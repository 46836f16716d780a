//! HTTP API Tests
//!
//! Drives the full router in-process against a seeded store.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use collabup_e2e_tests::TestDatabaseManager;
use collabup_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(db: &TestDatabaseManager) -> Router {
    build_router(AppState::new(db.storage.clone()), 8)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_recommend_endpoint() {
    let db = TestDatabaseManager::new_seeded();
    let (status, body) = send(
        app(&db),
        post_json("/recommend", json!({"query": "python, bangalore", "top_n": 2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["startup_projects"].as_array().unwrap().len(), 2);
    assert_eq!(body["startup_projects"][0]["id"], "s2");
    assert_eq!(body["startup_projects"][0]["name"], "PaySetu");
    assert_eq!(body["startup_projects"][0]["similarity_score"], 2.589230769230769);
    assert_eq!(body["mentor_profiles"][0]["id"], "m1");
    assert_eq!(body["mentor_profiles"][0]["expertise"][0], "Python");
}

#[tokio::test]
async fn test_recommend_uses_default_top_n() {
    let db = TestDatabaseManager::new_temp();
    db.seed(&collabup_e2e_tests::TestDataFactory::tie_scenario(8));

    let (status, body) = send(app(&db), post_json("/recommend", json!({"query": "edtech"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["startup_projects"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_recommend_rejects_malformed_body() {
    let db = TestDatabaseManager::new_seeded();
    let (status, _) = send(app(&db), post_json("/recommend", json!({"top_n": 3}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_health_endpoint() {
    let db = TestDatabaseManager::new_seeded();
    let (status, body) = send(app(&db), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage_status"], "connected");
    for collection in ["projects", "startups", "mentors", "faculty"] {
        assert_eq!(body["collections"][collection]["status"], "accessible");
        assert_eq!(body["collections"][collection]["sample_count"], 1);
    }
}

#[tokio::test]
async fn test_debug_query_endpoint() {
    let db = TestDatabaseManager::new_seeded();
    let (status, body) = send(app(&db), get("/debug-query?query=python%2C%20bangalore")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "python, bangalore");
    assert_eq!(body["categorized_tokens"]["general"], json!(["python"]));
    assert_eq!(body["categorized_tokens"]["locations"], json!(["bangalore"]));
    assert_eq!(body["categorized_tokens"]["skills"], json!([]));
    // the first startup stored is s1 (KisanLink)
    assert_eq!(body["sample_data"]["startups"]["name"], "KisanLink");
    assert_eq!(body["sample_scores"]["startup_projects"], 0.9354621848739496);
    assert_eq!(body["sample_scores"]["mentor_profiles"], 3.6520000000000006);
}

#[tokio::test]
async fn test_collections_info_endpoint() {
    let db = TestDatabaseManager::new_seeded();
    let (status, body) = send(app(&db), get("/collections-info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"]["count"], 3);
    assert_eq!(body["startups"]["count"], 3);
    assert_eq!(body["mentors"]["count"], 2);
    assert_eq!(body["faculty"]["count"], 2);
    assert_eq!(
        body["mentors"]["description"],
        "Professional mentors available for guidance"
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let db = TestDatabaseManager::new_temp();
    let (status, _) = send(app(&db), get("/recommendations")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
