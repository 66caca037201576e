//! Router-level tests for the surface that does not need a live database:
//! the mood catalog, health check, auth enforcement, and input validation
//! that must reject requests before any query runs. The pool is created
//! lazily so no connection is ever attempted.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use minimood_api::auth::jwt::{create_access_token, create_refresh_token};
use minimood_api::auth::rate_limit::RateLimitState;
use minimood_api::config::Config;
use minimood_api::{app, AppState};

fn test_config() -> Config {
    Config {
        database_url: "postgres://postgres@localhost:1/unreachable".into(),
        db_max_connections: 2,
        db_acquire_timeout_secs: 1,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        jwt_secret: "integration-test-secret".into(),
        jwt_access_ttl_secs: 900,
        jwt_refresh_ttl_secs: 604800,
    }
}

fn test_state() -> AppState {
    let config = test_config();
    let db = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");

    AppState {
        db,
        config: Arc::new(config),
        rate_limiter: RateLimitState::new(),
    }
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let response = app(test_state()).oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "minimood-api");
}

#[tokio::test]
async fn mood_catalog_lists_all_forty() {
    let response = app(test_state()).oneshot(get("/api/moods")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let moods = body["moods"].as_array().unwrap();
    assert_eq!(moods.len(), 40);
    assert_eq!(moods[0]["id"], 1);
    assert_eq!(moods[0]["name"], "Happy");
    assert_eq!(moods[39]["name"], "Neutral");
}

#[tokio::test]
async fn mood_lookup_respects_bounds() {
    let state = test_state();

    let response = app(state.clone()).oneshot(get("/api/moods/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["mood"]["name"], "Happy");

    let response = app(state.clone()).oneshot(get("/api/moods/40")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(state.clone()).oneshot(get("/api/moods/0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(state).oneshot(get("/api/moods/41")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entries_require_bearer_token() {
    let state = test_state();

    for uri in [
        "/api/entries",
        "/api/entries/today",
        "/api/entries/stats",
        "/api/entries/2024-03-05",
    ] {
        let response = app(state.clone()).oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let response = app(test_state())
        .oneshot(get_authed("/api/entries/today", "not-a-jwt"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_cannot_be_used_as_access_token() {
    let state = test_state();
    let token = create_refresh_token(1, "a@example.com", &state.config).unwrap();

    let response = app(state)
        .oneshot(get_authed("/api/entries/today", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_date_param_fails_fast() {
    let state = test_state();
    let token = create_access_token(1, "a@example.com", &state.config).unwrap();

    for uri in [
        "/api/entries/not-a-date",
        "/api/entries/2024-13-99",
        "/api/entries/2024-3-5",
        "/api/entries/05-03-2024",
    ] {
        let response = app(state.clone())
            .oneshot(get_authed(uri, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn delete_with_malformed_date_fails_fast() {
    let state = test_state();
    let token = create_access_token(1, "a@example.com", &state.config).unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/entries/yesterday")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let state = test_state();
    let token = create_access_token(1, "a@example.com", &state.config).unwrap();

    let response = app(state)
        .oneshot(get_authed(
            "/api/entries/range?start_date=2024-03-10&end_date=2024-03-01",
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pagination_params_are_validated() {
    let state = test_state();
    let token = create_access_token(1, "a@example.com", &state.config).unwrap();

    for uri in [
        "/api/entries?page=0",
        "/api/entries?limit=0",
        "/api/entries?limit=101",
        // Large enough that (page - 1) * limit would overflow an i64 offset.
        "/api/entries?page=9223372036854775807",
        "/api/entries?page=9223372036854775807&limit=100",
    ] {
        let response = app(state.clone())
            .oneshot(get_authed(uri, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn out_of_range_mood_id_is_rejected_on_save() {
    let state = test_state();
    let token = create_access_token(1, "a@example.com", &state.config).unwrap();

    for body in [
        serde_json::json!({ "mood_id": 0 }),
        serde_json::json!({ "mood_id": 41 }),
        serde_json::json!({ "mood_id": 5, "note": "x".repeat(201) }),
        serde_json::json!({ "mood_id": 5, "entry_date": "garbage" }),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/entries")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn error_body_has_stable_envelope() {
    let response = app(test_state()).oneshot(get("/api/moods/41")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 404);
    assert_eq!(body["error"]["message"], "Mood not found");
}
