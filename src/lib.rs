use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use auth::rate_limit::RateLimitState;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

/// Build the full application router against the given state.
pub fn app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/readyz", get(handlers::health::readyz))
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods/:id", get(handlers::moods::get_mood))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        // Entries
        .route("/api/entries", post(handlers::entries::create_entry))
        .route("/api/entries", get(handlers::entries::list_entries))
        .route("/api/entries/today", get(handlers::entries::get_today))
        .route("/api/entries/range", get(handlers::entries::get_range))
        .route("/api/entries/stats", get(handlers::entries::get_stats))
        .route("/api/entries/:date", get(handlers::entries::get_entry))
        .route("/api/entries/:date", delete(handlers::entries::delete_entry))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
