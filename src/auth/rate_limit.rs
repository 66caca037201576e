use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

const MAX_REQUESTS: u32 = 5;
const WINDOW_SECS: u64 = 60;

/// In-memory fixed-window limiter for the auth endpoints. Single-instance
/// only; a multi-instance deployment would need a shared store.
#[derive(Clone, Default)]
pub struct RateLimitState {
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

struct Window {
    count: u32,
    started: Instant,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit for `key`. Returns the remaining budget, or the time until
    /// the window resets when the key is over its limit.
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(WINDOW_SECS);

        let entry = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(entry.started) > window {
            entry.count = 0;
            entry.started = now;
        }

        if entry.count >= MAX_REQUESTS {
            return Err(window.saturating_sub(now.duration_since(entry.started)));
        }

        entry.count += 1;
        Ok(MAX_REQUESTS - entry.count)
    }

    /// Drop stale windows. Run periodically from a background task.
    pub async fn cleanup(&self) {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let keep_for = Duration::from_secs(WINDOW_SECS * 2);

        windows.retain(|_, w| now.duration_since(w.started) < keep_for);
    }
}

pub async fn rate_limit_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = req.uri().path().to_string();

    // Key on IP + path so /login and /register have separate budgets.
    let key = format!("{}:{}", ip, path);

    match state.rate_limiter.check(&key).await {
        Ok(_) => Ok(next.run(req).await),
        Err(retry_after) => {
            tracing::warn!(
                ip = %ip,
                path = %path,
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}
