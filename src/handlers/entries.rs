use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dates::{normalize_entry_date, parse_date_param, today_local};
use crate::error::{AppError, AppResult};
use crate::models::entry::{CreateEntryRequest, DateRangeQuery, EntryWithMood, PaginationQuery};
use crate::models::mood::{mood_by_id, Mood};
use crate::store::entries as store;
use crate::store::entries::StreakRun;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct MoodFrequencyRow {
    pub mood: Option<&'static Mood>,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_entries: i64,
    pub current_streak: i64,
    pub logged_today: bool,
    pub mood_frequency: Vec<MoodFrequencyRow>,
}

/// POST /api/entries — save (or overwrite) the entry for one calendar day.
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    body.validate()?;

    let entry_date = match &body.entry_date {
        Some(raw) => normalize_entry_date(raw)?,
        None => today_local(),
    };

    let entry = store::upsert(&state.db, auth_user.id, entry_date, body.mood_id, &body.note).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Entry saved",
            "entry": EntryWithMood::from(entry),
        })),
    ))
}

/// GET /api/entries?page&limit — history, newest day first.
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    if page < 1 {
        return Err(AppError::Validation("page must be at least 1".into()));
    }
    if !(1..=100).contains(&limit) {
        return Err(AppError::Validation("limit must be between 1 and 100".into()));
    }
    // The offset is (page - 1) * limit; a page that would overflow it is
    // out of range, not a server error.
    if page - 1 > i64::MAX / limit {
        return Err(AppError::Validation("page is out of range".into()));
    }

    let (entries, total) = store::get_page(&state.db, auth_user.id, page, limit).await?;
    let entries: Vec<EntryWithMood> = entries.into_iter().map(Into::into).collect();

    Ok(Json(serde_json::json!({
        "entries": entries,
        "pagination": Pagination {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        },
    })))
}

/// GET /api/entries/today
pub async fn get_today(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    let entry = store::get_by_date(&state.db, auth_user.id, today_local()).await?;

    Ok(Json(serde_json::json!({
        "entry": entry.map(EntryWithMood::from),
    })))
}

/// GET /api/entries/range?start_date&end_date — inclusive, oldest first.
pub async fn get_range(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let start = parse_date_param(&query.start_date)?;
    let end = parse_date_param(&query.end_date)?;

    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let entries = store::get_range(&state.db, auth_user.id, start, end).await?;
    let entries: Vec<EntryWithMood> = entries.into_iter().map(Into::into).collect();

    Ok(Json(serde_json::json!({ "entries": entries })))
}

/// GET /api/entries/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<serde_json::Value>> {
    let today = today_local();

    let total_entries = store::count_total(&state.db, auth_user.id).await?;
    let mut by_mood = store::count_by_mood(&state.db, auth_user.id).await?;
    let run = store::latest_streak_run(&state.db, auth_user.id).await?;
    let logged_today = store::get_by_date(&state.db, auth_user.id, today)
        .await?
        .is_some();

    sort_mood_frequency(&mut by_mood);
    let mood_frequency = by_mood
        .into_iter()
        .map(|(mood_id, count)| MoodFrequencyRow {
            mood: mood_by_id(mood_id),
            count,
        })
        .collect();

    let stats = Stats {
        total_entries,
        current_streak: current_streak(run, today),
        logged_today,
        mood_frequency,
    };

    Ok(Json(serde_json::json!({ "stats": stats })))
}

/// GET /api/entries/:date
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let date = parse_date_param(&date)?;

    let entry = store::get_by_date(&state.db, auth_user.id, date).await?;

    Ok(Json(serde_json::json!({
        "entry": entry.map(EntryWithMood::from),
    })))
}

/// DELETE /api/entries/:date
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let date = parse_date_param(&date)?;

    if !store::delete(&state.db, auth_user.id, date).await? {
        return Err(AppError::NotFound("Entry not found".into()));
    }

    Ok(Json(serde_json::json!({ "message": "Entry deleted" })))
}

/// `ceil(total / limit)` for the pagination envelope.
fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// A historical run only counts as the *current* streak when it is still
/// alive: its last entry must be today or yesterday. Anything older means the
/// chain is broken and the streak is zero, however long the run was.
fn current_streak(run: Option<StreakRun>, today: NaiveDate) -> i64 {
    match run {
        Some(run) if run.end_date == today || run.end_date == today - Duration::days(1) => {
            run.length
        }
        _ => 0,
    }
}

/// Most-used mood first; ties broken by ascending mood id so the output is
/// deterministic.
fn sort_mood_frequency(rows: &mut [(i32, i64)]) {
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
}
