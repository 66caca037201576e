use axum::{extract::Path, Json};

use crate::error::{AppError, AppResult};
use crate::models::mood::{all_moods, mood_by_id};

/// GET /api/moods — the full catalog, in id order.
pub async fn list_moods() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "moods": all_moods() }))
}

/// GET /api/moods/:id
pub async fn get_mood(Path(id): Path<i32>) -> AppResult<Json<serde_json::Value>> {
    let mood = mood_by_id(id).ok_or(AppError::NotFound("Mood not found".into()))?;

    Ok(Json(serde_json::json!({ "mood": mood })))
}
