use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::mood::Mood;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: i64,
    pub entry_date: NaiveDate,
    pub mood_id: i32,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An entry decorated with its resolved catalog mood, as returned to clients.
#[derive(Debug, Serialize)]
pub struct EntryWithMood {
    #[serde(flatten)]
    pub entry: Entry,
    pub mood: Option<&'static Mood>,
}

impl From<Entry> for EntryWithMood {
    fn from(entry: Entry) -> Self {
        let mood = crate::models::mood::mood_by_id(entry.mood_id);
        Self { entry, mood }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(range(min = 1, max = 40, message = "Invalid mood"))]
    pub mood_id: i32,

    #[validate(length(max = 200, message = "Note must be 200 characters or less"))]
    #[serde(default)]
    pub note: String,

    /// Defaults to the server-local calendar day when absent. Accepts
    /// `YYYY-MM-DD` or a richer timestamp whose date prefix is taken.
    pub entry_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: String,
    pub end_date: String,
}
