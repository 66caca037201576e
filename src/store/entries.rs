//! SQL access for the `entries` table. All queries are scoped to the
//! authenticated user's id; the `(user_id, entry_date)` unique constraint is
//! the only concurrency control the journal needs.

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::models::entry::Entry;

/// The most recent run of consecutive entry dates, as reported by
/// [`latest_streak_run`]. Whether it counts as the *current* streak is decided
/// by the stats handler, not here.
#[derive(Debug, Clone, Copy, FromRow, PartialEq)]
pub struct StreakRun {
    pub length: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Insert the entry for `(user_id, date)`, or overwrite mood and note if one
/// already exists for that day. A second save for the same day is the designed
/// behavior, not a conflict.
pub async fn upsert(
    db: &PgPool,
    user_id: i64,
    date: NaiveDate,
    mood_id: i32,
    note: &str,
) -> sqlx::Result<Entry> {
    sqlx::query_as::<_, Entry>(
        r#"
        INSERT INTO entries (user_id, entry_date, mood_id, note)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, entry_date)
        DO UPDATE SET mood_id = $3, note = $4, updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(mood_id)
    .bind(note)
    .fetch_one(db)
    .await
}

pub async fn get_by_date(
    db: &PgPool,
    user_id: i64,
    date: NaiveDate,
) -> sqlx::Result<Option<Entry>> {
    sqlx::query_as::<_, Entry>(
        "SELECT * FROM entries WHERE user_id = $1 AND entry_date = $2",
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await
}

/// One page of entries, newest day first, plus the user's total entry count.
pub async fn get_page(
    db: &PgPool,
    user_id: i64,
    page: i64,
    limit: i64,
) -> sqlx::Result<(Vec<Entry>, i64)> {
    // Saturate so a wild page value cannot wrap into a negative offset.
    let offset = (page - 1).saturating_mul(limit);

    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT * FROM entries
        WHERE user_id = $1
        ORDER BY entry_date DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    let total = count_total(db, user_id).await?;

    Ok((entries, total))
}

/// Entries between `start` and `end`, both bounds inclusive, oldest first.
pub async fn get_range(
    db: &PgPool,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> sqlx::Result<Vec<Entry>> {
    sqlx::query_as::<_, Entry>(
        r#"
        SELECT * FROM entries
        WHERE user_id = $1 AND entry_date >= $2 AND entry_date <= $3
        ORDER BY entry_date ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
}

/// Delete the entry for `date`. Returns false when no row existed.
pub async fn delete(db: &PgPool, user_id: i64, date: NaiveDate) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM entries WHERE user_id = $1 AND entry_date = $2")
        .bind(user_id)
        .bind(date)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_total(db: &PgPool, user_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await
}

/// Per-mood entry counts, unordered. The stats handler sorts for display.
pub async fn count_by_mood(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<(i32, i64)>> {
    sqlx::query_as::<_, (i32, i64)>(
        r#"
        SELECT mood_id, COUNT(*)
        FROM entries
        WHERE user_id = $1
        GROUP BY mood_id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// The run of consecutive entry dates with the latest end date, or `None` for
/// a user with no entries.
///
/// Grouping trick: with dates sorted ascending, `entry_date - row_number` is
/// constant exactly when successive dates differ by one day, so equal keys
/// collapse into one run.
pub async fn latest_streak_run(db: &PgPool, user_id: i64) -> sqlx::Result<Option<StreakRun>> {
    sqlx::query_as::<_, StreakRun>(
        r#"
        WITH date_sequence AS (
            SELECT entry_date,
                   entry_date - (ROW_NUMBER() OVER (ORDER BY entry_date))::int AS grp
            FROM entries
            WHERE user_id = $1
        )
        SELECT COUNT(*) AS length,
               MIN(entry_date) AS start_date,
               MAX(entry_date) AS end_date
        FROM date_sequence
        GROUP BY grp
        ORDER BY end_date DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}
