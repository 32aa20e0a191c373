use sqlx::SqlitePool;

use crate::database::{feedbacks_repo, timestamp};
use crate::models::{FeedbackItem, FeedbackRow};
use crate::services::error::FeedbacksError;

pub const DEFAULT_FEEDBACK_LIMIT: i64 = 5;
pub const MAX_FEEDBACK_LIMIT: i64 = 50;

/// Absent or empty means the default; `0` is honoured and yields an empty feed.
pub fn parse_limit(raw: Option<&str>) -> Result<i64, FeedbacksError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_FEEDBACK_LIMIT),
        Some(raw) => raw,
    };
    let limit: i64 = raw
        .parse()
        .map_err(|_| FeedbacksError::InvalidLimit(raw.to_string()))?;
    Ok(limit.clamp(0, MAX_FEEDBACK_LIMIT))
}

pub async fn list_recent_feedbacks(
    pool: &SqlitePool,
    limit: Option<&str>,
) -> Result<Vec<FeedbackItem>, FeedbacksError> {
    let limit = parse_limit(limit)?;
    if limit == 0 {
        return Ok(Vec::new());
    }
    let rows = feedbacks_repo::list_recent_feedbacks(pool, limit).await?;
    Ok(rows.into_iter().map(build_feedback_item).collect())
}

fn build_feedback_item(row: FeedbackRow) -> FeedbackItem {
    let volunteer_name = match row.user_id {
        Some(_) => format!(
            "{} {}",
            row.first_name.as_deref().unwrap_or(""),
            row.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string(),
        None => "Anonymous".to_string(),
    };

    FeedbackItem {
        id: row.feedback_id,
        volunteer_name,
        club: row.club_name.unwrap_or_else(|| "Unknown".to_string()),
        rating: row.rating,
        comment: row.comment,
        date: row
            .created_at
            .as_deref()
            .and_then(timestamp::decode)
            .map(|at| at.format("%Y-%m-%d").to_string()),
    }
}
