use sqlx::SqlitePool;

use crate::models::FeedbackRow;

const SQL_LIST_RECENT_FEEDBACKS: &str = r#"
SELECT
  f.feedback_id,
  u.first_name,
  u.last_name,
  u.user_id,
  c.name AS club_name,
  f.rating,
  f.comment,
  f.created_at
FROM feedbacks f
LEFT JOIN users u ON u.user_id = f.user_id
LEFT JOIN clubs c ON c.club_id = f.club_id
ORDER BY strftime('%Y-%m-%dT%H:%M:%fZ', f.created_at) DESC
LIMIT ?1
"#;

pub async fn list_recent_feedbacks(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<FeedbackRow>> {
    sqlx::query_as::<_, FeedbackRow>(SQL_LIST_RECENT_FEEDBACKS)
        .bind(limit)
        .fetch_all(pool)
        .await
}
