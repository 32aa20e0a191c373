use sqlx::SqlitePool;

use crate::models::EventRow;

const SQL_EVENT_COLUMNS: &str = r#"
SELECT
  e.event_id,
  e.club_id,
  c.name AS club_name,
  e.title,
  e.subtitle,
  e.category,
  e.description,
  e.start_date_time,
  e.end_date_time,
  e.venue,
  e.cover_image,
  e.max_participants,
  (
    SELECT COUNT(*)
    FROM event_registrations r
    WHERE r.event_id = e.event_id
  ) AS registered_count,
  e.created_at,
  e.updated_at
FROM events e
JOIN clubs c ON c.club_id = e.club_id
"#;

const SQL_LIST_EVENTS_WHERE: &str = r#"
WHERE e.is_deleted = 0
  AND (?1 IS NULL OR e.club_id = ?1)
ORDER BY strftime('%Y-%m-%dT%H:%M:%fZ', e.start_date_time) DESC
"#;

const SQL_LOAD_EVENT_WHERE: &str = r#"
WHERE e.event_id = ?1
  AND (?2 = 1 OR e.is_deleted = 0)
LIMIT 1
"#;

const SQL_EVENT_EXISTS: &str = r#"
SELECT COUNT(*)
FROM events
WHERE event_id = ?1
"#;

const SQL_CLUB_EXISTS: &str = r#"
SELECT COUNT(*)
FROM clubs
WHERE club_id = ?1
  AND is_deleted = 0
"#;

const SQL_INSERT_EVENT: &str = r#"
INSERT INTO events (
  event_id,
  club_id,
  title,
  subtitle,
  category,
  description,
  start_date_time,
  end_date_time,
  venue,
  organizer_id,
  max_participants,
  is_deleted,
  created_at,
  updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
"#;

const SQL_UPDATE_EVENT: &str = r#"
UPDATE events
SET
  title = ?,
  subtitle = ?,
  category = ?,
  description = ?,
  start_date_time = ?,
  end_date_time = ?,
  venue = ?,
  organizer_id = ?,
  max_participants = ?,
  updated_at = ?
WHERE event_id = ?
"#;

const SQL_SOFT_DELETE_EVENT: &str = r#"
UPDATE events
SET
  is_deleted = 1,
  updated_at = ?1
WHERE event_id = ?2
"#;

/// Column values shared by inserts and updates. Timestamps are already encoded.
pub struct EventFields<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub start_date_time: &'a str,
    pub end_date_time: Option<&'a str>,
    pub venue: Option<&'a str>,
    pub organizer_id: Option<&'a str>,
    pub max_participants: Option<i64>,
}

pub struct NewEvent<'a> {
    pub event_id: &'a str,
    pub club_id: &'a str,
    pub fields: EventFields<'a>,
    pub created_at: &'a str,
}

pub async fn list_events(pool: &SqlitePool, club_id: Option<&str>) -> sqlx::Result<Vec<EventRow>> {
    let sql = format!("{}{}", SQL_EVENT_COLUMNS, SQL_LIST_EVENTS_WHERE);
    sqlx::query_as::<_, EventRow>(&sql)
        .bind(club_id)
        .fetch_all(pool)
        .await
}

pub async fn load_event(
    pool: &SqlitePool,
    event_id: &str,
    include_deleted: bool,
) -> sqlx::Result<Option<EventRow>> {
    let sql = format!("{}{}", SQL_EVENT_COLUMNS, SQL_LOAD_EVENT_WHERE);
    sqlx::query_as::<_, EventRow>(&sql)
        .bind(event_id)
        .bind(include_deleted as i64)
        .fetch_optional(pool)
        .await
}

/// True for soft-deleted events too; updates and deletes address them by id.
pub async fn event_exists(pool: &SqlitePool, event_id: &str) -> sqlx::Result<bool> {
    let n = sqlx::query_scalar::<_, i64>(SQL_EVENT_EXISTS)
        .bind(event_id)
        .fetch_one(pool)
        .await?;
    Ok(n > 0)
}

pub async fn club_exists(pool: &SqlitePool, club_id: &str) -> sqlx::Result<bool> {
    let n = sqlx::query_scalar::<_, i64>(SQL_CLUB_EXISTS)
        .bind(club_id)
        .fetch_one(pool)
        .await?;
    Ok(n > 0)
}

pub async fn insert_event(pool: &SqlitePool, event: NewEvent<'_>) -> sqlx::Result<u64> {
    let f = &event.fields;
    let res = sqlx::query(SQL_INSERT_EVENT)
        .bind(event.event_id)
        .bind(event.club_id)
        .bind(f.title)
        .bind(f.subtitle)
        .bind(f.category)
        .bind(f.description)
        .bind(f.start_date_time)
        .bind(f.end_date_time)
        .bind(f.venue)
        .bind(f.organizer_id)
        .bind(f.max_participants)
        .bind(event.created_at)
        .bind(event.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn update_event(
    pool: &SqlitePool,
    event_id: &str,
    fields: EventFields<'_>,
    updated_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_EVENT)
        .bind(fields.title)
        .bind(fields.subtitle)
        .bind(fields.category)
        .bind(fields.description)
        .bind(fields.start_date_time)
        .bind(fields.end_date_time)
        .bind(fields.venue)
        .bind(fields.organizer_id)
        .bind(fields.max_participants)
        .bind(updated_at)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn soft_delete_event(
    pool: &SqlitePool,
    event_id: &str,
    updated_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SOFT_DELETE_EVENT)
        .bind(updated_at)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
