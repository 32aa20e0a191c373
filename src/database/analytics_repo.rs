use sqlx::SqlitePool;

use crate::models::{CategoryCountRow, TopClubRow};

// Range filters compare `strftime`-normalised columns against canonical bounds,
// so rows stored without the `T`/millis/`Z` form still land in the right window.

const SQL_COUNT_ACTIVE_USERS_SINCE: &str = r#"
SELECT COUNT(*)
FROM users
WHERE is_active = 1
  AND strftime('%Y-%m-%dT%H:%M:%fZ', last_login) >= ?1
"#;

const SQL_COUNT_EVENTS_STARTING_SINCE: &str = r#"
SELECT COUNT(*)
FROM events
WHERE is_deleted = 0
  AND strftime('%Y-%m-%dT%H:%M:%fZ', start_date_time) >= ?1
"#;

const SQL_COUNT_CLUBS: &str = r#"
SELECT COUNT(*)
FROM clubs
WHERE is_deleted = 0
"#;

const SQL_COUNT_CLUBS_CREATED_BETWEEN: &str = r#"
SELECT COUNT(*)
FROM clubs
WHERE is_deleted = 0
  AND strftime('%Y-%m-%dT%H:%M:%fZ', created_at) >= ?1
  AND (?2 IS NULL OR strftime('%Y-%m-%dT%H:%M:%fZ', created_at) < ?2)
"#;

const SQL_COUNT_EVENTS: &str = r#"
SELECT COUNT(*)
FROM events
WHERE is_deleted = 0
"#;

const SQL_COUNT_EVENTS_CREATED_BETWEEN: &str = r#"
SELECT COUNT(*)
FROM events
WHERE is_deleted = 0
  AND strftime('%Y-%m-%dT%H:%M:%fZ', created_at) >= ?1
  AND (?2 IS NULL OR strftime('%Y-%m-%dT%H:%M:%fZ', created_at) < ?2)
"#;

const SQL_COUNT_ATTENDANCE: &str = r#"
SELECT COUNT(*)
FROM event_attendance
"#;

const SQL_COUNT_ATTENDANCE_BETWEEN: &str = r#"
SELECT COUNT(*)
FROM event_attendance
WHERE strftime('%Y-%m-%dT%H:%M:%fZ', attend_time) >= ?1
  AND (?2 IS NULL OR strftime('%Y-%m-%dT%H:%M:%fZ', attend_time) < ?2)
"#;

const SQL_COUNT_REGISTRATIONS: &str = r#"
SELECT COUNT(*)
FROM event_registrations
"#;

const SQL_COUNT_REGISTRATIONS_BETWEEN: &str = r#"
SELECT COUNT(*)
FROM event_registrations
WHERE strftime('%Y-%m-%dT%H:%M:%fZ', registered_at) >= ?1
  AND (?2 IS NULL OR strftime('%Y-%m-%dT%H:%M:%fZ', registered_at) < ?2)
"#;

const SQL_COUNT_ACTIVE_CLUB_MEMBERSHIPS: &str = r#"
SELECT COUNT(*)
FROM club_members m
JOIN clubs c ON c.club_id = m.club_id
WHERE c.is_active = 1
  AND c.is_deleted = 0
"#;

const SQL_LIST_TOP_CLUBS: &str = r#"
SELECT
  c.club_id,
  c.name,
  c.created_at,
  (
    SELECT COUNT(*)
    FROM club_members m
    WHERE m.club_id = c.club_id
  ) AS member_count,
  (
    SELECT COUNT(*)
    FROM events e
    WHERE e.club_id = c.club_id
      AND e.is_deleted = 0
  ) AS event_count
FROM clubs c
WHERE c.is_active = 1
  AND c.is_deleted = 0
ORDER BY member_count DESC, strftime('%Y-%m-%dT%H:%M:%fZ', c.created_at) ASC, c.club_id ASC
LIMIT ?1
"#;

const SQL_COUNT_EVENTS_BY_CATEGORY: &str = r#"
SELECT
  category,
  COUNT(category) AS count
FROM events
WHERE is_deleted = 0
GROUP BY category
ORDER BY category
"#;

const SQL_LIST_CLUB_CREATED_AT: &str = r#"
SELECT created_at
FROM clubs
WHERE is_deleted = 0
"#;

const SQL_LIST_EVENT_CREATED_AT: &str = r#"
SELECT created_at
FROM events
WHERE is_deleted = 0
"#;

async fn count(pool: &SqlitePool, sql: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await
}

async fn count_since(pool: &SqlitePool, sql: &str, since: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(since)
        .fetch_one(pool)
        .await
}

/// `until` of `None` leaves the range open-ended.
async fn count_between(
    pool: &SqlitePool,
    sql: &str,
    from: &str,
    until: Option<&str>,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(from)
        .bind(until)
        .fetch_one(pool)
        .await
}

pub async fn count_active_users_since(pool: &SqlitePool, since: &str) -> sqlx::Result<i64> {
    count_since(pool, SQL_COUNT_ACTIVE_USERS_SINCE, since).await
}

pub async fn count_events_starting_since(pool: &SqlitePool, since: &str) -> sqlx::Result<i64> {
    count_since(pool, SQL_COUNT_EVENTS_STARTING_SINCE, since).await
}

pub async fn count_clubs(pool: &SqlitePool) -> sqlx::Result<i64> {
    count(pool, SQL_COUNT_CLUBS).await
}

pub async fn count_clubs_created_between(
    pool: &SqlitePool,
    from: &str,
    until: Option<&str>,
) -> sqlx::Result<i64> {
    count_between(pool, SQL_COUNT_CLUBS_CREATED_BETWEEN, from, until).await
}

pub async fn count_events(pool: &SqlitePool) -> sqlx::Result<i64> {
    count(pool, SQL_COUNT_EVENTS).await
}

pub async fn count_events_created_between(
    pool: &SqlitePool,
    from: &str,
    until: Option<&str>,
) -> sqlx::Result<i64> {
    count_between(pool, SQL_COUNT_EVENTS_CREATED_BETWEEN, from, until).await
}

pub async fn count_attendance(pool: &SqlitePool) -> sqlx::Result<i64> {
    count(pool, SQL_COUNT_ATTENDANCE).await
}

pub async fn count_attendance_between(
    pool: &SqlitePool,
    from: &str,
    until: Option<&str>,
) -> sqlx::Result<i64> {
    count_between(pool, SQL_COUNT_ATTENDANCE_BETWEEN, from, until).await
}

pub async fn count_registrations(pool: &SqlitePool) -> sqlx::Result<i64> {
    count(pool, SQL_COUNT_REGISTRATIONS).await
}

pub async fn count_registrations_between(
    pool: &SqlitePool,
    from: &str,
    until: Option<&str>,
) -> sqlx::Result<i64> {
    count_between(pool, SQL_COUNT_REGISTRATIONS_BETWEEN, from, until).await
}

pub async fn count_active_club_memberships(pool: &SqlitePool) -> sqlx::Result<i64> {
    count(pool, SQL_COUNT_ACTIVE_CLUB_MEMBERSHIPS).await
}

pub async fn list_top_clubs(pool: &SqlitePool, limit: i64) -> sqlx::Result<Vec<TopClubRow>> {
    sqlx::query_as::<_, TopClubRow>(SQL_LIST_TOP_CLUBS)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub async fn count_events_by_category(pool: &SqlitePool) -> sqlx::Result<Vec<CategoryCountRow>> {
    sqlx::query_as::<_, CategoryCountRow>(SQL_COUNT_EVENTS_BY_CATEGORY)
        .fetch_all(pool)
        .await
}

pub async fn list_club_created_at(pool: &SqlitePool) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(SQL_LIST_CLUB_CREATED_AT)
        .fetch_all(pool)
        .await
}

pub async fn list_event_created_at(pool: &SqlitePool) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(SQL_LIST_EVENT_CREATED_AT)
        .fetch_all(pool)
        .await
}
