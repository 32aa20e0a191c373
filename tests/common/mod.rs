//! Shared fixtures: an in-memory database with the real schema and small seeders.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use club_portal::database::{schema, timestamp};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub async fn memory_pool() -> SqlitePool {
    // One long-lived connection: every new in-memory connection would be an empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    schema::apply_schema(&pool).await.unwrap();
    pool
}

pub async fn insert_user(pool: &SqlitePool, id: &str, active: bool, last_login: Option<DateTime<Utc>>) {
    sqlx::query(
        "INSERT INTO users (user_id, first_name, last_name, is_active, last_login, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(format!("First{}", id))
    .bind(format!("Last{}", id))
    .bind(active as i64)
    .bind(last_login.map(|t| timestamp::encode(&t)))
    .bind(timestamp::encode(&Utc::now()))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_club(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    active: bool,
    deleted: bool,
    created_at: DateTime<Utc>,
) {
    sqlx::query("INSERT INTO clubs (club_id, name, is_active, is_deleted, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(active as i64)
        .bind(deleted as i64)
        .bind(timestamp::encode(&created_at))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_member(pool: &SqlitePool, id: &str, club_id: &str, user_id: &str) {
    sqlx::query("INSERT INTO club_members (member_id, club_id, user_id, joined_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(club_id)
        .bind(user_id)
        .bind(timestamp::encode(&Utc::now()))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_event(
    pool: &SqlitePool,
    id: &str,
    club_id: &str,
    category: Option<&str>,
    deleted: bool,
    created_at: DateTime<Utc>,
    starts_at: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO events (event_id, club_id, title, category, start_date_time, is_deleted, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(club_id)
    .bind(format!("Event {}", id))
    .bind(category)
    .bind(timestamp::encode(&starts_at))
    .bind(deleted as i64)
    .bind(timestamp::encode(&created_at))
    .bind(timestamp::encode(&created_at))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_registration(pool: &SqlitePool, id: &str, event_id: &str, user_id: &str, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO event_registrations (registration_id, event_id, user_id, registered_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(event_id)
        .bind(user_id)
        .bind(timestamp::encode(&at))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_attendance(pool: &SqlitePool, id: &str, event_id: &str, user_id: &str, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO event_attendance (attendance_id, event_id, user_id, attend_time) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(event_id)
        .bind(user_id)
        .bind(timestamp::encode(&at))
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_feedback(
    pool: &SqlitePool,
    id: &str,
    user_id: Option<&str>,
    club_id: Option<&str>,
    rating: i64,
    created_at: DateTime<Utc>,
) {
    sqlx::query("INSERT INTO feedbacks (feedback_id, user_id, club_id, rating, comment, created_at) VALUES (?, ?, ?, ?, ?, ?)")
        .bind(id)
        .bind(user_id)
        .bind(club_id)
        .bind(rating)
        .bind(format!("comment {}", id))
        .bind(timestamp::encode(&created_at))
        .execute(pool)
        .await
        .unwrap();
}
