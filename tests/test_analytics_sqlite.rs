//! Analytics against a seeded SQLite database, end to end below the HTTP layer.

mod common;

use chrono::{DateTime, TimeZone, Utc};
use club_portal::models::analytics::Trend;
use club_portal::services::analytics_collector::{collect, AnalyticsWindow, SqliteAnalyticsSource};
use club_portal::services::analytics_service::load_analytics;
use sqlx::SqlitePool;

use common::*;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    at(2026, 10, 16, 9, 30)
}

async fn seeded_pool() -> SqlitePool {
    let pool = memory_pool().await;

    insert_user(&pool, "u1", true, Some(at(2026, 10, 16, 9, 0))).await;
    insert_user(&pool, "u2", true, Some(at(2026, 10, 16, 2, 0))).await;
    insert_user(&pool, "u3", false, Some(at(2026, 10, 16, 9, 10))).await;
    insert_user(&pool, "u4", true, Some(at(2026, 10, 15, 22, 0))).await;

    insert_club(&pool, "c1", "Chess", true, false, at(2026, 10, 3, 9, 30)).await;
    insert_club(&pool, "c2", "Drama", true, false, at(2026, 9, 10, 9, 30)).await;
    insert_club(&pool, "c3", "Ghost", true, true, at(2026, 10, 5, 0, 0)).await;
    insert_club(&pool, "c4", "Dormant", false, false, at(2026, 4, 20, 0, 0)).await;

    insert_member(&pool, "m1", "c1", "u1").await;
    insert_member(&pool, "m2", "c1", "u2").await;
    insert_member(&pool, "m3", "c1", "u3").await;
    insert_member(&pool, "m4", "c2", "u1").await;
    insert_member(&pool, "m5", "c3", "u2").await;
    insert_member(&pool, "m6", "c4", "u4").await;

    insert_event(&pool, "e1", "c1", Some("WORKSHOP"), false, at(2026, 10, 5, 0, 0), at(2026, 10, 20, 18, 0)).await;
    insert_event(&pool, "e2", "c1", Some("WORKSHOP"), false, at(2026, 9, 15, 0, 0), at(2026, 9, 20, 18, 0)).await;
    insert_event(&pool, "e3", "c2", Some("SOCIAL"), false, at(2026, 9, 30, 23, 59), at(2026, 10, 16, 12, 0)).await;
    insert_event(&pool, "e4", "c2", Some("SOCIAL"), true, at(2026, 10, 10, 0, 0), at(2026, 10, 18, 12, 0)).await;
    insert_event(&pool, "e5", "c1", None, false, at(2026, 8, 1, 0, 0), at(2026, 8, 2, 10, 0)).await;

    insert_registration(&pool, "r1", "e1", "u1", at(2026, 10, 2, 10, 0)).await;
    insert_registration(&pool, "r2", "e2", "u2", at(2026, 9, 14, 10, 0)).await;
    insert_registration(&pool, "r3", "e3", "u1", at(2026, 9, 30, 23, 0)).await;
    insert_registration(&pool, "r4", "e1", "u2", at(2026, 8, 20, 10, 0)).await;

    insert_attendance(&pool, "a1", "e2", "u2", at(2026, 9, 20, 18, 5)).await;
    insert_attendance(&pool, "a2", "e5", "u1", at(2026, 8, 2, 10, 5)).await;
    insert_attendance(&pool, "a3", "e1", "u1", at(2026, 10, 1, 0, 0)).await;

    pool
}

#[tokio::test]
async fn collects_counts_with_window_and_deletion_filters() {
    let pool = seeded_pool().await;
    let source = SqliteAnalyticsSource::new(pool);
    let raw = collect(&source, &AnalyticsWindow::starting_at(&now())).await.unwrap();

    assert_eq!(raw.active_users, 2);
    assert_eq!(raw.concurrent_sessions, 1);
    assert_eq!(raw.events_today, 2);

    assert_eq!((raw.total_clubs, raw.clubs_this_month, raw.clubs_last_month), (3, 1, 1));
    assert_eq!((raw.total_events, raw.events_this_month, raw.events_last_month), (4, 1, 2));
    assert_eq!(
        (raw.total_attendance, raw.attendance_this_month, raw.attendance_last_month),
        (3, 1, 1)
    );
    assert_eq!((raw.registrations, raw.registrations_last_month), (4, 2));
    assert_eq!(raw.club_memberships, 4);

    assert_eq!(raw.club_created_at.len(), 3);
    assert_eq!(raw.event_created_at.len(), 4);
}

#[tokio::test]
async fn ranks_active_clubs_by_member_count() {
    let pool = seeded_pool().await;
    let source = SqliteAnalyticsSource::new(pool);
    let raw = collect(&source, &AnalyticsWindow::starting_at(&now())).await.unwrap();

    let ranked: Vec<(&str, i64, i64)> = raw
        .top_clubs
        .iter()
        .map(|c| (c.name.as_str(), c.member_count, c.event_count))
        .collect();
    assert_eq!(ranked, vec![("Chess", 3, 3), ("Drama", 1, 1)]);
    assert_eq!(raw.top_clubs[0].created_at, Some(at(2026, 10, 3, 9, 30)));
}

#[tokio::test]
async fn groups_live_events_by_category() {
    let pool = seeded_pool().await;
    let source = SqliteAnalyticsSource::new(pool);
    let raw = collect(&source, &AnalyticsWindow::starting_at(&now())).await.unwrap();

    let groups: Vec<(Option<&str>, i64)> = raw
        .events_by_category
        .iter()
        .map(|c| (c.category.as_deref(), c.count))
        .collect();
    assert_eq!(groups, vec![(None, 0), (Some("SOCIAL"), 1), (Some("WORKSHOP"), 2)]);
}

#[tokio::test]
async fn hand_written_timestamps_land_in_the_same_window_everywhere() {
    let pool = memory_pool().await;
    for (id, created_at) in [("c1", "2026-10-01 08:00:00"), ("c2", "2026-09-30T23:30:00-01:00")] {
        sqlx::query("INSERT INTO clubs (club_id, name, is_active, is_deleted, created_at) VALUES (?, ?, 1, 0, ?)")
            .bind(id)
            .bind(format!("Club {}", id))
            .bind(created_at)
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query(
        "INSERT INTO users (user_id, first_name, last_name, is_active, last_login, created_at) VALUES ('u1', 'A', 'B', 1, '2026-10-16 09:00:00', '2026-01-01 00:00:00')",
    )
    .execute(&pool)
    .await
    .unwrap();
    let source = SqliteAnalyticsSource::new(pool);

    let raw = collect(&source, &AnalyticsWindow::starting_at(&now())).await.unwrap();
    assert_eq!((raw.clubs_this_month, raw.clubs_last_month), (2, 0));
    assert_eq!((raw.active_users, raw.concurrent_sessions), (1, 1));

    let data = load_analytics(&source, &now()).await.unwrap();
    let october = data.monthly_growth.last().unwrap();
    assert_eq!((october.month.as_str(), october.new_clubs), ("Oct", 2));
    assert_eq!(data.summary_stats.club_growth, "100.0");
}

#[tokio::test]
async fn assembles_dashboard_payload() {
    let pool = seeded_pool().await;
    let source = SqliteAnalyticsSource::new(pool);
    let data = load_analytics(&source, &now()).await.unwrap();

    assert_eq!(data.system_health.overall, 100);
    assert_eq!(data.summary_stats.club_growth, "0.0");
    assert_eq!(data.summary_stats.event_growth, "-50.0");
    assert_eq!(data.summary_stats.attendance_growth, "0.0");

    assert_eq!(data.engagement_metrics[0].value, 100);
    assert_eq!(data.engagement_metrics[1].value, 75);
    assert_eq!(data.engagement_metrics[2].value, 1);
    assert_eq!(data.performance_metrics.content_quality.value, "1.3");
    assert_eq!(data.performance_metrics.content_quality.change, "-50.0%");
    assert_eq!(data.performance_metrics.content_quality.trend, Trend::Down);

    assert_eq!(data.top_performers.len(), 2);
    assert_eq!(data.top_performers[0].growth, "+7%");
    assert_eq!(data.top_performers[0].score, 91.3);
    assert_eq!(data.top_performers[1].growth, "+1%");
    assert_eq!(data.top_performers[1].score, 87.1);

    let trend: Vec<(&str, i64, i64)> = data
        .monthly_growth
        .iter()
        .map(|m| (m.month.as_str(), m.new_clubs, m.new_events))
        .collect();
    assert_eq!(
        trend,
        vec![
            ("May", 0, 0),
            ("Jun", 0, 0),
            ("Jul", 0, 0),
            ("Aug", 0, 1),
            ("Sep", 1, 2),
            ("Oct", 1, 1),
        ]
    );

    let geo: Vec<i64> = data.geographic_data.iter().map(|g| g.clubs).collect();
    assert_eq!(geo, vec![1, 0, 0, 0, 0, 0]);
}

#[tokio::test]
async fn empty_database_yields_zeroed_dashboard() {
    let pool = memory_pool().await;
    let source = SqliteAnalyticsSource::new(pool);
    let data = load_analytics(&source, &now()).await.unwrap();

    assert_eq!(data.summary_stats.total_clubs, 0);
    assert_eq!(data.summary_stats.club_growth, "0.0");
    assert_eq!(data.summary_stats.event_growth, "0.0");
    assert_eq!(data.summary_stats.attendance_growth, "0.0");
    assert_eq!(data.performance_metrics.club_participation.value, "0.0");
    assert_eq!(data.performance_metrics.content_quality.value, "0.0");
    assert!(data.geographic_data.iter().all(|g| g.clubs == 0));
    assert_eq!(data.monthly_growth.len(), 6);
    assert!(data.top_performers.is_empty());
    assert!(data.events_by_category.is_empty());
    // Only the events-today signal is up on an empty system.
    assert_eq!(data.system_health.overall, 25);
}

#[tokio::test]
async fn missing_table_fails_whole_computation() {
    let pool = seeded_pool().await;
    sqlx::query("DROP TABLE event_attendance").execute(&pool).await.unwrap();
    let source = SqliteAnalyticsSource::new(pool);

    let err = load_analytics(&source, &now()).await.unwrap_err();
    assert!(err.query().contains("attendance"), "unexpected query {}", err.query());
}
