//! Fan-out of the read-only queries behind the analytics dashboard.
//!
//! Reads are issued concurrently and independently, so counts may come from
//! slightly different moments when writes race the batch. The dashboard
//! accepts that; there is no wrapping transaction.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::database::{analytics_repo, timestamp};
use crate::models::analytics::CategoryCount;
use crate::services::error::AnalyticsError;

/// How many ranked clubs the collector fetches.
pub const TOP_CLUBS_LIMIT: i64 = 10;

/// Half-open `[from, until)` interval; no `until` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub until: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.from && self.until.map_or(true, |until| *at < until)
    }

    fn encode(&self) -> (String, Option<String>) {
        (
            timestamp::encode(&self.from),
            self.until.as_ref().map(timestamp::encode),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsWindow {
    pub now: DateTime<Utc>,
    pub start_of_today: DateTime<Utc>,
    pub start_of_month: DateTime<Utc>,
    pub start_of_last_month: DateTime<Utc>,
    pub last_hour: DateTime<Utc>,
}

impl AnalyticsWindow {
    /// Boundaries relative to `now`, with days and months taken in `now`'s timezone.
    pub fn starting_at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let local = now.naive_local().date();
        let (year, month) = (local.year(), local.month());
        let (last_year, last_month) = shift_month(year, month, -1);

        AnalyticsWindow {
            now: now.with_timezone(&Utc),
            start_of_today: local_midnight(&tz, local),
            start_of_month: local_midnight(&tz, first_of_month(year, month)),
            start_of_last_month: local_midnight(&tz, first_of_month(last_year, last_month)),
            last_hour: now.with_timezone(&Utc) - Duration::minutes(60),
        }
    }

    pub fn this_month(&self) -> TimeRange {
        TimeRange {
            from: self.start_of_month,
            until: None,
        }
    }

    /// The whole previous calendar month; it ends where this month starts.
    pub fn last_month(&self) -> TimeRange {
        TimeRange {
            from: self.start_of_last_month,
            until: Some(self.start_of_month),
        }
    }
}

/// `(year, month)` moved by `delta` calendar months.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(at) => at.with_timezone(&Utc),
        // Midnight skipped by a DST jump: the day starts at the first valid instant after it.
        None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedClub {
    pub id: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub member_count: i64,
    pub event_count: i64,
}

/// Everything the dashboard derives its numbers from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAnalytics {
    pub active_users: i64,
    pub concurrent_sessions: i64,
    pub events_today: i64,
    pub total_clubs: i64,
    pub clubs_this_month: i64,
    pub clubs_last_month: i64,
    pub total_events: i64,
    pub events_this_month: i64,
    pub events_last_month: i64,
    pub total_attendance: i64,
    pub attendance_this_month: i64,
    pub attendance_last_month: i64,
    pub registrations: i64,
    pub registrations_last_month: i64,
    pub club_memberships: i64,
    pub top_clubs: Vec<RankedClub>,
    pub events_by_category: Vec<CategoryCount>,
    pub club_created_at: Vec<DateTime<Utc>>,
    pub event_created_at: Vec<DateTime<Utc>>,
}

/// Read access the analytics computation needs from storage.
///
/// A `None` range means "all time".
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn count_active_users_since(&self, since: DateTime<Utc>) -> sqlx::Result<i64>;
    async fn count_events_starting_since(&self, since: DateTime<Utc>) -> sqlx::Result<i64>;
    async fn count_clubs(&self, created: Option<TimeRange>) -> sqlx::Result<i64>;
    async fn count_events(&self, created: Option<TimeRange>) -> sqlx::Result<i64>;
    async fn count_attendance(&self, attended: Option<TimeRange>) -> sqlx::Result<i64>;
    async fn count_registrations(&self, registered: Option<TimeRange>) -> sqlx::Result<i64>;
    async fn count_active_club_memberships(&self) -> sqlx::Result<i64>;
    async fn list_top_clubs(&self, limit: i64) -> sqlx::Result<Vec<RankedClub>>;
    async fn count_events_by_category(&self) -> sqlx::Result<Vec<CategoryCount>>;
    async fn list_club_created_at(&self) -> sqlx::Result<Vec<DateTime<Utc>>>;
    async fn list_event_created_at(&self) -> sqlx::Result<Vec<DateTime<Utc>>>;
}

#[derive(Debug, Clone)]
pub struct SqliteAnalyticsSource {
    pool: SqlitePool,
}

impl SqliteAnalyticsSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn decode_timestamps(kind: &str, raw: Vec<String>) -> Vec<DateTime<Utc>> {
    raw.iter()
        .filter_map(|s| {
            let decoded = timestamp::decode(s);
            if decoded.is_none() {
                warn!(kind, value = %s, "skipping unparseable created_at");
            }
            decoded
        })
        .collect()
}

#[async_trait]
impl AnalyticsSource for SqliteAnalyticsSource {
    async fn count_active_users_since(&self, since: DateTime<Utc>) -> sqlx::Result<i64> {
        analytics_repo::count_active_users_since(&self.pool, &timestamp::encode(&since)).await
    }

    async fn count_events_starting_since(&self, since: DateTime<Utc>) -> sqlx::Result<i64> {
        analytics_repo::count_events_starting_since(&self.pool, &timestamp::encode(&since)).await
    }

    async fn count_clubs(&self, created: Option<TimeRange>) -> sqlx::Result<i64> {
        match created {
            None => analytics_repo::count_clubs(&self.pool).await,
            Some(r) => {
                let (from, until) = r.encode();
                analytics_repo::count_clubs_created_between(&self.pool, &from, until.as_deref()).await
            }
        }
    }

    async fn count_events(&self, created: Option<TimeRange>) -> sqlx::Result<i64> {
        match created {
            None => analytics_repo::count_events(&self.pool).await,
            Some(r) => {
                let (from, until) = r.encode();
                analytics_repo::count_events_created_between(&self.pool, &from, until.as_deref()).await
            }
        }
    }

    async fn count_attendance(&self, attended: Option<TimeRange>) -> sqlx::Result<i64> {
        match attended {
            None => analytics_repo::count_attendance(&self.pool).await,
            Some(r) => {
                let (from, until) = r.encode();
                analytics_repo::count_attendance_between(&self.pool, &from, until.as_deref()).await
            }
        }
    }

    async fn count_registrations(&self, registered: Option<TimeRange>) -> sqlx::Result<i64> {
        match registered {
            None => analytics_repo::count_registrations(&self.pool).await,
            Some(r) => {
                let (from, until) = r.encode();
                analytics_repo::count_registrations_between(&self.pool, &from, until.as_deref()).await
            }
        }
    }

    async fn count_active_club_memberships(&self) -> sqlx::Result<i64> {
        analytics_repo::count_active_club_memberships(&self.pool).await
    }

    async fn list_top_clubs(&self, limit: i64) -> sqlx::Result<Vec<RankedClub>> {
        let rows = analytics_repo::list_top_clubs(&self.pool, limit).await?;
        Ok(rows
            .into_iter()
            .map(|row| RankedClub {
                created_at: timestamp::decode(&row.created_at),
                id: row.club_id,
                name: row.name,
                member_count: row.member_count,
                event_count: row.event_count,
            })
            .collect())
    }

    async fn count_events_by_category(&self) -> sqlx::Result<Vec<CategoryCount>> {
        let rows = analytics_repo::count_events_by_category(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| CategoryCount {
                category: row.category,
                count: row.count,
            })
            .collect())
    }

    async fn list_club_created_at(&self) -> sqlx::Result<Vec<DateTime<Utc>>> {
        let raw = analytics_repo::list_club_created_at(&self.pool).await?;
        Ok(decode_timestamps("club", raw))
    }

    async fn list_event_created_at(&self) -> sqlx::Result<Vec<DateTime<Utc>>> {
        let raw = analytics_repo::list_event_created_at(&self.pool).await?;
        Ok(decode_timestamps("event", raw))
    }
}

async fn tagged<T>(
    query: &'static str,
    fut: impl Future<Output = sqlx::Result<T>>,
) -> Result<T, AnalyticsError> {
    fut.await
        .map_err(|source| AnalyticsError::Query { query, source })
}

/// Runs every dashboard query concurrently and waits for all of them.
///
/// The first failing query aborts the whole batch; no partial result escapes.
pub async fn collect<S>(source: &S, window: &AnalyticsWindow) -> Result<RawAnalytics, AnalyticsError>
where
    S: AnalyticsSource + ?Sized,
{
    let started = Instant::now();
    let this_month = Some(window.this_month());
    let last_month = Some(window.last_month());

    let (
        active_users,
        concurrent_sessions,
        events_today,
        total_clubs,
        clubs_this_month,
        clubs_last_month,
        total_events,
        events_this_month,
        events_last_month,
        total_attendance,
        attendance_this_month,
        attendance_last_month,
        registrations,
        registrations_last_month,
        club_memberships,
        top_clubs,
        events_by_category,
        club_created_at,
        event_created_at,
    ) = tokio::try_join!(
        tagged("active_users", source.count_active_users_since(window.start_of_today)),
        tagged("concurrent_sessions", source.count_active_users_since(window.last_hour)),
        tagged("events_today", source.count_events_starting_since(window.start_of_today)),
        tagged("total_clubs", source.count_clubs(None)),
        tagged("clubs_this_month", source.count_clubs(this_month)),
        tagged("clubs_last_month", source.count_clubs(last_month)),
        tagged("total_events", source.count_events(None)),
        tagged("events_this_month", source.count_events(this_month)),
        tagged("events_last_month", source.count_events(last_month)),
        tagged("total_attendance", source.count_attendance(None)),
        tagged("attendance_this_month", source.count_attendance(this_month)),
        tagged("attendance_last_month", source.count_attendance(last_month)),
        tagged("registrations", source.count_registrations(None)),
        tagged("registrations_last_month", source.count_registrations(last_month)),
        tagged("club_memberships", source.count_active_club_memberships()),
        tagged("top_clubs", source.list_top_clubs(TOP_CLUBS_LIMIT)),
        tagged("events_by_category", source.count_events_by_category()),
        tagged("club_created_at", source.list_club_created_at()),
        tagged("event_created_at", source.list_event_created_at()),
    )?;

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analytics queries completed"
    );

    Ok(RawAnalytics {
        active_users,
        concurrent_sessions,
        events_today,
        total_clubs,
        clubs_this_month,
        clubs_last_month,
        total_events,
        events_this_month,
        events_last_month,
        total_attendance,
        attendance_this_month,
        attendance_last_month,
        registrations,
        registrations_last_month,
        club_memberships,
        top_clubs,
        events_by_category,
        club_created_at,
        event_created_at,
    })
}
