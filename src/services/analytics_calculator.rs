//! Derived dashboard metrics. Pure functions of the collected counts; no I/O.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::services::analytics_collector::{first_of_month, shift_month, RawAnalytics, RankedClub};

pub const TREND_MONTHS: u32 = 6;
pub const TOP_PERFORMERS: usize = 4;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Fixed regional split of the club total, in whole percent.
pub const REGIONS: [(&str, i64, &str); 6] = [
    ("Western Province", 35, "#f97316"),
    ("Central Province", 18, "#ef4444"),
    ("Southern Province", 15, "#fb923c"),
    ("North Western Province", 12, "#f87171"),
    ("Eastern Province", 10, "#fbbf24"),
    ("Other Provinces", 10, "#fdba74"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub new_clubs: i64,
    pub new_events: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformerScore {
    pub name: String,
    pub members: i64,
    pub events: i64,
    pub days_since_creation: i64,
    pub growth_rate: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionShare {
    pub region: &'static str,
    pub color: &'static str,
    pub clubs: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub user_engagement: f64,
    pub last_month_user_engagement: f64,
    pub user_engagement_change: f64,
    pub event_success_rate: f64,
    pub club_growth: f64,
    pub event_growth: f64,
    pub attendance_growth: f64,
    pub avg_members_per_club: f64,
    pub avg_events_per_club: f64,
    pub monthly_trend: Vec<MonthBucket>,
    pub top_performers: Vec<PerformerScore>,
    pub system_health: u32,
    pub geographic: Vec<RegionShare>,
}

pub fn derive<Tz: TimeZone>(raw: &RawAnalytics, now: &DateTime<Tz>) -> DerivedMetrics {
    let user_engagement = user_engagement(raw.registrations, raw.active_users);
    let last_month_user_engagement =
        last_month_user_engagement(raw.registrations_last_month, raw.active_users);

    DerivedMetrics {
        user_engagement,
        last_month_user_engagement,
        user_engagement_change: percent_change(user_engagement, last_month_user_engagement),
        event_success_rate: capped_ratio(raw.total_attendance, raw.registrations),
        club_growth: growth_rate(raw.clubs_this_month, raw.clubs_last_month),
        event_growth: growth_rate(raw.events_this_month, raw.events_last_month),
        attendance_growth: growth_rate(raw.attendance_this_month, raw.attendance_last_month),
        avg_members_per_club: avg_members_per_club(raw.club_memberships, raw.total_clubs),
        avg_events_per_club: avg_events_per_club(raw.total_events, raw.total_clubs),
        monthly_trend: monthly_trend(&raw.club_created_at, &raw.event_created_at, now),
        top_performers: top_performers(&raw.top_clubs, &now.with_timezone(&Utc)),
        system_health: system_health_score(raw),
        geographic: geographic_distribution(raw.total_clubs),
    }
}

/// `numerator / denominator` as a percentage capped at 100; 0 without a denominator.
fn capped_ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator <= 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64 * 100.0).min(100.0)
}

pub fn user_engagement(registrations: i64, active_users: i64) -> f64 {
    capped_ratio(registrations, active_users)
}

/// Denominator for last month's engagement: today's active users less 10%, at least 1.
pub fn estimated_last_month_active_users(active_users: i64) -> i64 {
    (active_users - active_users / 10).max(1)
}

pub fn last_month_user_engagement(registrations_last_month: i64, active_users: i64) -> f64 {
    if registrations_last_month <= 0 {
        return 0.0;
    }
    capped_ratio(
        registrations_last_month,
        estimated_last_month_active_users(active_users),
    )
}

/// Relative change from `previous` to `current`, in percent.
///
/// Without a previous value any current value counts as +100%.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Month-over-month growth of a count.
pub fn growth_rate(this_month: i64, last_month: i64) -> f64 {
    percent_change(this_month as f64, last_month as f64)
}

pub fn avg_members_per_club(memberships: i64, total_clubs: i64) -> f64 {
    if total_clubs <= 0 {
        return 0.0;
    }
    (memberships as f64 / total_clubs as f64).round()
}

pub fn avg_events_per_club(total_events: i64, total_clubs: i64) -> f64 {
    if total_clubs <= 0 {
        return 0.0;
    }
    (total_events as f64 / total_clubs as f64 * 10.0).round() / 10.0
}

/// Six calendar-month buckets ending with `now`'s month, oldest first.
pub fn monthly_trend<Tz: TimeZone>(
    club_created_at: &[DateTime<Utc>],
    event_created_at: &[DateTime<Utc>],
    now: &DateTime<Tz>,
) -> Vec<MonthBucket> {
    let tz = now.timezone();
    let by_month = |stamps: &[DateTime<Utc>]| {
        let mut counts: HashMap<(i32, u32), i64> = HashMap::new();
        for at in stamps {
            let local = at.with_timezone(&tz);
            *counts.entry((local.year(), local.month())).or_default() += 1;
        }
        counts
    };
    let clubs = by_month(club_created_at);
    let events = by_month(event_created_at);

    let today = now.naive_local().date();
    (0..TREND_MONTHS as i32)
        .rev()
        .map(|back| {
            let key = shift_month(today.year(), today.month(), -back);
            MonthBucket {
                year: key.0,
                month: key.1,
                label: first_of_month(key.0, key.1).format("%b").to_string(),
                new_clubs: clubs.get(&key).copied().unwrap_or(0),
                new_events: events.get(&key).copied().unwrap_or(0),
            }
        })
        .collect()
}

pub fn performer_score(club: &RankedClub, now: &DateTime<Utc>) -> PerformerScore {
    let days_since_creation = club
        .created_at
        .map(|created| (*now - created).num_milliseconds().div_euclid(MS_PER_DAY))
        .unwrap_or(0);

    let growth_rate = if days_since_creation > 0 {
        (club.member_count as f64 / days_since_creation as f64 * 30.0).min(100.0)
    } else {
        0.0
    };
    let score = (85.0 + club.event_count as f64 * 2.0 + club.member_count as f64 / 10.0).min(100.0);

    PerformerScore {
        name: club.name.clone(),
        members: club.member_count,
        events: club.event_count,
        days_since_creation,
        growth_rate,
        score,
    }
}

/// The first four ranked clubs, scored.
pub fn top_performers(ranked: &[RankedClub], now: &DateTime<Utc>) -> Vec<PerformerScore> {
    ranked
        .iter()
        .take(TOP_PERFORMERS)
        .map(|club| performer_score(club, now))
        .collect()
}

/// Coarse 0..=100 composite: 25 points per signal present.
pub fn system_health_score(raw: &RawAnalytics) -> u32 {
    [
        raw.active_users > 0,
        raw.concurrent_sessions > 0,
        raw.events_today >= 0,
        raw.total_clubs > 0,
    ]
    .into_iter()
    .filter(|up| *up)
    .count() as u32
        * 25
}

pub fn geographic_distribution(total_clubs: i64) -> Vec<RegionShare> {
    REGIONS
        .iter()
        .map(|&(region, percent, color)| RegionShare {
            region,
            color,
            clubs: (total_clubs * percent).div_euclid(100),
        })
        .collect()
}
