use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::models::analytics::{
    AnalyticsData, EngagementMetric, GeographicShare, LiveMetrics, MonthlyGrowth,
    PerformanceMetric, PerformanceMetrics, SummaryStats, SystemHealth, TopPerformer, Trend,
};
use crate::services::analytics_calculator::{self, DerivedMetrics};
use crate::services::analytics_collector::{self, AnalyticsSource, AnalyticsWindow, RawAnalytics};
use crate::services::error::AnalyticsError;

/// Collects, derives and shapes the dashboard payload for the instant `now`.
pub async fn load_analytics<S, Tz>(source: &S, now: &DateTime<Tz>) -> Result<AnalyticsData, AnalyticsError>
where
    S: AnalyticsSource + ?Sized,
    Tz: TimeZone,
{
    let window = AnalyticsWindow::starting_at(now);
    let raw = analytics_collector::collect(source, &window).await?;
    let derived = analytics_calculator::derive(&raw, now);

    info!(
        active_users = raw.active_users,
        total_clubs = raw.total_clubs,
        total_events = raw.total_events,
        system_health = derived.system_health,
        "analytics computed"
    );

    Ok(assemble(&raw, &derived))
}

/// Shapes raw and derived numbers into the dashboard schema.
pub fn assemble(raw: &RawAnalytics, derived: &DerivedMetrics) -> AnalyticsData {
    AnalyticsData {
        live_metrics: LiveMetrics {
            active_users: raw.active_users,
            concurrent_sessions: raw.concurrent_sessions,
            events_today: raw.events_today,
            active_users_change: format!(
                "+{}",
                if raw.active_users > 100 {
                    raw.active_users * 15 / 100
                } else {
                    raw.active_users
                }
            ),
            sessions_change: format!(
                "+{}",
                if raw.concurrent_sessions > 10 {
                    raw.concurrent_sessions / 5
                } else {
                    raw.concurrent_sessions
                }
            ),
            events_today_change: format!("+{}", raw.events_today),
        },
        system_health: SystemHealth {
            overall: derived.system_health,
            server_uptime: 99.9,
            database_performance: 95.2,
            api_response_rate: 98.7,
            user_satisfaction: 96.1,
        },
        summary_stats: SummaryStats {
            total_clubs: raw.total_clubs,
            total_events: raw.total_events,
            total_members: raw.club_memberships,
            total_attendance: raw.total_attendance,
            club_growth: to_fixed(derived.club_growth, 1),
            event_growth: to_fixed(derived.event_growth, 1),
            attendance_growth: to_fixed(derived.attendance_growth, 1),
        },
        engagement_metrics: vec![
            engagement("User Engagement", derived.user_engagement, 75),
            engagement("Event Attendance Rate", derived.event_success_rate, 80),
            engagement("Avg Members per Club", derived.avg_members_per_club, 50),
            engagement("Avg Events per Club", derived.avg_events_per_club, 10),
        ],
        performance_metrics: PerformanceMetrics {
            user_engagement: performance(
                derived.user_engagement.min(100.0),
                derived.user_engagement_change,
                derived.user_engagement_change,
            ),
            event_success_rate: performance(
                derived.event_success_rate.min(100.0),
                derived.attendance_growth,
                derived.attendance_growth,
            ),
            club_participation: performance(
                derived.avg_members_per_club,
                derived.club_growth,
                derived.club_growth,
            ),
            content_quality: performance(
                derived.avg_events_per_club,
                derived.event_growth,
                derived.event_growth,
            ),
            growth_velocity: performance(
                derived.club_growth.abs(),
                derived.attendance_growth,
                derived.club_growth,
            ),
        },
        top_performers: derived
            .top_performers
            .iter()
            .map(|p| TopPerformer {
                name: p.name.clone(),
                members: p.members,
                events: p.events,
                score: p.score,
                growth: format!("+{}%", to_fixed(p.growth_rate, 0)),
            })
            .collect(),
        monthly_growth: derived
            .monthly_trend
            .iter()
            .map(|b| MonthlyGrowth {
                month: b.label.clone(),
                new_clubs: b.new_clubs,
                new_events: b.new_events,
            })
            .collect(),
        geographic_data: derived
            .geographic
            .iter()
            .map(|g| GeographicShare {
                region: g.region,
                clubs: g.clubs,
                color: g.color,
            })
            .collect(),
        events_by_category: raw.events_by_category.clone(),
    }
}

fn engagement(metric: &'static str, value: f64, target: i64) -> EngagementMetric {
    EngagementMetric {
        metric,
        value: (value.round() as i64).min(100),
        target,
    }
}

/// `trend_source` decides the arrow; it is not always the change shown.
fn performance(value: f64, change: f64, trend_source: f64) -> PerformanceMetric {
    PerformanceMetric {
        value: to_fixed(value, 1),
        change: signed_percent(change),
        trend: trend(trend_source),
    }
}

pub fn trend(change: f64) -> Trend {
    if change >= 0.0 {
        Trend::Up
    } else {
        Trend::Down
    }
}

/// Fixed-point rendering with halves rounded away from zero.
pub fn to_fixed(value: f64, digits: u32) -> String {
    let scale = 10_f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid "-0.0" for values that round to zero from below.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", digits as usize, rounded)
}

/// `+x.x%` for gains, `x.x%` otherwise.
pub fn signed_percent(change: f64) -> String {
    if change > 0.0 {
        format!("+{}%", to_fixed(change, 1))
    } else {
        format!("{}%", to_fixed(change, 1))
    }
}
