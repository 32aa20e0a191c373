//! Wire schema of the admin analytics dashboard.
//!
//! Field names are part of the contract with the dashboard UI, which indexes
//! by name. Decimal values the UI shows verbatim are pre-formatted strings.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub live_metrics: LiveMetrics,
    pub system_health: SystemHealth,
    pub summary_stats: SummaryStats,
    pub engagement_metrics: Vec<EngagementMetric>,
    pub performance_metrics: PerformanceMetrics,
    pub top_performers: Vec<TopPerformer>,
    pub monthly_growth: Vec<MonthlyGrowth>,
    pub geographic_data: Vec<GeographicShare>,
    pub events_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetrics {
    pub active_users: i64,
    pub concurrent_sessions: i64,
    pub events_today: i64,
    pub active_users_change: String,
    pub sessions_change: String,
    pub events_today_change: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub overall: u32,
    pub server_uptime: f64,
    pub database_performance: f64,
    pub api_response_rate: f64,
    pub user_satisfaction: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_clubs: i64,
    pub total_events: i64,
    pub total_members: i64,
    pub total_attendance: i64,
    pub club_growth: String,
    pub event_growth: String,
    pub attendance_growth: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementMetric {
    pub metric: &'static str,
    pub value: i64,
    pub target: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetric {
    pub value: String,
    pub change: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub user_engagement: PerformanceMetric,
    pub event_success_rate: PerformanceMetric,
    pub club_participation: PerformanceMetric,
    pub content_quality: PerformanceMetric,
    pub growth_velocity: PerformanceMetric,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPerformer {
    pub name: String,
    pub members: i64,
    pub events: i64,
    pub score: f64,
    pub growth: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyGrowth {
    pub month: String,
    pub new_clubs: i64,
    pub new_events: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeographicShare {
    pub region: &'static str,
    pub clubs: i64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}
