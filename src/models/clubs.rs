#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopClubRow {
    pub club_id: String,
    pub name: String,
    pub created_at: String,
    pub member_count: i64,
    pub event_count: i64,
}
