use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackRow {
    pub feedback_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<String>,
    pub club_name: Option<String>,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: String,
    pub volunteer_name: String,
    pub club: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub date: Option<String>,
}
