use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub event_id: String,
    pub club_id: String,
    pub club_name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub start_date_time: String,
    pub end_date_time: Option<String>,
    pub venue: Option<String>,
    pub cover_image: Option<String>,
    pub max_participants: Option<i64>,
    pub registered_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryCountRow {
    pub category: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventOrganizer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Event as the dashboard and public pages consume it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub date: String,
    pub time: String,
    pub location: Option<String>,
    pub venue: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub start_date_time: String,
    pub end_date_time: Option<String>,
    pub max_capacity: Option<i64>,
    pub registered_count: i64,
    pub is_active: bool,
    pub is_paid: bool,
    pub price: i64,
    pub organizer: EventOrganizer,
    pub created_at: String,
    pub updated_at: String,
}
