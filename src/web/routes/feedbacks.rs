use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::feedbacks_service;

#[derive(Debug, Deserialize)]
pub struct FeedbacksQuery {
    // Kept as text so a non-numeric value reaches the JSON error below.
    limit: Option<String>,
}

pub async fn recent_feedbacks_handler(
    State(pool): State<SqlitePool>,
    Query(q): Query<FeedbacksQuery>,
) -> impl IntoResponse {
    match feedbacks_service::list_recent_feedbacks(&pool, q.limit.as_deref()).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!(items))),
        Err(e) => {
            warn!("Failed to fetch recent feedbacks: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to fetch feedbacks" })),
            )
        }
    }
}
