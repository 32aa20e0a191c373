use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;
use serde_json::Value;
use tracing::error;

use crate::services::analytics_service;
use crate::web::AppState;

pub async fn analytics_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match analytics_service::load_analytics(state.analytics.as_ref(), &Local::now()).await {
        Ok(data) => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "data": data })),
        ),
        Err(e) => {
            error!(query = e.query(), "Error fetching analytics data: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Failed to fetch analytics data"
                })),
            )
        }
    }
}
