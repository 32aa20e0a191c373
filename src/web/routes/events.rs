use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::error::EventsError;
use crate::services::events_service::{self, EventPayload};

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    club_id: Option<String>,
}

fn reject(e: EventsError) -> (StatusCode, Json<Value>) {
    let (status, message) = match &e {
        EventsError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
        EventsError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "Invalid date"),
        EventsError::ClubNotFound => (StatusCode::BAD_REQUEST, "Club not found"),
        EventsError::NotFound => (StatusCode::NOT_FOUND, "Event not found"),
        EventsError::Database(err) => {
            warn!("Event storage failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    };
    (status, Json(serde_json::json!({ "error": message })))
}

pub async fn list_events_handler(
    State(pool): State<SqlitePool>,
    Query(q): Query<ListEventsQuery>,
) -> ApiResult {
    let club_id = q.club_id.as_deref().filter(|s| !s.is_empty());
    let events = events_service::list_event_views(&pool, club_id)
        .await
        .map_err(reject)?;
    Ok(Json(serde_json::json!(events)))
}

pub async fn event_detail_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
) -> ApiResult {
    let event = events_service::load_event_view(&pool, &event_id)
        .await
        .map_err(reject)?;
    Ok(Json(serde_json::json!(event)))
}

pub async fn create_event_handler(
    State(pool): State<SqlitePool>,
    Json(payload): Json<EventPayload>,
) -> ApiResult {
    let event = events_service::create_event(&pool, &payload)
        .await
        .map_err(reject)?;
    Ok(Json(serde_json::json!({
        "message": "Event created successfully",
        "event": event
    })))
}

pub async fn update_event_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> ApiResult {
    let event = events_service::update_event(&pool, &event_id, &payload)
        .await
        .map_err(reject)?;
    Ok(Json(serde_json::json!({
        "message": "Event updated successfully",
        "event": event
    })))
}

pub async fn delete_event_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
) -> ApiResult {
    events_service::delete_event(&pool, &event_id)
        .await
        .map_err(reject)?;
    Ok(Json(serde_json::json!({ "message": "Event deleted successfully" })))
}
