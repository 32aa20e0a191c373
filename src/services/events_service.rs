use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::events_repo::{self, EventFields, NewEvent};
use crate::database::timestamp;
use crate::models::events::EventOrganizer;
use crate::models::{EventRow, EventView};
use crate::services::error::{EventsError, EventsResult};

/// Body of `POST /events` and `PUT /events/:id`. Empty strings count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub club_id: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub venue: Option<String>,
    pub event_organizer_id: Option<String>,
    /// Forms send this as a string, API clients as a number.
    pub max_participants: Option<Value>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Leading integer of a number or numeric string; zero and garbage mean "no limit".
fn parse_max_participants(v: Option<&Value>) -> Option<i64> {
    let n = match v? {
        Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64),
        Value::String(s) => {
            let s = s.trim();
            let end = s
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
                .map(|(i, _)| i)
                .unwrap_or(s.len());
            s[..end].parse::<i64>().ok()
        }
        _ => None,
    }?;
    (n != 0).then_some(n)
}

/// Accepts RFC 3339, `datetime-local` style input (read in `tz`) and bare dates.
pub fn parse_event_time<Tz: TimeZone>(raw: &str, tz: &Tz) -> EventsResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .ok_or_else(|| EventsError::InvalidDate(raw.to_string()))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| EventsError::InvalidDate(raw.to_string()))
}

struct ValidatedEvent<'a> {
    title: &'a str,
    start: String,
    end: Option<String>,
}

fn validate<'a>(payload: &'a EventPayload, tz: &Local) -> EventsResult<ValidatedEvent<'a>> {
    let (Some(title), Some(start)) = (non_empty(&payload.title), non_empty(&payload.start_date_time))
    else {
        return Err(EventsError::MissingFields);
    };
    let start = timestamp::encode(&parse_event_time(start, tz)?);
    let end = match non_empty(&payload.end_date_time) {
        Some(raw) => Some(timestamp::encode(&parse_event_time(raw, tz)?)),
        None => None,
    };
    Ok(ValidatedEvent { title, start, end })
}

fn fields<'a>(payload: &'a EventPayload, valid: &'a ValidatedEvent<'a>) -> EventFields<'a> {
    EventFields {
        title: valid.title,
        subtitle: non_empty(&payload.subtitle),
        category: non_empty(&payload.category),
        description: non_empty(&payload.description),
        start_date_time: &valid.start,
        end_date_time: valid.end.as_deref(),
        venue: non_empty(&payload.venue),
        organizer_id: non_empty(&payload.event_organizer_id),
        max_participants: parse_max_participants(payload.max_participants.as_ref()),
    }
}

pub fn build_event_view<Tz>(row: EventRow, now: &DateTime<Tz>) -> EventView
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let tz = now.timezone();
    let start = timestamp::decode(&row.start_date_time);
    let local_start = start.map(|s| s.with_timezone(&tz));

    EventView {
        // Calendar date of the UTC instant; only the clock time is local.
        date: start
            .map(|s| s.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        time: local_start
            .as_ref()
            .map(|s| s.format("%H:%M").to_string())
            .unwrap_or_default(),
        is_active: start.is_some_and(|s| s > now.with_timezone(&Utc)),
        location: row.venue.clone(),
        venue: row.venue,
        id: row.event_id,
        title: row.title,
        subtitle: row.subtitle,
        description: row.description,
        cover_image: row.cover_image,
        category: row.category,
        start_date_time: row.start_date_time,
        end_date_time: row.end_date_time,
        max_capacity: row.max_participants,
        registered_count: row.registered_count,
        is_paid: false,
        price: 0,
        organizer: EventOrganizer {
            id: row.club_id,
            name: row.club_name,
            kind: "club",
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub async fn list_event_views(pool: &SqlitePool, club_id: Option<&str>) -> EventsResult<Vec<EventView>> {
    let now = Local::now();
    let rows = events_repo::list_events(pool, club_id).await?;
    Ok(rows.into_iter().map(|row| build_event_view(row, &now)).collect())
}

pub async fn load_event_view(pool: &SqlitePool, event_id: &str) -> EventsResult<EventView> {
    let row = events_repo::load_event(pool, event_id, false)
        .await?
        .ok_or(EventsError::NotFound)?;
    Ok(build_event_view(row, &Local::now()))
}

pub async fn create_event(pool: &SqlitePool, payload: &EventPayload) -> EventsResult<EventView> {
    let now = Local::now();
    let Some(club_id) = non_empty(&payload.club_id) else {
        return Err(EventsError::MissingFields);
    };
    let valid = validate(payload, &Local)?;
    if !events_repo::club_exists(pool, club_id).await? {
        return Err(EventsError::ClubNotFound);
    }

    let event_id = format!("evt_{}", Uuid::new_v4().simple());
    let created_at = timestamp::encode(&now);
    events_repo::insert_event(
        pool,
        NewEvent {
            event_id: &event_id,
            club_id,
            fields: fields(payload, &valid),
            created_at: &created_at,
        },
    )
    .await?;
    info!(event_id = %event_id, club_id = %club_id, "event created");

    let row = events_repo::load_event(pool, &event_id, true)
        .await?
        .ok_or(EventsError::NotFound)?;
    Ok(build_event_view(row, &now))
}

pub async fn update_event(
    pool: &SqlitePool,
    event_id: &str,
    payload: &EventPayload,
) -> EventsResult<EventView> {
    let now = Local::now();
    let valid = validate(payload, &Local)?;
    if !events_repo::event_exists(pool, event_id).await? {
        return Err(EventsError::NotFound);
    }

    events_repo::update_event(
        pool,
        event_id,
        fields(payload, &valid),
        &timestamp::encode(&now),
    )
    .await?;
    info!(event_id = %event_id, "event updated");

    let row = events_repo::load_event(pool, event_id, true)
        .await?
        .ok_or(EventsError::NotFound)?;
    Ok(build_event_view(row, &now))
}

pub async fn delete_event(pool: &SqlitePool, event_id: &str) -> EventsResult<()> {
    if !events_repo::event_exists(pool, event_id).await? {
        return Err(EventsError::NotFound);
    }
    events_repo::soft_delete_event(pool, event_id, &timestamp::encode(&Local::now())).await?;
    info!(event_id = %event_id, "event soft-deleted");
    Ok(())
}
