use sqlx::SqlitePool;

// Timestamps are TEXT in `database::timestamp` form so range filters can compare them as strings.
const SQL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  user_id TEXT PRIMARY KEY,
  first_name TEXT,
  last_name TEXT,
  email TEXT,
  is_active INTEGER NOT NULL DEFAULT 1,
  last_login TEXT,
  created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS clubs (
  club_id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  is_active INTEGER NOT NULL DEFAULT 1,
  is_deleted INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS club_members (
  member_id TEXT PRIMARY KEY,
  club_id TEXT NOT NULL REFERENCES clubs(club_id),
  user_id TEXT NOT NULL REFERENCES users(user_id),
  joined_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
  event_id TEXT PRIMARY KEY,
  club_id TEXT NOT NULL REFERENCES clubs(club_id),
  title TEXT NOT NULL,
  subtitle TEXT,
  category TEXT,
  description TEXT,
  start_date_time TEXT NOT NULL,
  end_date_time TEXT,
  venue TEXT,
  cover_image TEXT,
  organizer_id TEXT,
  max_participants INTEGER,
  is_deleted INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS event_registrations (
  registration_id TEXT PRIMARY KEY,
  event_id TEXT NOT NULL REFERENCES events(event_id),
  user_id TEXT NOT NULL REFERENCES users(user_id),
  registered_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS event_attendance (
  attendance_id TEXT PRIMARY KEY,
  event_id TEXT NOT NULL REFERENCES events(event_id),
  user_id TEXT NOT NULL REFERENCES users(user_id),
  attend_time TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS feedbacks (
  feedback_id TEXT PRIMARY KEY,
  user_id TEXT REFERENCES users(user_id),
  club_id TEXT REFERENCES clubs(club_id),
  rating INTEGER NOT NULL,
  comment TEXT,
  created_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_events_club ON events(club_id, is_deleted);
CREATE INDEX IF NOT EXISTS idx_club_members_club ON club_members(club_id);
CREATE INDEX IF NOT EXISTS idx_event_registrations_event ON event_registrations(event_id);
"#;

pub async fn apply_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::raw_sql(SQL_SCHEMA).execute(pool).await?;
    Ok(())
}
