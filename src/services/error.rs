#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics query `{query}` failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AnalyticsError {
    /// Name of the sub-query that aborted the batch.
    pub fn query(&self) -> &'static str {
        match self {
            AnalyticsError::Query { query, .. } => query,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EventsError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Club not found")]
    ClubNotFound,
    #[error("Event not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type EventsResult<T> = Result<T, EventsError>;

#[derive(Debug, thiserror::Error)]
pub enum FeedbacksError {
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
