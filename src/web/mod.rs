pub mod routes;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::get,
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::services::analytics_collector::{AnalyticsSource, SqliteAnalyticsSource};
use routes::{analytics, events, feedbacks};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub analytics: Arc<dyn AnalyticsSource>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let analytics = Arc::new(SqliteAnalyticsSource::new(pool.clone()));
        Self { pool, analytics }
    }

    /// Same pool, different analytics reads.
    pub fn with_analytics_source(mut self, source: Arc<dyn AnalyticsSource>) -> Self {
        self.analytics = source;
        self
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/analytics", get(analytics::analytics_handler))
        .route(
            "/events",
            get(events::list_events_handler).post(events::create_event_handler),
        )
        .route(
            "/events/:event_id",
            get(events::event_detail_handler)
                .put(events::update_event_handler)
                .delete(events::delete_event_handler),
        )
        .route("/feedbacks", get(feedbacks::recent_feedbacks_handler))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
