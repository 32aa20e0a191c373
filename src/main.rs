use club_portal::config::AppConfig;
use club_portal::database::schema;
use club_portal::web::{self, AppState};
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env first so RUST_LOG from it is honoured
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info")),
        )
        .init();

    // 2. Database
    let config = AppConfig::from_env()?;
    info!(database_url = %config.database_url, "connecting to database");

    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await?;
    schema::apply_schema(&pool).await?;

    // 3. Router
    let app = web::app(AppState::new(pool));

    // 4. Serve, with one fallback port
    let addr = config.listen_addr()?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = config.fallback_addr()?;
            warn!("could not bind {}: {}; trying {}", addr, e, fallback);
            tokio::net::TcpListener::bind(fallback).await?
        }
    };

    info!("server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
