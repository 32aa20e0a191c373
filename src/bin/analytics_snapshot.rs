use chrono::Local;
use club_portal::config::AppConfig;
use club_portal::services::analytics_collector::SqliteAnalyticsSource;
use club_portal::services::analytics_service;
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("analytics snapshot: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match SqlitePoolOptions::new().connect(&config.database_url).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("analytics snapshot: cannot connect to {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    let source = SqliteAnalyticsSource::new(pool);
    match analytics_service::load_analytics(&source, &Local::now()).await {
        Ok(data) => match serde_json::to_string_pretty(&data) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("analytics snapshot: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("analytics snapshot failed: {}", e);
            std::process::exit(1);
        }
    }
}
