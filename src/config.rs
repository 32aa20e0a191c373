use std::env;
use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set (e.g. in .env)")]
    MissingDatabaseUrl,
    #[error("invalid PORT value `{0}`")]
    InvalidPort(String),
    #[error("cannot parse listen address `{0}`")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `HOST` and `PORT`; call `dotenvy::dotenv()` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 3000,
        };
        Ok(AppConfig {
            database_url,
            host,
            port,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr_with_port(self.port)
    }

    /// Address used when the configured port is taken.
    pub fn fallback_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr_with_port(self.port.wrapping_add(1))
    }

    fn addr_with_port(&self, port: u16) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}
