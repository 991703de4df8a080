use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream catalog settings, handed to the catalog client at construction
/// time. The API key must never appear in logs or responses.
#[derive(Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite:data/cinescope.db".to_string()),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .unwrap_or(5000),
            },
            catalog: CatalogConfig {
                base_url: env::var("TMDB_BASE_URL")
                    .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string()),
                api_key: env::var("TMDB_API_KEY")
                    .map_err(|_| anyhow::anyhow!("TMDB_API_KEY must be set"))?,
                timeout_ms: env::var("TMDB_TIMEOUT_MS")
                    .unwrap_or_else(|_| "10000".to_string())
                    .parse()
                    .unwrap_or(10_000),
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
