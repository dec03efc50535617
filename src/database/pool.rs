use crate::config::Config;
use crate::error::{Error, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use tracing::info;

/// Backend behind the `Any` pool. Only matters where the SQL dialects differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
}

impl DatabaseKind {
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(Error::Config(format!(
                "Unsupported database url scheme: {}",
                scheme
            ))),
        }
    }
}

pub async fn create_pool(config: &Config) -> Result<AnyPool> {
    let kind = DatabaseKind::from_url(&config.database_url)?;
    install_default_drivers();

    info!(backend = ?kind, max_connections = config.db_max_connections, "Connecting to database");
    let pool = AnyPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
