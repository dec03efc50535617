pub mod pool;
pub mod schema;

pub use pool::{create_pool, DatabaseKind};
pub use schema::ensure_schema;

use crate::config::Config;
use crate::error::Result;
use sqlx::AnyPool;

/// Opens the pool and makes sure the schema is in place.
pub async fn connect(config: &Config) -> Result<AnyPool> {
    let kind = DatabaseKind::from_url(&config.database_url)?;
    let pool = create_pool(config).await?;
    ensure_schema(&pool, kind).await?;
    Ok(pool)
}
