use crate::database::DatabaseKind;
use crate::error::Result;
use sqlx::AnyPool;
use tracing::info;

const CREATE_MESSAGES_SQLITE: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT,
        received_at TEXT NOT NULL,
        content TEXT NOT NULL
    )
"#;

const CREATE_MESSAGES_POSTGRES: &str = r#"
    CREATE TABLE IF NOT EXISTS messages (
        id BIGSERIAL PRIMARY KEY,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT,
        received_at TEXT NOT NULL,
        content TEXT NOT NULL
    )
"#;

const CREATE_RECEIVED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_messages_received_at ON messages (received_at)";

/// Creates the `messages` table and its index if they are absent. Safe to run
/// on every start.
pub async fn ensure_schema(pool: &AnyPool, kind: DatabaseKind) -> Result<()> {
    info!("Creating database tables if not exist");

    let create_table = match kind {
        DatabaseKind::Sqlite => CREATE_MESSAGES_SQLITE,
        DatabaseKind::Postgres => CREATE_MESSAGES_POSTGRES,
    };
    sqlx::query(create_table).execute(pool).await?;
    sqlx::query(CREATE_RECEIVED_AT_INDEX).execute(pool).await?;

    Ok(())
}
