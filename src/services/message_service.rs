use sqlx::AnyPool;
use tracing::debug;

use crate::error::Result;
use crate::models::message::{Message, MessageRow, NewMessage};
use crate::utils::time;

#[derive(Clone)]
pub struct MessageService {
    pool: AnyPool,
}

impl MessageService {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, msg: NewMessage) -> Result<Message> {
        let stamp = time::now();
        let stamp_text = time::to_rfc3339(stamp);

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO messages (created_at, updated_at, received_at, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&stamp_text)
        .bind(&stamp_text)
        .bind(time::to_rfc3339(msg.received_at))
        .bind(&msg.content)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, "Inserted message");

        Ok(Message {
            id,
            created_at: stamp,
            updated_at: stamp,
            deleted_at: None,
            received_at: msg.received_at,
            content: msg.content,
        })
    }

    /// Up to `limit` messages, newest first.
    pub async fn latest(&self, limit: i64) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, created_at, updated_at, received_at, content
            FROM messages
            WHERE deleted_at IS NULL
            ORDER BY received_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
