use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::{Error, Result};
use crate::utils::time;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub received_at: DateTime<Utc>,
    pub content: String,
}

/// Row as stored: timestamps are RFC3339 text on every backend.
///
/// `deleted_at` is not selected; reads only return rows where it is NULL.
#[derive(Debug, FromRow)]
pub struct MessageRow {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub received_at: String,
    pub content: String,
}

impl TryFrom<MessageRow> for Message {
    type Error = Error;

    fn try_from(row: MessageRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            created_at: time::from_rfc3339(&row.created_at)?,
            updated_at: time::from_rfc3339(&row.updated_at)?,
            deleted_at: None,
            received_at: time::from_rfc3339(&row.received_at)?,
            content: row.content,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub received_at: DateTime<Utc>,
    pub content: String,
}

impl NewMessage {
    /// A message stamped with the current server time.
    pub fn received_now(content: impl Into<String>) -> Self {
        Self {
            received_at: time::now(),
            content: content.into(),
        }
    }
}
