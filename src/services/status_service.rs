use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;
use crate::models::message::Message;
use crate::services::message_service::MessageService;
use crate::utils::time;

/// How many messages the home page looks at, current status included.
pub const HISTORY_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub content: String,
    pub friendly_received: String,
    pub received_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPage {
    pub newest: Option<MessageView>,
    pub other_updates: Vec<MessageView>,
}

/// Splits newest-first `messages` into the current status and the history.
///
/// The head only counts as current when it is at most `freshness` old;
/// otherwise everything is history.
pub fn partition_updates(
    mut messages: Vec<Message>,
    now: DateTime<Utc>,
    freshness: Duration,
) -> (Option<Message>, Vec<Message>) {
    let is_fresh = messages
        .first()
        .is_some_and(|m| now - m.received_at <= freshness);
    if is_fresh {
        let newest = messages.remove(0);
        (Some(newest), messages)
    } else {
        (None, messages)
    }
}

#[derive(Clone)]
pub struct StatusService {
    messages: MessageService,
    freshness: Duration,
    display_timezone: Tz,
}

impl StatusService {
    pub fn new(messages: MessageService, freshness: Duration, display_timezone: Tz) -> Self {
        Self {
            messages,
            freshness,
            display_timezone,
        }
    }

    pub async fn home_page(&self) -> Result<StatusPage> {
        let latest = self.messages.latest(HISTORY_LIMIT).await?;
        Ok(self.build_page(latest, time::now()))
    }

    pub fn build_page(&self, latest: Vec<Message>, now: DateTime<Utc>) -> StatusPage {
        let (newest, others) = partition_updates(latest, now, self.freshness);
        StatusPage {
            newest: newest.map(|m| self.view(m, now)),
            other_updates: others.into_iter().map(|m| self.view(m, now)).collect(),
        }
    }

    fn view(&self, message: Message, now: DateTime<Utc>) -> MessageView {
        MessageView {
            friendly_received: time::humanize(message.received_at, now),
            received_at: time::format_rfc1123_in(message.received_at, self.display_timezone),
            content: message.content,
        }
    }
}
