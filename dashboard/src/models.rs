//! Rows of the main application's tables, as the dashboard reads them.
//!
//! The schema is owned by the ingestion service; these structs only name
//! the columns the dashboard displays. Identifier columns are selected as
//! `text` and time columns as `timestamptz` (see `sql.rs`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A WhatsApp group and its management settings.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Group {
    pub group_jid: String,
    pub group_name: Option<String>,
    pub group_topic: Option<String>,
    pub owner_jid: Option<String>,
    pub managed: bool,
    pub notify_on_spam: bool,
    pub last_summary_sync: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A message author.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Sender {
    pub jid: String,
    pub push_name: Option<String>,
}

/// An emoji reaction to a message.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Reaction {
    pub message_id: String,
    pub sender_jid: String,
    pub emoji: String,
    pub timestamp: DateTime<Utc>,
}

/// A WhatsApp message.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Message {
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
    pub chat_jid: String,
    pub sender_jid: String,
    pub group_jid: Option<String>,
    pub text: Option<String>,
    pub media_url: Option<String>,
    pub reply_to_id: Option<String>,
}

/// A knowledge-base topic extracted from a group conversation.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct KbTopic {
    pub id: String,
    pub group_jid: Option<String>,
    pub start_time: DateTime<Utc>,
    pub subject: String,
    pub speakers: Option<String>,
    pub summary: String,
}

/// Link between a knowledge-base topic and one of its source messages.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct KbTopicMessage {
    pub kb_topic_id: String,
    pub message_id: String,
}
