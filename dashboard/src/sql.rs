//! SQL query constants for the main application's PostgreSQL schema.
//!
//! Every page query binds `$1 = LIMIT` and `$2 = OFFSET`, and orders by a
//! unique key so consecutive pages never overlap or skip rows.

use crate::tab::Tab;

pub const COUNT_GROUPS: &str = r#"SELECT COUNT(*) FROM "group""#;

pub const SELECT_GROUPS_PAGE: &str = r#"
    SELECT group_jid::text AS group_jid, group_name, group_topic, owner_jid,
           COALESCE(managed, false) AS managed,
           COALESCE(notify_on_spam, false) AS notify_on_spam,
           last_summary_sync::timestamptz AS last_summary_sync,
           created_at::timestamptz AS created_at
    FROM "group"
    ORDER BY created_at DESC NULLS LAST, group_jid
    LIMIT $1 OFFSET $2
"#;

pub const COUNT_SENDERS: &str = "SELECT COUNT(*) FROM sender";

pub const SELECT_SENDERS_PAGE: &str = r#"
    SELECT jid::text AS jid, push_name
    FROM sender
    ORDER BY jid
    LIMIT $1 OFFSET $2
"#;

pub const COUNT_REACTIONS: &str = "SELECT COUNT(*) FROM reaction";

pub const SELECT_REACTIONS_PAGE: &str = r#"
    SELECT message_id::text AS message_id, sender_jid::text AS sender_jid, emoji,
           "timestamp"::timestamptz AS "timestamp"
    FROM reaction
    ORDER BY "timestamp" DESC, message_id, sender_jid
    LIMIT $1 OFFSET $2
"#;

pub const COUNT_MESSAGES: &str = "SELECT COUNT(*) FROM message";

pub const SELECT_MESSAGES_PAGE: &str = r#"
    SELECT message_id::text AS message_id,
           "timestamp"::timestamptz AS "timestamp",
           chat_jid::text AS chat_jid, sender_jid::text AS sender_jid,
           group_jid::text AS group_jid, text, media_url,
           reply_to_id::text AS reply_to_id
    FROM message
    ORDER BY "timestamp" DESC, message_id
    LIMIT $1 OFFSET $2
"#;

pub const COUNT_KB_TOPICS: &str = "SELECT COUNT(*) FROM kbtopic";

pub const SELECT_KB_TOPICS_PAGE: &str = r#"
    SELECT id::text AS id, group_jid::text AS group_jid,
           start_time::timestamptz AS start_time,
           subject, speakers, summary
    FROM kbtopic
    ORDER BY start_time DESC, id
    LIMIT $1 OFFSET $2
"#;

pub const COUNT_KB_TOPIC_MESSAGES: &str = "SELECT COUNT(*) FROM kbtopicmessage";

pub const SELECT_KB_TOPIC_MESSAGES_PAGE: &str = r#"
    SELECT kb_topic_id::text AS kb_topic_id, message_id::text AS message_id
    FROM kbtopicmessage
    ORDER BY kb_topic_id, message_id
    LIMIT $1 OFFSET $2
"#;

/// Row count query for a tab.
pub fn count_query(tab: Tab) -> &'static str {
    match tab {
        Tab::Groups => COUNT_GROUPS,
        Tab::Senders => COUNT_SENDERS,
        Tab::Reactions => COUNT_REACTIONS,
        Tab::Messages => COUNT_MESSAGES,
        Tab::KbTopics => COUNT_KB_TOPICS,
        Tab::KbTopicMessages => COUNT_KB_TOPIC_MESSAGES,
    }
}

/// Bounded page query for a tab.
pub fn page_query(tab: Tab) -> &'static str {
    match tab {
        Tab::Groups => SELECT_GROUPS_PAGE,
        Tab::Senders => SELECT_SENDERS_PAGE,
        Tab::Reactions => SELECT_REACTIONS_PAGE,
        Tab::Messages => SELECT_MESSAGES_PAGE,
        Tab::KbTopics => SELECT_KB_TOPICS_PAGE,
        Tab::KbTopicMessages => SELECT_KB_TOPIC_MESSAGES_PAGE,
    }
}

// =============================================================================
// Statistics
// =============================================================================

pub const SELECT_GROUP_NAME: &str =
    r#"SELECT group_jid::text AS group_jid, group_name FROM "group" WHERE group_jid = $1"#;

pub const GROUP_MESSAGES_PER_DAY: &str = r#"
    SELECT date("timestamp")::text AS date, COUNT(*) AS count
    FROM message
    WHERE group_jid = $1 AND "timestamp" >= $2
    GROUP BY date("timestamp")
    ORDER BY date("timestamp")
"#;

pub const GROUP_TOP_SENDERS: &str = r#"
    SELECT m.sender_jid::text AS sender_jid,
           COALESCE(s.push_name, 'Unknown') AS push_name,
           COUNT(*) AS message_count
    FROM message m
    LEFT JOIN sender s ON s.jid = m.sender_jid
    WHERE m.group_jid = $1
    GROUP BY m.sender_jid, s.push_name
    ORDER BY message_count DESC, m.sender_jid
    LIMIT $2
"#;

pub const SELECT_SENDER_NAME: &str =
    "SELECT jid::text AS jid, push_name FROM sender WHERE jid = $1";

pub const SENDER_MESSAGES_PER_GROUP: &str = r#"
    SELECT m.group_jid::text AS group_jid,
           COALESCE(g.group_name, 'Unknown') AS group_name,
           COUNT(*) AS count
    FROM message m
    LEFT JOIN "group" g ON g.group_jid = m.group_jid
    WHERE m.sender_jid = $1 AND m."timestamp" >= $2
    GROUP BY m.group_jid, g.group_name
    ORDER BY count DESC, m.group_jid
"#;

pub const SENDER_TOTAL_MESSAGES: &str = r#"
    SELECT COUNT(*) FROM message WHERE sender_jid = $1 AND "timestamp" >= $2
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_query_is_bounded_and_ordered() {
        for tab in Tab::ALL {
            let query = page_query(tab);
            assert!(query.contains("LIMIT $1 OFFSET $2"), "{tab}: missing bounds");
            assert!(query.contains("ORDER BY"), "{tab}: missing ORDER BY");
            assert!(count_query(tab).starts_with("SELECT COUNT(*)"));
        }
    }
}
