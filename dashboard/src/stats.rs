//! Per-group and per-sender activity summaries served as JSON.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Default look-back window for group statistics.
pub const DEFAULT_GROUP_DAYS: i64 = 2;

/// Default look-back window for sender statistics.
pub const DEFAULT_SENDER_DAYS: i64 = 7;

/// Longest accepted look-back window.
pub const MAX_DAYS: i64 = 365;

/// How many senders the group summary ranks.
pub const TOP_SENDERS_LIMIT: i64 = 5;

/// Placeholder for senders or groups without a stored name.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatistics {
    pub group_jid: String,
    pub group_name: Option<String>,
    pub messages_per_day: Vec<DailyCount>,
    pub top_senders: Vec<TopSender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DailyCount {
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TopSender {
    pub sender_jid: String,
    pub push_name: String,
    pub message_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderStatistics {
    pub sender_jid: String,
    pub push_name: Option<String>,
    pub messages_per_group: Vec<GroupCount>,
    pub total_messages: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct GroupCount {
    /// `None` for direct messages
    pub group_jid: Option<String>,
    pub group_name: String,
    pub count: i64,
}

/// Parse the `days` query parameter, clamped to `1..=MAX_DAYS`.
pub fn lookback_days(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|d| d.trim().parse::<i128>().ok())
        .map(|d| d.clamp(1, i128::from(MAX_DAYS)) as i64)
        .unwrap_or(default)
}

/// Start of a look-back window ending at `now`.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_lookback_days() {
        assert_eq!(lookback_days(None, DEFAULT_GROUP_DAYS), 2);
        assert_eq!(lookback_days(Some("14"), DEFAULT_GROUP_DAYS), 14);
        assert_eq!(lookback_days(Some("0"), DEFAULT_SENDER_DAYS), 1);
        assert_eq!(lookback_days(Some("-5"), DEFAULT_SENDER_DAYS), 1);
        assert_eq!(lookback_days(Some("5000"), DEFAULT_SENDER_DAYS), MAX_DAYS);
        assert_eq!(lookback_days(Some("week"), DEFAULT_SENDER_DAYS), 7);
        assert_eq!(
            lookback_days(Some("99999999999999999999"), DEFAULT_GROUP_DAYS),
            MAX_DAYS
        );
        assert_eq!(
            lookback_days(Some("-99999999999999999999"), DEFAULT_GROUP_DAYS),
            1
        );
    }

    #[test]
    fn test_window_start() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            window_start(now, 2),
            Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_group_statistics_json_shape() {
        let stats = GroupStatistics {
            group_jid: "123@g.us".to_string(),
            group_name: None,
            messages_per_day: vec![DailyCount {
                date: "2024-03-09".to_string(),
                count: 4,
            }],
            top_senders: vec![TopSender {
                sender_jid: "972500000001@s.whatsapp.net".to_string(),
                push_name: UNKNOWN_NAME.to_string(),
                message_count: 4,
            }],
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["group_name"], serde_json::Value::Null);
        assert_eq!(json["messages_per_day"][0]["date"], "2024-03-09");
        assert_eq!(json["top_senders"][0]["push_name"], "Unknown");
    }
}
