//! In-memory store for tests and demo mode.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use super::{DashboardStore, Rows};
use crate::error::Result;
use crate::models::{Group, KbTopic, KbTopicMessage, Message, Reaction, Sender};
use crate::pagination::PageRequest;
use crate::stats::{
    DailyCount, GroupCount, GroupStatistics, SenderStatistics, TOP_SENDERS_LIMIT, TopSender,
    UNKNOWN_NAME,
};
use crate::tab::Tab;

/// Contents of every dashboard table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub groups: Vec<Group>,
    pub senders: Vec<Sender>,
    pub reactions: Vec<Reaction>,
    pub messages: Vec<Message>,
    pub kb_topics: Vec<KbTopic>,
    pub kb_topic_messages: Vec<KbTopicMessage>,
}

impl Dataset {
    /// A small, deterministic dataset: three groups chatting over a few days.
    pub fn sample() -> Self {
        let base = Utc
            .with_ymd_and_hms(2025, 1, 6, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let group_jids = ["120363001@g.us", "120363002@g.us", "120363003@g.us"];
        let names = ["Dana", "Noa", "Itai", "Maya", "Yoav"];

        let groups = group_jids
            .iter()
            .enumerate()
            .map(|(i, jid)| Group {
                group_jid: jid.to_string(),
                group_name: Some(format!("Builders #{}", i + 1)),
                group_topic: (i != 2).then(|| "LLM engineering".to_string()),
                owner_jid: Some(sender_jid(i)),
                managed: i == 0,
                notify_on_spam: i == 1,
                last_summary_sync: (i == 0).then(|| base + Duration::days(2)),
                created_at: Some(base - Duration::days(30 - i as i64)),
            })
            .collect();

        let senders = names
            .iter()
            .enumerate()
            .map(|(i, name)| Sender {
                jid: sender_jid(i),
                push_name: (i != 4).then(|| name.to_string()),
            })
            .collect();

        let messages: Vec<Message> = (0..60)
            .map(|i: usize| Message {
                message_id: format!("3EB0{i:04}"),
                timestamp: base + Duration::minutes(i as i64 * 97),
                chat_jid: group_jids[i % 3].to_string(),
                sender_jid: sender_jid(i % names.len()),
                group_jid: Some(group_jids[i % 3].to_string()),
                text: Some(format!("Message {i} about retrieval, evals and agents")),
                media_url: (i % 10 == 0).then(|| format!("media/{i}.jpg")),
                reply_to_id: (i > 0 && i % 4 == 0).then(|| format!("3EB0{:04}", i - 1)),
            })
            .collect();

        let reactions = messages
            .iter()
            .step_by(3)
            .enumerate()
            .map(|(i, m)| Reaction {
                message_id: m.message_id.clone(),
                sender_jid: sender_jid((i + 1) % names.len()),
                emoji: ["👍", "❤️", "😂"][i % 3].to_string(),
                timestamp: m.timestamp + Duration::minutes(5),
            })
            .collect();

        let kb_topics: Vec<KbTopic> = (0..6)
            .map(|i: usize| KbTopic {
                id: format!("topic-{i}"),
                group_jid: Some(group_jids[i % 3].to_string()),
                start_time: base + Duration::hours(i as i64 * 12),
                subject: format!("Topic {i}: evaluating RAG pipelines"),
                speakers: Some(format!("{},{}", sender_jid(i % 5), sender_jid((i + 1) % 5))),
                summary: "The group compared chunking strategies and embedding models."
                    .to_string(),
            })
            .collect();

        let kb_topic_messages = kb_topics
            .iter()
            .enumerate()
            .flat_map(|(t, topic)| {
                (0..3).map(move |k| KbTopicMessage {
                    kb_topic_id: topic.id.clone(),
                    message_id: format!("3EB0{:04}", t * 9 + k),
                })
            })
            .collect();

        Self {
            groups,
            senders,
            reactions,
            messages,
            kb_topics,
            kb_topic_messages,
        }
    }
}

fn sender_jid(i: usize) -> String {
    format!("97250000000{i}@s.whatsapp.net")
}

/// Store holding a fixed [`Dataset`], sorted once into the same stable
/// orders the SQL queries use.
pub struct MemoryStore {
    data: Dataset,
}

impl MemoryStore {
    pub fn new(mut data: Dataset) -> Self {
        data.groups.sort_by(|a, b| {
            // created_at DESC NULLS LAST, group_jid
            b.created_at
                .is_some()
                .cmp(&a.created_at.is_some())
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.group_jid.cmp(&b.group_jid))
        });
        data.senders.sort_by(|a, b| a.jid.cmp(&b.jid));
        data.reactions.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.message_id.cmp(&b.message_id))
                .then_with(|| a.sender_jid.cmp(&b.sender_jid))
        });
        data.messages.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });
        data.kb_topics.sort_by(|a, b| {
            b.start_time
                .cmp(&a.start_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        data.kb_topic_messages.sort_by(|a, b| {
            a.kb_topic_id
                .cmp(&b.kb_topic_id)
                .then_with(|| a.message_id.cmp(&b.message_id))
        });

        Self { data }
    }

    /// Store preloaded with [`Dataset::sample`].
    pub fn sample() -> Self {
        Self::new(Dataset::sample())
    }
}

/// Copy the rows of one page out of a sorted table.
fn slice<T: Clone>(rows: &[T], request: PageRequest) -> Vec<T> {
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    rows.iter()
        .skip(offset)
        .take(request.limit() as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl DashboardStore for MemoryStore {
    async fn count(&self, tab: Tab) -> Result<u64> {
        let d = &self.data;
        let count = match tab {
            Tab::Groups => d.groups.len(),
            Tab::Senders => d.senders.len(),
            Tab::Reactions => d.reactions.len(),
            Tab::Messages => d.messages.len(),
            Tab::KbTopics => d.kb_topics.len(),
            Tab::KbTopicMessages => d.kb_topic_messages.len(),
        };
        Ok(count as u64)
    }

    async fn fetch(&self, tab: Tab, request: PageRequest) -> Result<Rows> {
        let d = &self.data;
        let rows = match tab {
            Tab::Groups => Rows::Groups(slice(&d.groups, request)),
            Tab::Senders => Rows::Senders(slice(&d.senders, request)),
            Tab::Reactions => Rows::Reactions(slice(&d.reactions, request)),
            Tab::Messages => Rows::Messages(slice(&d.messages, request)),
            Tab::KbTopics => Rows::KbTopics(slice(&d.kb_topics, request)),
            Tab::KbTopicMessages => Rows::KbTopicMessages(slice(&d.kb_topic_messages, request)),
        };
        Ok(rows)
    }

    async fn group_statistics(
        &self,
        group_jid: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<GroupStatistics>> {
        let Some(group) = self.data.groups.iter().find(|g| g.group_jid == group_jid) else {
            return Ok(None);
        };

        let in_group: Vec<&Message> = self
            .data
            .messages
            .iter()
            .filter(|m| m.group_jid.as_deref() == Some(group_jid))
            .collect();

        let mut per_day: BTreeMap<String, i64> = BTreeMap::new();
        for message in in_group.iter().filter(|m| m.timestamp >= since) {
            let day = message.timestamp.date_naive().format("%Y-%m-%d").to_string();
            *per_day.entry(day).or_default() += 1;
        }

        let mut per_sender: HashMap<&str, i64> = HashMap::new();
        for message in &in_group {
            *per_sender.entry(message.sender_jid.as_str()).or_default() += 1;
        }
        let mut ranked: Vec<(&str, i64)> = per_sender.into_iter().collect();
        ranked.sort_by_key(|(jid, count)| (Reverse(*count), *jid));

        let top_senders = ranked
            .into_iter()
            .take(TOP_SENDERS_LIMIT as usize)
            .map(|(jid, message_count)| TopSender {
                sender_jid: jid.to_string(),
                push_name: self.push_name(jid).unwrap_or(UNKNOWN_NAME).to_string(),
                message_count,
            })
            .collect();

        Ok(Some(GroupStatistics {
            group_jid: group.group_jid.clone(),
            group_name: group.group_name.clone(),
            messages_per_day: per_day
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
            top_senders,
        }))
    }

    async fn sender_statistics(
        &self,
        sender_jid: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<SenderStatistics>> {
        let Some(sender) = self.data.senders.iter().find(|s| s.jid == sender_jid) else {
            return Ok(None);
        };

        let mut per_group: HashMap<Option<&str>, i64> = HashMap::new();
        let mut total_messages = 0;
        for message in self
            .data
            .messages
            .iter()
            .filter(|m| m.sender_jid == sender_jid && m.timestamp >= since)
        {
            *per_group.entry(message.group_jid.as_deref()).or_default() += 1;
            total_messages += 1;
        }

        let mut messages_per_group: Vec<GroupCount> = per_group
            .into_iter()
            .map(|(group_jid, count)| GroupCount {
                group_jid: group_jid.map(str::to_string),
                group_name: group_jid
                    .and_then(|jid| self.group_name(jid))
                    .unwrap_or(UNKNOWN_NAME)
                    .to_string(),
                count,
            })
            .collect();
        messages_per_group.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.group_jid.cmp(&b.group_jid))
        });

        Ok(Some(SenderStatistics {
            sender_jid: sender.jid.clone(),
            push_name: sender.push_name.clone(),
            messages_per_group,
            total_messages,
        }))
    }
}

impl MemoryStore {
    fn push_name(&self, jid: &str) -> Option<&str> {
        self.data
            .senders
            .iter()
            .find(|s| s.jid == jid)
            .and_then(|s| s.push_name.as_deref())
    }

    fn group_name(&self, jid: &str) -> Option<&str> {
        self.data
            .groups
            .iter()
            .find(|g| g.group_jid == jid)
            .and_then(|g| g.group_name.as_deref())
    }
}
