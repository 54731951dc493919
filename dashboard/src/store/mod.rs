//! Read access to the dashboard tables.
//!
//! The [`DashboardStore`] trait abstracts the data source so the dashboard
//! can run against:
//! - PostgreSQL, the main application's database (production)
//! - An in-memory dataset (tests and `--demo` mode)

mod memory;
mod postgres;

pub use memory::{Dataset, MemoryStore};
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Group, KbTopic, KbTopicMessage, Message, Reaction, Sender};
use crate::pagination::{PageRequest, total_pages};
use crate::stats::{GroupStatistics, SenderStatistics};
use crate::tab::Tab;

/// Rows of one table page.
#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    Groups(Vec<Group>),
    Senders(Vec<Sender>),
    Reactions(Vec<Reaction>),
    Messages(Vec<Message>),
    KbTopics(Vec<KbTopic>),
    KbTopicMessages(Vec<KbTopicMessage>),
}

impl Rows {
    pub fn tab(&self) -> Tab {
        match self {
            Rows::Groups(_) => Tab::Groups,
            Rows::Senders(_) => Tab::Senders,
            Rows::Reactions(_) => Tab::Reactions,
            Rows::Messages(_) => Tab::Messages,
            Rows::KbTopics(_) => Tab::KbTopics,
            Rows::KbTopicMessages(_) => Tab::KbTopicMessages,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Rows::Groups(r) => r.len(),
            Rows::Senders(r) => r.len(),
            Rows::Reactions(r) => r.len(),
            Rows::Messages(r) => r.len(),
            Rows::KbTopics(r) => r.len(),
            Rows::KbTopicMessages(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only source of dashboard data.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Total number of rows in the tab's table.
    async fn count(&self, tab: Tab) -> Result<u64>;

    /// One bounded page of the tab's table, in the tab's stable order.
    ///
    /// A page past the end yields an empty row set.
    async fn fetch(&self, tab: Tab, request: PageRequest) -> Result<Rows>;

    /// Activity summary for a group, or `None` if the group is unknown.
    async fn group_statistics(
        &self,
        group_jid: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<GroupStatistics>>;

    /// Activity summary for a sender, or `None` if the sender is unknown.
    async fn sender_statistics(
        &self,
        sender_jid: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<SenderStatistics>>;
}

/// A page of rows together with its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub request: PageRequest,
    pub total: u64,
    pub rows: Rows,
}

impl Page {
    pub fn tab(&self) -> Tab {
        self.rows.tab()
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.request.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.request.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.request.page) < self.total_pages()
    }
}

/// Load one page of a tab: a count query followed by a bounded fetch.
pub async fn load_page(store: &dyn DashboardStore, tab: Tab, request: PageRequest) -> Result<Page> {
    let total = store.count(tab).await?;
    let rows = store.fetch(tab, request).await?;

    Ok(Page {
        request,
        total,
        rows,
    })
}
