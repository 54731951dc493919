//! PostgreSQL-backed store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::postgres::PgRow;
use tracing::debug;

use super::{DashboardStore, Rows};
use crate::db::DbPool;
use crate::error::Result;
use crate::pagination::PageRequest;
use crate::sql;
use crate::stats::{
    DailyCount, GroupCount, GroupStatistics, SenderStatistics, TOP_SENDERS_LIMIT, TopSender,
};
use crate::tab::Tab;

/// Store reading the main application's tables.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn page<T>(&self, tab: Tab, request: PageRequest) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, T>(sql::page_query(tab))
            .bind(i64::from(request.limit()))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[async_trait]
impl DashboardStore for PgStore {
    async fn count(&self, tab: Tab) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(sql::count_query(tab))
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn fetch(&self, tab: Tab, request: PageRequest) -> Result<Rows> {
        debug!(
            %tab,
            limit = request.limit(),
            offset = request.offset(),
            "Fetching page"
        );

        let rows = match tab {
            Tab::Groups => Rows::Groups(self.page(tab, request).await?),
            Tab::Senders => Rows::Senders(self.page(tab, request).await?),
            Tab::Reactions => Rows::Reactions(self.page(tab, request).await?),
            Tab::Messages => Rows::Messages(self.page(tab, request).await?),
            Tab::KbTopics => Rows::KbTopics(self.page(tab, request).await?),
            Tab::KbTopicMessages => Rows::KbTopicMessages(self.page(tab, request).await?),
        };

        Ok(rows)
    }

    async fn group_statistics(
        &self,
        group_jid: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<GroupStatistics>> {
        let group: Option<(String, Option<String>)> = sqlx::query_as(sql::SELECT_GROUP_NAME)
            .bind(group_jid)
            .fetch_optional(&self.pool)
            .await?;

        let Some((group_jid, group_name)) = group else {
            return Ok(None);
        };

        let messages_per_day: Vec<DailyCount> = sqlx::query_as(sql::GROUP_MESSAGES_PER_DAY)
            .bind(&group_jid)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        let top_senders: Vec<TopSender> = sqlx::query_as(sql::GROUP_TOP_SENDERS)
            .bind(&group_jid)
            .bind(TOP_SENDERS_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(GroupStatistics {
            group_jid,
            group_name,
            messages_per_day,
            top_senders,
        }))
    }

    async fn sender_statistics(
        &self,
        sender_jid: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<SenderStatistics>> {
        let sender: Option<(String, Option<String>)> = sqlx::query_as(sql::SELECT_SENDER_NAME)
            .bind(sender_jid)
            .fetch_optional(&self.pool)
            .await?;

        let Some((sender_jid, push_name)) = sender else {
            return Ok(None);
        };

        let messages_per_group: Vec<GroupCount> = sqlx::query_as(sql::SENDER_MESSAGES_PER_GROUP)
            .bind(&sender_jid)
            .bind(since)
            .fetch_all(&self.pool)
            .await?;

        let total_messages: i64 = sqlx::query_scalar(sql::SENDER_TOTAL_MESSAGES)
            .bind(&sender_jid)
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(Some(SenderStatistics {
            sender_jid,
            push_name,
            messages_per_group,
            total_messages,
        }))
    }
}
