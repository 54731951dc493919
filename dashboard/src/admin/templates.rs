//! Askama templates for the dashboard pages.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::{Group, KbTopic, KbTopicMessage, Message, Reaction, Sender};
use crate::pagination::PAGE_SIZES;
use crate::store::{Page, Rows};
use crate::tab::Tab;

/// Longest text shown in a cell before truncation.
pub const MAX_CELL_CHARS: usize = 200;

/// Link in the tab navigation bar
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Link in the page-size selector
pub struct PageSizeLink {
    pub size: u32,
    pub href: String,
    pub active: bool,
}

/// A rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Displayed (possibly truncated) text
    pub text: String,
    /// Full value for the tooltip when `text` was truncated
    pub full: String,
    /// CSS class
    pub class: &'static str,
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Self {
            text: value.to_string(),
            full: String::new(),
            class: "",
        }
    }

    /// Identifier columns (JIDs, message IDs) in monospace.
    pub fn id(value: &str) -> Self {
        Self {
            class: "mono",
            ..Self::text(value)
        }
    }

    pub fn null() -> Self {
        Self {
            text: "-".to_string(),
            full: String::new(),
            class: "null",
        }
    }

    pub fn optional(value: Option<&str>) -> Self {
        value.map(Self::text).unwrap_or_else(Self::null)
    }

    pub fn optional_id(value: Option<&str>) -> Self {
        value.map(Self::id).unwrap_or_else(Self::null)
    }

    pub fn flag(value: bool) -> Self {
        Self {
            text: if value { "yes" } else { "no" }.to_string(),
            full: String::new(),
            class: if value { "flag yes" } else { "flag no" },
        }
    }

    pub fn time(value: DateTime<Utc>) -> Self {
        Self {
            text: value.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            full: String::new(),
            class: "time",
        }
    }

    pub fn optional_time(value: Option<DateTime<Utc>>) -> Self {
        value.map(Self::time).unwrap_or_else(Self::null)
    }

    /// Free text, cut to [`MAX_CELL_CHARS`] characters.
    pub fn long(value: &str) -> Self {
        if value.chars().count() <= MAX_CELL_CHARS {
            return Self::text(value);
        }

        let mut text: String = value.chars().take(MAX_CELL_CHARS).collect();
        text.push('…');
        Self {
            text,
            full: value.to_string(),
            class: "long",
        }
    }

    pub fn optional_long(value: Option<&str>) -> Self {
        value.map(Self::long).unwrap_or_else(Self::null)
    }
}

/// A model that can be shown as a table row.
pub trait TableRow {
    /// Column headers, in display order
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

impl TableRow for Group {
    const COLUMNS: &'static [&'static str] = &[
        "Group JID",
        "Name",
        "Topic",
        "Owner",
        "Managed",
        "Notify on spam",
        "Last summary",
        "Created",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::id(&self.group_jid),
            Cell::optional(self.group_name.as_deref()),
            Cell::optional_long(self.group_topic.as_deref()),
            Cell::optional_id(self.owner_jid.as_deref()),
            Cell::flag(self.managed),
            Cell::flag(self.notify_on_spam),
            Cell::optional_time(self.last_summary_sync),
            Cell::optional_time(self.created_at),
        ]
    }
}

impl TableRow for Sender {
    const COLUMNS: &'static [&'static str] = &["JID", "Push name"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::id(&self.jid), Cell::optional(self.push_name.as_deref())]
    }
}

impl TableRow for Reaction {
    const COLUMNS: &'static [&'static str] = &["Message ID", "Sender", "Emoji", "Time"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::id(&self.message_id),
            Cell::id(&self.sender_jid),
            Cell::text(&self.emoji),
            Cell::time(self.timestamp),
        ]
    }
}

impl TableRow for Message {
    const COLUMNS: &'static [&'static str] = &[
        "Message ID",
        "Time",
        "Chat",
        "Sender",
        "Group",
        "Text",
        "Media",
        "Reply to",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::id(&self.message_id),
            Cell::time(self.timestamp),
            Cell::id(&self.chat_jid),
            Cell::id(&self.sender_jid),
            Cell::optional_id(self.group_jid.as_deref()),
            Cell::optional_long(self.text.as_deref()),
            Cell::optional(self.media_url.as_deref()),
            Cell::optional_id(self.reply_to_id.as_deref()),
        ]
    }
}

impl TableRow for KbTopic {
    const COLUMNS: &'static [&'static str] =
        &["ID", "Group", "Start", "Subject", "Speakers", "Summary"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::id(&self.id),
            Cell::optional_id(self.group_jid.as_deref()),
            Cell::time(self.start_time),
            Cell::text(&self.subject),
            Cell::optional_long(self.speakers.as_deref()),
            Cell::long(&self.summary),
        ]
    }
}

impl TableRow for KbTopicMessage {
    const COLUMNS: &'static [&'static str] = &["KB topic ID", "Message ID"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::id(&self.kb_topic_id), Cell::id(&self.message_id)]
    }
}

fn table<T: TableRow>(rows: &[T]) -> (&'static [&'static str], Vec<Vec<Cell>>) {
    (T::COLUMNS, rows.iter().map(TableRow::cells).collect())
}

/// Column headers and cells for any page of rows.
pub fn table_cells(rows: &Rows) -> (&'static [&'static str], Vec<Vec<Cell>>) {
    match rows {
        Rows::Groups(r) => table(r),
        Rows::Senders(r) => table(r),
        Rows::Reactions(r) => table(r),
        Rows::Messages(r) => table(r),
        Rows::KbTopics(r) => table(r),
        Rows::KbTopicMessages(r) => table(r),
    }
}

/// URL of a page of a tab.
pub fn page_href(tab: Tab, page: u64, page_size: u32) -> String {
    format!("{}?page={page}&page_size={page_size}", tab.path())
}

/// One table page with navigation and pagination controls.
#[derive(Template)]
#[template(path = "admin/table.html")]
pub struct TablePageTemplate {
    pub title: &'static str,
    pub nav: Vec<NavLink>,
    pub whatsapp_host: String,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub page_sizes: Vec<PageSizeLink>,
}

impl TablePageTemplate {
    pub fn new(page: &Page, whatsapp_host: &str) -> Self {
        let tab = page.tab();
        let request = page.request;
        let (columns, rows) = table_cells(&page.rows);

        let nav = Tab::ALL
            .into_iter()
            .map(|t| NavLink {
                title: t.title(),
                href: t.path(),
                active: t == tab,
            })
            .collect();

        let page_sizes = PAGE_SIZES
            .into_iter()
            .map(|size| PageSizeLink {
                size,
                href: page_href(tab, 1, size),
                active: size == request.page_size,
            })
            .collect();

        let current = u64::from(request.page);
        let prev_href = page
            .has_previous()
            .then(|| page_href(tab, (current - 1).min(page.total_pages()), request.page_size));
        let next_href = page
            .has_next()
            .then(|| page_href(tab, current + 1, request.page_size));

        Self {
            title: tab.title(),
            nav,
            whatsapp_host: whatsapp_host.to_string(),
            columns,
            rows,
            page: request.page,
            page_size: request.page_size,
            total: page.total,
            total_pages: page.total_pages(),
            prev_href,
            next_href,
            page_sizes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageRequest;
    use chrono::TimeZone;

    fn sender(i: usize) -> Sender {
        Sender {
            jid: format!("97250000{i:04}@s.whatsapp.net"),
            push_name: (i % 2 == 0).then(|| format!("Sender <{i}>")),
        }
    }

    fn senders_page(page: u32, total: usize) -> Page {
        let request = PageRequest::new(page, 10);
        let rows = (0..total)
            .map(sender)
            .skip(request.offset() as usize)
            .take(10)
            .collect();
        Page {
            request,
            total: total as u64,
            rows: Rows::Senders(rows),
        }
    }

    #[test]
    fn test_cell_formatting() {
        assert_eq!(Cell::flag(true).text, "yes");
        assert_eq!(Cell::flag(false).text, "no");
        assert_eq!(Cell::optional(None).text, "-");
        assert_eq!(Cell::optional(None).class, "null");

        let time = Utc.with_ymd_and_hms(2024, 2, 29, 23, 5, 9).unwrap();
        assert_eq!(Cell::time(time).text, "2024-02-29 23:05:09 UTC");
    }

    #[test]
    fn test_long_text_truncated_on_char_boundary() {
        let short = "שלום".repeat(50);
        assert_eq!(Cell::long(&short).text, short);

        let long = "שלום".repeat(51);
        let cell = Cell::long(&long);
        assert_eq!(cell.text.chars().count(), MAX_CELL_CHARS + 1);
        assert!(cell.text.ends_with('…'));
        assert_eq!(cell.full, long);
    }

    #[test]
    fn test_columns_match_cells() {
        let group = Group {
            group_jid: "1@g.us".to_string(),
            group_name: None,
            group_topic: None,
            owner_jid: None,
            managed: true,
            notify_on_spam: false,
            last_summary_sync: None,
            created_at: None,
        };
        assert_eq!(group.cells().len(), Group::COLUMNS.len());
        assert_eq!(sender(1).cells().len(), Sender::COLUMNS.len());
    }

    #[test]
    fn test_navigation_marks_active_tab() {
        let template = TablePageTemplate::new(&senders_page(1, 5), "http://wa:3000");
        let active: Vec<_> = template.nav.iter().filter(|n| n.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "/senders");
        assert_eq!(template.title, "Senders");
    }

    #[test]
    fn test_page_links() {
        let first = TablePageTemplate::new(&senders_page(1, 25), "");
        assert_eq!(first.prev_href, None);
        assert_eq!(
            first.next_href.as_deref(),
            Some("/senders?page=2&page_size=10")
        );
        assert_eq!(first.total_pages, 3);

        let last = TablePageTemplate::new(&senders_page(3, 25), "");
        assert_eq!(
            last.prev_href.as_deref(),
            Some("/senders?page=2&page_size=10")
        );
        assert_eq!(last.next_href, None);
        assert_eq!(last.rows.len(), 5);
    }

    #[test]
    fn test_previous_link_past_end_points_at_last_page() {
        let beyond = TablePageTemplate::new(&senders_page(9, 25), "");
        assert!(beyond.rows.is_empty());
        assert_eq!(
            beyond.prev_href.as_deref(),
            Some("/senders?page=3&page_size=10")
        );
        assert_eq!(beyond.next_href, None);
    }

    #[test]
    fn test_page_size_links_reset_to_first_page() {
        let template = TablePageTemplate::new(&senders_page(2, 25), "");
        let hrefs: Vec<_> = template.page_sizes.iter().map(|p| p.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "/senders?page=1&page_size=10",
                "/senders?page=1&page_size=20",
                "/senders?page=1&page_size=50",
                "/senders?page=1&page_size=100",
            ]
        );
        assert!(template.page_sizes[0].active);
    }

    #[test]
    fn test_render_escapes_values() {
        let html = TablePageTemplate::new(&senders_page(1, 3), "http://wa:3000")
            .render()
            .unwrap();
        assert!(html.contains("Sender &#60;0&#62;") || html.contains("Sender &lt;0&gt;"));
        assert!(!html.contains("Sender <0>"));
        assert!(html.contains("http://wa:3000"));
        assert!(html.contains("Page 1 of 1"));
    }
}
