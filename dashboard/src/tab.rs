//! The six fixed dashboard views.

use std::fmt;

/// A dashboard tab, one per table of the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Groups,
    Senders,
    Reactions,
    Messages,
    KbTopics,
    KbTopicMessages,
}

impl Tab {
    /// Every tab, in navigation order.
    pub const ALL: [Tab; 6] = [
        Tab::Groups,
        Tab::Senders,
        Tab::Reactions,
        Tab::Messages,
        Tab::KbTopics,
        Tab::KbTopicMessages,
    ];

    /// URL path segment.
    pub fn slug(self) -> &'static str {
        match self {
            Tab::Groups => "groups",
            Tab::Senders => "senders",
            Tab::Reactions => "reactions",
            Tab::Messages => "messages",
            Tab::KbTopics => "kbtopics",
            Tab::KbTopicMessages => "kb_topic_message",
        }
    }

    /// Route path for this tab.
    pub fn path(self) -> &'static str {
        match self {
            Tab::Groups => "/groups",
            Tab::Senders => "/senders",
            Tab::Reactions => "/reactions",
            Tab::Messages => "/messages",
            Tab::KbTopics => "/kbtopics",
            Tab::KbTopicMessages => "/kb_topic_message",
        }
    }

    /// Human-readable name shown in the navigation bar.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Groups => "Groups",
            Tab::Senders => "Senders",
            Tab::Reactions => "Reactions",
            Tab::Messages => "Messages",
            Tab::KbTopics => "KB Topics",
            Tab::KbTopicMessages => "KB Topic Messages",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matches_slug() {
        for tab in Tab::ALL {
            assert_eq!(tab.path(), format!("/{}", tab.slug()));
            assert_eq!(tab.to_string(), tab.slug());
        }
    }

    #[test]
    fn test_navigation_order() {
        let titles: Vec<_> = Tab::ALL.iter().map(|t| t.title()).collect();
        assert_eq!(
            titles,
            vec![
                "Groups",
                "Senders",
                "Reactions",
                "Messages",
                "KB Topics",
                "KB Topic Messages"
            ]
        );
    }
}
