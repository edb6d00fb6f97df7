use chrono::{DateTime, Local};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    pub fn is_user(self) -> bool {
        matches!(self, Author::User)
    }
}

/// One entry in the conversation. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub author: Author,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Author::User)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Author::Assistant)
    }

    fn new(text: impl Into<String>, author: Author) -> Self {
        Self {
            text: text.into(),
            author,
            timestamp: Local::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.author.is_user()
    }
}

/// Events delivered to the panel from background work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The outstanding request resolved
    ReplyReady(String),
}

/// Visible state of the chat widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    OpenIdle,
    OpenLoading,
}
