//! Conversation UI components for the chat panel

pub mod commands;
pub mod composer;
pub mod history;
pub mod indicator;
pub mod manager;

pub use commands::{ParsedCommand, SlashCommand};
pub use composer::ConversationComposer;
pub use history::ConversationHistory;
pub use indicator::LoadingIndicator;
pub use manager::{ChatPanel, PanelAction};
