pub mod conversation;
pub mod launcher;
pub mod layout;

pub use conversation::{ChatPanel, PanelAction};
pub use launcher::Launcher;
