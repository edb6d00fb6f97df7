//! Floating terminal chat assistant.
//!
//! Messages that exactly match a canned query are answered from a fixed
//! table (a static sentence or a price / transaction lookup); everything
//! else goes to Gemini. See [`router::Router`] for the routing rules and
//! [`ui::ChatPanel`] for the conversation state machine.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod router;
pub mod ui;

pub use api::ApiClient;
pub use config::Config;
pub use router::{Reply, ResponseTable, Router};
