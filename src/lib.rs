//! Trello integration for workflow orchestration.
//!
//! - [`tasks`]: create, update, move and comment on cards
//! - [`trigger::CardTrigger`]: poll lists and boards for new or updated cards
//! - [`event`]: what a firing trigger hands to the host
//!
//! # Example
//!
//! ```no_run
//! use trello::config::ConnectionConfig;
//! use trello::trigger::CardTrigger;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut trigger = CardTrigger::new("card_trigger", ConnectionConfig::new("key", "token"));
//! trigger.list_id = Some("5abbe4b7ddc1b351ef961414".to_string());
//!
//! if let Some(event) = trigger.evaluate(None).await? {
//!     println!("{} cards changed, latest was {}", event.new_cards_count, event.action);
//! }
//! # Ok(())
//! # }
//! ```

// Connection settings and TOML loading
pub mod config;

// Trello REST API client
pub mod client;

// Card change detection
pub mod trigger;

// Emitted events and execution envelopes
pub mod event;

// Card task adapters
pub mod tasks;

pub use client::TrelloClient;
pub use config::ConnectionConfig;
pub use event::{CardEvent, TriggerExecution};
pub use tasks::Task;
pub use trigger::CardTrigger;
