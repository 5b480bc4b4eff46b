//! Trello Poller - runs card triggers on their intervals.
//!
//! # Architecture
//!
//! ```text
//! trello-poller.toml ([[triggers]])
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │       PollerManager                      │
//! │  - One TriggerScheduler per trigger      │
//! │  - Status per trigger                    │
//! └─────────────────────────────────────────┘
//!          ↓  CardTrigger::evaluate on each tick
//! ┌─────────────────────────────────────────┐
//! │       ExecutionSink                      │
//! │  - HttpDispatcher (POST to host)         │
//! │  - LogDispatcher                         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Status of every trigger is served by the [`api`] router.

pub mod api;
pub mod config;
pub mod manager;
pub mod publisher;
pub mod scheduler;

pub use config::PollerConfig;
pub use manager::PollerManager;
pub use publisher::{ExecutionSink, HttpDispatcher, LogDispatcher};
pub use scheduler::{TriggerScheduler, TriggerStatus};
