//! Polling trigger that detects new or updated Trello cards.
//!
//! # Poll cycle
//!
//! ```text
//! Idle
//!   ↓  resolve sources (board, list, listIds...)
//! Fetching  (one GET per target, sequential)
//!   ↓  parse + filter by cutoff, classify created/updated
//! Merging   (concatenate in target order, pick latest)
//!   ↓
//! Emit CardEvent | No-op
//! ```
//!
//! Any fetch or parse failure aborts the cycle; nothing is emitted for
//! the targets that were already fetched.

mod card;
mod target;
mod window;

pub use card::{parse_card, CardAction, CardParseError, CardRecord};
pub use target::{resolve_targets, QueryTarget, TargetKind};
pub use window::{PollWindow, CREATION_GRACE_SECS};

use crate::client::TrelloClient;
use crate::config::ConnectionConfig;
use crate::event::CardEvent;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_INTERVAL_SECS: u64 = 300;

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

/// Trigger on Trello card creation or update.
///
/// Watches any combination of a single list, several lists and a board.
/// With none of them configured every poll is a no-op.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTrigger {
    /// Trigger identifier, used in logs and execution envelopes
    pub id: String,
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    /// Single list to monitor
    #[serde(default)]
    pub list_id: Option<String>,
    /// Several lists to monitor, in order
    #[serde(default)]
    pub list_ids: Option<Vec<String>>,
    /// Board to monitor across all of its lists
    #[serde(default)]
    pub board_id: Option<String>,
    /// Polling interval in seconds (default 5 minutes)
    #[serde(rename = "interval", default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl CardTrigger {
    pub fn new(id: impl Into<String>, connection: ConnectionConfig) -> Self {
        Self {
            id: id.into(),
            connection,
            list_id: None,
            list_ids: None,
            board_id: None,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }

    /// Fails when `interval` does not fit a signed duration.
    pub fn interval(&self) -> Result<Duration> {
        i64::try_from(self.interval_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .with_context(|| {
                format!(
                    "trigger '{}' interval of {} seconds is out of range",
                    self.id, self.interval_secs
                )
            })
    }

    /// Targets queried by each poll, in merge order.
    pub fn targets(&self) -> Vec<QueryTarget> {
        resolve_targets(
            self.board_id.as_deref(),
            self.list_id.as_deref(),
            self.list_ids.as_deref().unwrap_or_default(),
        )
    }

    /// Run one poll cycle.
    ///
    /// `next_execution` is the scheduler's next-execution time for this
    /// trigger; the cutoff is that time minus the interval, or now minus
    /// the interval when the scheduler has none. The HTTP client lives
    /// for this call only.
    pub async fn evaluate(
        &self,
        next_execution: Option<DateTime<Utc>>,
    ) -> Result<Option<CardEvent>> {
        let window = PollWindow::resolve(next_execution, self.interval()?, Utc::now())?;
        self.evaluate_window(&window).await
    }

    /// Run one poll cycle over an explicit window. Hosts that track the
    /// previous cutoff themselves use this instead of [`Self::evaluate`].
    pub async fn evaluate_window(&self, window: &PollWindow) -> Result<Option<CardEvent>> {
        let client = TrelloClient::new(self.connection.clone())?;
        let result = self.poll(&client, window).await?;
        Ok(result.map(CardEvent::from))
    }

    /// Fetch every target, keep the cards changed after the cutoff and merge them.
    pub async fn poll(
        &self,
        client: &TrelloClient,
        window: &PollWindow,
    ) -> Result<Option<PollResult>> {
        let targets = self.targets();
        info!(
            trigger_id = %self.id,
            target_count = targets.len(),
            cutoff = %window.cutoff,
            "Polling Trello for card changes"
        );

        let mut records = Vec::new();
        for target in &targets {
            let cards = match client.fetch_cards(&target.cards_endpoint()).await {
                Ok(cards) => cards,
                Err(e) => {
                    warn!(
                        trigger_id = %self.id,
                        collection = %target,
                        error = %e,
                        "Card fetch failed, aborting poll"
                    );
                    return Err(e);
                }
            };

            let before = records.len();
            for card in &cards {
                if let Some(record) = parse_card(card, target, window)? {
                    records.push(record);
                }
            }
            debug!(
                trigger_id = %self.id,
                collection = %target,
                fetched = cards.len(),
                kept = records.len() - before,
                "Fetched cards"
            );
        }

        let result = PollResult::from_records(records);
        match &result {
            Some(result) => info!(
                trigger_id = %self.id,
                record_count = result.count(),
                "Found new or updated cards"
            ),
            None => info!(trigger_id = %self.id, "No new or updated cards found"),
        }
        Ok(result)
    }
}

/// Non-empty set of records from one poll plus the one chosen as latest.
#[derive(Clone, Debug, PartialEq)]
pub struct PollResult {
    records: Vec<CardRecord>,
    latest: usize,
}

impl PollResult {
    /// `None` when there are no records.
    ///
    /// Latest is the record with the greatest `last_activity`; on a tie the
    /// first one in merge order wins.
    pub fn from_records(records: Vec<CardRecord>) -> Option<Self> {
        let mut latest = 0;
        for (index, record) in records.iter().enumerate().skip(1) {
            if record.last_activity > records[latest].last_activity {
                latest = index;
            }
        }
        if records.is_empty() {
            None
        } else {
            Some(Self { records, latest })
        }
    }

    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn latest(&self) -> &CardRecord {
        &self.records[self.latest]
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<CardRecord> {
        self.records
    }
}
