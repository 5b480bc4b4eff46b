use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::trigger::{CardAction, CardRecord, PollResult};


/// Event emitted by the card trigger when a poll finds changes.
///
/// Top-level card fields mirror the latest record; `allNewCards` carries
/// every record of the poll in merge order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEvent {
    pub card_id: Option<String>,
    pub card_name: Option<String>,
    pub card_url: Option<String>,
    pub card_description: Option<String>,
    pub list_id: Option<String>,
    pub board_id: Option<String>,
    pub last_activity: DateTime<Utc>,
    /// "created" or "updated"
    pub action: CardAction,
    /// Total number of new or updated cards found
    pub new_cards_count: usize,
    pub all_new_cards: Vec<CardRecord>,
}

impl From<PollResult> for CardEvent {
    fn from(result: PollResult) -> Self {
        let latest = result.latest().clone();
        let all_new_cards = result.into_records();
        Self {
            card_id: latest.card_id,
            card_name: latest.card_name,
            card_url: latest.card_url,
            card_description: latest.card_description,
            list_id: latest.list_id,
            board_id: latest.board_id,
            last_activity: latest.last_activity,
            action: latest.action,
            new_cards_count: all_new_cards.len(),
            all_new_cards,
        }
    }
}

/// Envelope the host dispatches when a trigger fires.
///
/// Execution ids are UUIDv7, so they sort by firing time.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerExecution {
    pub execution_id: String,
    pub trigger_id: String,
    /// Unix epoch milliseconds
    pub fired_at: i64,
    pub payload: CardEvent,
}

impl TriggerExecution {
    pub fn new(trigger_id: impl Into<String>, payload: CardEvent) -> Self {
        Self {
            execution_id: Uuid::now_v7().to_string(),
            trigger_id: trigger_id.into(),
            fired_at: Utc::now().timestamp_millis(),
            payload,
        }
    }
}
