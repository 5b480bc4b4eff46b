use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::target::{QueryTarget, TargetKind};
use super::window::PollWindow;
use crate::client::TrelloCard;

/// Whether a card looks newly created or merely changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardAction {
    Created,
    Updated,
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardAction::Created => write!(f, "created"),
            CardAction::Updated => write!(f, "updated"),
        }
    }
}

/// One card that changed inside the poll window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub card_id: Option<String>,
    pub card_name: Option<String>,
    pub card_url: Option<String>,
    pub card_description: Option<String>,
    pub list_id: Option<String>,
    pub board_id: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub action: CardAction,
}

/// A card whose `dateLastActivity` is present but not an ISO-8601 instant.
#[derive(Debug)]
pub struct CardParseError {
    pub card_id: Option<String>,
    pub value: String,
    source: chrono::ParseError,
}

impl fmt::Display for CardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "card '{}' has an invalid dateLastActivity '{}': {}",
            self.card_id.as_deref().unwrap_or("<unknown>"),
            self.value,
            self.source
        )
    }
}

impl std::error::Error for CardParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Normalize one card returned for `target`.
///
/// Returns `Ok(None)` when the card has no activity timestamp or its
/// activity is not after the window's cutoff. An unparseable timestamp
/// is an error.
///
/// A list query always reports the queried list; a board query always
/// reports the queried board. The other identifier comes from the card.
pub fn parse_card(
    card: &TrelloCard,
    target: &QueryTarget,
    window: &PollWindow,
) -> Result<Option<CardRecord>, CardParseError> {
    let raw = match card.date_last_activity.as_deref() {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let last_activity = DateTime::parse_from_rfc3339(raw)
        .map_err(|source| CardParseError {
            card_id: card.id.clone(),
            value: raw.to_string(),
            source,
        })?
        .with_timezone(&Utc);

    if !window.includes(last_activity) {
        return Ok(None);
    }

    let (list_id, board_id) = match target.kind {
        TargetKind::List => (Some(target.id.clone()), card.id_board.clone()),
        TargetKind::Board => (card.id_list.clone(), Some(target.id.clone())),
    };

    Ok(Some(CardRecord {
        card_id: card.id.clone(),
        card_name: card.name.clone(),
        card_url: card.short_url.clone(),
        card_description: card.desc.clone(),
        list_id,
        board_id,
        last_activity,
        action: window.classify(last_activity),
    }))
}
