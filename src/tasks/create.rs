use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Task;
use crate::client::{NewCard, TrelloClient};
use crate::config::ConnectionConfig;

/// Create a card in a list.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Create {
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    /// Name of the card
    pub name: String,
    /// List the card is created in
    pub id_list: String,
    #[serde(default)]
    pub desc: Option<String>,
    /// "top", "bottom" or a positive float
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCard {
    pub card_id: Option<String>,
    pub card_url: Option<String>,
}

#[async_trait]
impl Task for Create {
    type Output = CreatedCard;

    fn name(&self) -> &str {
        "create"
    }

    fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    async fn execute(&self, client: &TrelloClient) -> Result<CreatedCard> {
        let card = client
            .create_card(&NewCard {
                name: self.name.clone(),
                id_list: self.id_list.clone(),
                desc: self.desc.clone(),
                pos: self.pos.clone(),
                due: self.due.clone(),
            })
            .await?;

        info!(
            card_id = card.id.as_deref().unwrap_or("<unknown>"),
            id_list = %self.id_list,
            "Created Trello card"
        );

        Ok(CreatedCard {
            card_id: card.id,
            card_url: card.short_url,
        })
    }
}
