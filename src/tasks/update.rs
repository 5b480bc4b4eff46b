use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::Task;
use crate::client::{CardChanges, TrelloClient};
use crate::config::ConnectionConfig;

/// Update fields of an existing card. Absent fields are left unchanged.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    pub card_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    /// Archive (true) or unarchive (false) the card
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
}

#[async_trait]
impl Task for Update {
    type Output = ();

    fn name(&self) -> &str {
        "update"
    }

    fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    async fn execute(&self, client: &TrelloClient) -> Result<()> {
        let changes = CardChanges {
            name: self.name.clone(),
            desc: self.desc.clone(),
            closed: self.closed,
            due: self.due.clone(),
            pos: self.pos.clone(),
            ..Default::default()
        };
        client.update_card(&self.card_id, &changes, "update").await?;
        info!(card_id = %self.card_id, "Updated Trello card");
        Ok(())
    }
}
