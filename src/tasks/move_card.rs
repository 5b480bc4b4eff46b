use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::Task;
use crate::client::{CardChanges, TrelloClient};
use crate::config::ConnectionConfig;

/// Move a card to another list.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    pub card_id: String,
    /// Target list
    pub id_list: String,
    /// Position in the target list: "top", "bottom" or a positive float
    #[serde(default)]
    pub pos: Option<String>,
}

#[async_trait]
impl Task for Move {
    type Output = ();

    fn name(&self) -> &str {
        "move"
    }

    fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    async fn execute(&self, client: &TrelloClient) -> Result<()> {
        let changes = CardChanges {
            id_list: Some(self.id_list.clone()),
            pos: self.pos.clone(),
            ..Default::default()
        };
        client.update_card(&self.card_id, &changes, "move").await?;
        info!(card_id = %self.card_id, id_list = %self.id_list, "Moved Trello card");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::test_support::{connection, AUTH};
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_move_to_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/1/cards/card123")
            .match_header("authorization", AUTH)
            .match_body(Matcher::Json(serde_json::json!({
                "idList": "list456",
                "pos": "bottom"
            })))
            .with_status(200)
            .with_body(r#"{"id": "card123", "idList": "list456"}"#)
            .create_async()
            .await;

        let task = Move {
            connection: connection(&server),
            card_id: "card123".to_string(),
            id_list: "list456".to_string(),
            pos: Some("bottom".to_string()),
        };

        task.run().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_move_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("PUT", "/1/cards/card123")
            .with_status(400)
            .with_body("invalid id")
            .create_async()
            .await;

        let task = Move {
            connection: connection(&server),
            card_id: "card123".to_string(),
            id_list: "bogus".to_string(),
            pos: None,
        };

        let err = task.run().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to move card: 400 - invalid id");
    }

    #[test]
    fn test_definition_requires_target_list() {
        let result: Result<Move, _> = serde_json::from_value(serde_json::json!({
            "apiKey": "k",
            "apiToken": "t",
            "cardId": "card123"
        }));
        assert!(result.is_err());
    }
}
