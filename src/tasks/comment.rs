use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::Task;
use crate::client::TrelloClient;
use crate::config::ConnectionConfig;

/// Add a comment to a card.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(flatten)]
    pub connection: ConnectionConfig,
    pub card_id: String,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentOutput {
    pub comment_id: Option<String>,
}

#[async_trait]
impl Task for Comment {
    type Output = CommentOutput;

    fn name(&self) -> &str {
        "comment"
    }

    fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    async fn execute(&self, client: &TrelloClient) -> Result<CommentOutput> {
        let action = client.add_comment(&self.card_id, &self.text).await?;
        info!(card_id = %self.card_id, "Added comment to Trello card");
        Ok(CommentOutput {
            comment_id: action.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::test_support::{connection, AUTH};
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_comment_returns_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                Matcher::Regex(r"^/1/cards/card123/actions/comments".to_string()),
            )
            .match_header("authorization", AUTH)
            .match_query(Matcher::UrlEncoded(
                "text".to_string(),
                "This is a test comment".to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"id": "comment-id-123", "type": "commentCard"}"#)
            .create_async()
            .await;

        let task = Comment {
            connection: connection(&server),
            card_id: "card123".to_string(),
            text: "This is a test comment".to_string(),
        };

        let output = task.run().await.unwrap();
        assert_eq!(output.comment_id.as_deref(), Some("comment-id-123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_comment_without_id_in_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                Matcher::Regex(r"^/1/cards/card123/actions/comments".to_string()),
            )
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let task = Comment {
            connection: connection(&server),
            card_id: "card123".to_string(),
            text: "hi".to_string(),
        };

        assert_eq!(task.run().await.unwrap(), CommentOutput { comment_id: None });
    }

    #[tokio::test]
    async fn test_comment_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock(
                "POST",
                Matcher::Regex(r"^/1/cards/card123/actions/comments".to_string()),
            )
            .with_status(403)
            .with_body("not permitted")
            .create_async()
            .await;

        let task = Comment {
            connection: connection(&server),
            card_id: "card123".to_string(),
            text: "hi".to_string(),
        };

        let err = task.run().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to add comment: 403 - not permitted");
    }
}
