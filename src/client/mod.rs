//! HTTP client for the Trello REST API.
//!
//! Every request carries the OAuth-style `Authorization` header built from
//! the connection's key and token. Anything other than `200 OK` is turned
//! into an error carrying the status code and the response body.

mod types;

pub use types::{CardChanges, CommentAction, NewCard, TrelloCard};

use crate::config::ConnectionConfig;
use anyhow::{bail, Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

/// Trello API client bound to one set of connection settings.
pub struct TrelloClient {
    connection: ConnectionConfig,
    http_client: Client,
    authorization: String,
}

impl TrelloClient {
    pub fn new(connection: ConnectionConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("trello/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        let authorization = connection.authorization_header();
        Ok(Self {
            connection,
            http_client,
            authorization,
        })
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, &self.authorization)
            .header(ACCEPT, "application/json")
    }

    /// Fetch a card collection, e.g. `lists/{id}/cards` or `boards/{id}/cards`.
    pub async fn fetch_cards(&self, endpoint: &str) -> Result<Vec<TrelloCard>> {
        let url = self.connection.api_url(endpoint);
        debug!(url = %url, "Fetching cards");

        let response = self
            .authorized(self.http_client.get(&url))
            .send()
            .await
            .with_context(|| format!("Failed to send fetch cards request to {}", url))?;

        let body = read_success_body(response, "fetch cards").await?;
        serde_json::from_str::<Vec<TrelloCard>>(&body)
            .with_context(|| format!("Failed to parse cards response from {}", endpoint))
    }

    /// `POST /cards`. Returns the created card as reported by Trello.
    pub async fn create_card(&self, card: &NewCard) -> Result<TrelloCard> {
        let url = self.connection.api_url("cards");
        let response = self
            .authorized(self.http_client.post(&url))
            .json(card)
            .send()
            .await
            .context("Failed to send create card request")?;

        let body = read_success_body(response, "create card").await?;
        // The card id is informative only; an unexpected body is not a failure.
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Create card response was not a card object");
            TrelloCard::default()
        }))
    }

    /// `PUT /cards/{id}` with only the fields present in `changes`.
    pub async fn update_card(
        &self,
        card_id: &str,
        changes: &CardChanges,
        verb: &str,
    ) -> Result<()> {
        let url = self.connection.api_url(&format!("cards/{}", card_id));
        let response = self
            .authorized(self.http_client.put(&url))
            .json(changes)
            .send()
            .await
            .with_context(|| format!("Failed to send {} card request", verb))?;

        read_success_body(response, &format!("{} card", verb)).await?;
        Ok(())
    }

    /// `POST /cards/{id}/actions/comments?text=...`
    pub async fn add_comment(&self, card_id: &str, text: &str) -> Result<CommentAction> {
        let url = self
            .connection
            .api_url(&format!("cards/{}/actions/comments", card_id));
        let response = self
            .authorized(self.http_client.post(&url))
            .query(&[("text", text)])
            .send()
            .await
            .context("Failed to send add comment request")?;

        let body = read_success_body(response, "add comment").await?;
        serde_json::from_str(&body).context("Failed to parse add comment response")
    }
}

/// Read the body of a `200 OK` response, or fail with status and body.
async fn read_success_body(response: Response, action: &str) -> Result<String> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        bail!("Failed to {}: {} - {}", action, status.as_u16(), body);
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read {} response body", action))
}
