//! Where trigger executions go once a poll fires.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;
use trello::TriggerExecution;

#[async_trait]
pub trait ExecutionSink: Send + Sync {
    async fn dispatch(&self, execution: &TriggerExecution) -> Result<()>;
}

/// POSTs each execution as JSON to the host's dispatch endpoint.
pub struct HttpDispatcher {
    url: String,
    http_client: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ExecutionSink for HttpDispatcher {
    async fn dispatch(&self, execution: &TriggerExecution) -> Result<()> {
        let response = self
            .http_client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(execution)
            .send()
            .await
            .context("Failed to send execution to dispatch endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());

            anyhow::bail!("Dispatch endpoint returned error status {}: {}", status, body);
        }

        info!(
            trigger_id = %execution.trigger_id,
            execution_id = %execution.execution_id,
            new_cards_count = execution.payload.new_cards_count,
            "Dispatched trigger execution"
        );

        Ok(())
    }
}

/// Logs executions without forwarding them. Used when no dispatch URL is set.
pub struct LogDispatcher;

#[async_trait]
impl ExecutionSink for LogDispatcher {
    async fn dispatch(&self, execution: &TriggerExecution) -> Result<()> {
        info!(
            trigger_id = %execution.trigger_id,
            execution_id = %execution.execution_id,
            card_id = execution.payload.card_id.as_deref().unwrap_or("<none>"),
            action = %execution.payload.action,
            new_cards_count = execution.payload.new_cards_count,
            "Trigger fired"
        );
        Ok(())
    }
}
