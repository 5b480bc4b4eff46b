//! Card task adapters.
//!
//! Each task is a declarative definition (deserializable from the host's
//! task definition) holding its connection settings and inputs. Running a
//! task performs exactly one request against the Trello API.

mod comment;
mod create;
mod move_card;
mod update;

pub use comment::{Comment, CommentOutput};
pub use create::{Create, CreatedCard};
pub use move_card::Move;
pub use update::Update;

use crate::client::TrelloClient;
use crate::config::ConnectionConfig;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// A runnable Trello task.
///
/// # Example
/// ```no_run
/// use trello::tasks::{Comment, Task};
/// use trello::ConnectionConfig;
///
/// # async fn run() -> anyhow::Result<()> {
/// let task = Comment {
///     connection: ConnectionConfig::new("key", "token"),
///     card_id: "5abbe4b7ddc1b351ef961414".to_string(),
///     text: "Deployed to staging".to_string(),
/// };
/// let output = task.run().await?;
/// println!("comment id: {:?}", output.comment_id);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Task: Send + Sync {
    /// What the task reports back to the host.
    type Output: Serialize + Send;

    /// Task type name used in logs (e.g. "create").
    fn name(&self) -> &str;

    fn connection(&self) -> &ConnectionConfig;

    /// Perform the request with an existing client.
    async fn execute(&self, client: &TrelloClient) -> Result<Self::Output>;

    /// Perform the request with a client scoped to this run.
    async fn run(&self) -> Result<Self::Output> {
        let client = TrelloClient::new(self.connection().clone())?;
        self.execute(&client).await
    }
}
