use async_trait::async_trait;
use feedback_asana::{AsanaClient, AsanaError};

/// Files one task in the external tracker and returns its id.
#[async_trait]
pub trait TaskCreator: Send + Sync {
    async fn create_task(&self, name: &str, notes: &str) -> Result<String, AsanaError>;
}

#[async_trait]
impl TaskCreator for AsanaClient {
    async fn create_task(&self, name: &str, notes: &str) -> Result<String, AsanaError> {
        AsanaClient::create_task(self, name, notes).await
    }
}
