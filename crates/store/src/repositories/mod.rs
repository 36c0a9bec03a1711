use async_trait::async_trait;
use thiserror::Error;

use retention_core::domain::conversation::ConversationTurn;
use retention_core::domain::customer::{CustomerId, CustomerProfile};

pub mod memory;

pub use memory::{InMemoryConversationRepository, InMemoryCustomerRepository};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<CustomerProfile>, RepositoryError>;
    async fn save(&self, profile: CustomerProfile) -> Result<(), RepositoryError>;

    /// Known profile for `id`, or the default profile when the store has none.
    async fn resolve(&self, id: &CustomerId) -> Result<CustomerProfile, RepositoryError> {
        let found = self.find_by_id(id).await?;
        Ok(found.unwrap_or_else(|| CustomerProfile::fallback(id.clone())))
    }
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn append(&self, customer: &CustomerId, turn: ConversationTurn)
        -> Result<(), RepositoryError>;
    async fn list_for_customer(
        &self,
        customer: &CustomerId,
    ) -> Result<Vec<ConversationTurn>, RepositoryError>;
}
