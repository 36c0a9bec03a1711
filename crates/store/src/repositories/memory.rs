use std::collections::{HashMap, VecDeque};

use tokio::sync::RwLock;

use retention_core::domain::conversation::ConversationTurn;
use retention_core::domain::customer::{CustomerId, CustomerProfile};

use super::{ConversationRepository, CustomerLookup, RepositoryError};

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<String, CustomerProfile>>,
}

impl InMemoryCustomerRepository {
    pub fn with_profiles(profiles: impl IntoIterator<Item = CustomerProfile>) -> Self {
        let customers =
            profiles.into_iter().map(|profile| (profile.id.0.clone(), profile)).collect();
        Self { customers: RwLock::new(customers) }
    }

    pub async fn count(&self) -> usize {
        self.customers.read().await.len()
    }
}

#[async_trait::async_trait]
impl CustomerLookup for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<CustomerProfile>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id.0).cloned())
    }

    async fn save(&self, profile: CustomerProfile) -> Result<(), RepositoryError> {
        let mut customers = self.customers.write().await;
        customers.insert(profile.id.0.clone(), profile);
        Ok(())
    }
}

/// Turns kept per customer before the oldest are dropped.
pub const MAX_TURNS_PER_CUSTOMER: usize = 200;

/// Per-customer turn log, kept in arrival order. Holds at most `turn_limit` turns per
/// customer; the number of customers is not bounded.
pub struct InMemoryConversationRepository {
    turns: RwLock<HashMap<String, VecDeque<ConversationTurn>>>,
    turn_limit: usize,
}

impl InMemoryConversationRepository {
    pub fn with_turn_limit(turn_limit: usize) -> Self {
        Self { turns: RwLock::new(HashMap::new()), turn_limit: turn_limit.max(1) }
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::with_turn_limit(MAX_TURNS_PER_CUSTOMER)
    }
}

#[async_trait::async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn append(
        &self,
        customer: &CustomerId,
        turn: ConversationTurn,
    ) -> Result<(), RepositoryError> {
        let mut turns = self.turns.write().await;
        let log = turns.entry(customer.0.clone()).or_default();
        if log.len() == self.turn_limit {
            log.pop_front();
        }
        log.push_back(turn);
        Ok(())
    }

    async fn list_for_customer(
        &self,
        customer: &CustomerId,
    ) -> Result<Vec<ConversationTurn>, RepositoryError> {
        let turns = self.turns.read().await;
        Ok(turns.get(&customer.0).map(|log| log.iter().cloned().collect()).unwrap_or_default())
    }
}
