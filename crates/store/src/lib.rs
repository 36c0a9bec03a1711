pub mod fixtures;
pub mod metrics;
pub mod repositories;

pub use fixtures::{demo_customers, load_catalog, load_customers, FixtureError};
pub use metrics::{ConversationMetrics, MetricsSnapshot, TicketSequence, OFFER_CONFIDENCE_THRESHOLD};
pub use repositories::{
    ConversationRepository, CustomerLookup, InMemoryConversationRepository,
    InMemoryCustomerRepository, RepositoryError,
};
