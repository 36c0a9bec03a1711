pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod insights;
pub mod replies;

pub use domain::conversation::ConversationTurn;
pub use domain::customer::{CustomerId, CustomerProfile, CustomerRecord, RiskLevel};
pub use domain::dialogue::{Action, ClassifiedResponse, DialogueResponse, Intent, ScriptedReply};
pub use domain::plan::{Plan, PlanComparison, PlanTier};
pub use engine::catalog::{PlanCatalog, PlanCatalogProvider};
pub use engine::intent::{classify, IntentClassifier, KeywordIntentClassifier};
pub use engine::latency::{LatencyMode, LatencySource};
pub use engine::policy::{DialoguePolicy, TemplateDialoguePolicy};
pub use engine::{DefaultDialogueEngine, DeterministicDialogueEngine, DialogueEngine};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use insights::{analyze_profile, ProfileAnalysis, RetentionStrategy};
