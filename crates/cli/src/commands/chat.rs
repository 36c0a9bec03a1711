use retention_core::domain::customer::CustomerId;
use retention_core::engine::intent::KeywordIntentClassifier;
use retention_core::engine::policy::TemplateDialoguePolicy;
use retention_core::engine::{DeterministicDialogueEngine, DialogueEngine};
use retention_store::CustomerLookup;

use super::{block_on, load_runtime_data, CommandResult, EXIT_DATA};

pub fn run(user_id: &str, message: &str) -> CommandResult {
    let data = match load_runtime_data() {
        Ok(data) => data,
        Err(failure) => return failure.into_result("chat"),
    };

    let customer_id = CustomerId(user_id.to_string());
    let profile = match block_on(data.customers.resolve(&customer_id)) {
        Ok(Ok(profile)) => profile,
        Ok(Err(error)) => {
            return CommandResult::failure("chat", "customer_lookup", error.to_string(), EXIT_DATA)
        }
        Err(message) => return CommandResult::failure("chat", "runtime", message, 1),
    };

    let engine = DeterministicDialogueEngine::new(
        KeywordIntentClassifier,
        TemplateDialoguePolicy::new(data.catalog, data.config.engine.latency_mode),
    );
    let classified = engine.handle(&profile, message);

    CommandResult::success_with_data(
        "chat",
        format!("intent {} answered with {} action", classified.intent, classified.response.action),
        classified.response,
    )
}
