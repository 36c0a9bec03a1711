use retention_core::engine::intent::classify;
use serde_json::json;

use super::CommandResult;

pub fn run(message: &str) -> CommandResult {
    let intent = classify(message);
    CommandResult::success_with_data(
        "classify",
        format!("classified as {intent}"),
        json!({ "intent": intent }),
    )
}
