use retention_core::domain::customer::CustomerId;
use retention_core::insights::analyze_profile;
use retention_store::CustomerLookup;
use serde_json::json;

use super::{block_on, load_runtime_data, CommandResult, EXIT_DATA};

pub fn run(user_id: &str) -> CommandResult {
    let data = match load_runtime_data() {
        Ok(data) => data,
        Err(failure) => return failure.into_result("profile"),
    };

    let customer_id = CustomerId(user_id.to_string());
    let lookup = block_on(async {
        let known = data.customers.find_by_id(&customer_id).await?;
        let profile = data.customers.resolve(&customer_id).await?;
        Ok::<_, retention_store::RepositoryError>((known.is_some(), profile))
    });

    let (known, profile) = match lookup {
        Ok(Ok(found)) => found,
        Ok(Err(error)) => {
            return CommandResult::failure(
                "profile",
                "customer_lookup",
                error.to_string(),
                EXIT_DATA,
            )
        }
        Err(message) => return CommandResult::failure("profile", "runtime", message, 1),
    };

    let analysis = analyze_profile(&profile);
    let message = if known {
        format!("profile for {customer_id}")
    } else {
        format!("{customer_id} is not a known customer; showing default profile")
    };

    CommandResult::success_with_data(
        "profile",
        message,
        json!({ "known": known, "profile": profile, "analysis": analysis }),
    )
}
