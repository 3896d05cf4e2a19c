use sellery_api::HttpMarketplace;
use sellery_core::config::AppConfig;
use sellery_core::errors::ApiError;
use sellery_core::marketplace::MarketplaceApi;

use crate::commands::CommandResult;

pub fn run(config: &AppConfig, json: bool) -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "health",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                3,
            )
        }
    };

    let api = match HttpMarketplace::new(&config.api) {
        Ok(api) => api,
        Err(error) => return CommandResult::failure("health", "api_client", error.to_string(), 3),
    };

    match runtime.block_on(api.health()) {
        Ok(health) if json => {
            CommandResult::success("health", format!("Server status: {}", health.status))
        }
        Ok(health) => {
            CommandResult { exit_code: 0, output: format!("Server status: {}", health.status) }
        }
        Err(error) if json => {
            CommandResult::failure("health", error_class(&error), error.to_string(), 1)
        }
        Err(error) => {
            CommandResult { exit_code: 1, output: format!("Health check failed: {error}") }
        }
    }
}

fn error_class(error: &ApiError) -> &'static str {
    match error {
        ApiError::Status { .. } => "api_status",
        ApiError::Transport(_) => "api_unreachable",
        ApiError::MalformedBody => "api_malformed",
    }
}
