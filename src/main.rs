use std::sync::Arc;

use game_swap_finder::division::DivisionRegistry;
use game_swap_finder::handler::handler;
use game_swap_finder::logging;
use lambda_runtime::{Error, service_fn};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_json();

    // A broken division table is fatal before the first invocation.
    let registry = match DivisionRegistry::standard() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            error!(error = %e, "Invalid division registry");
            return Err(e.into());
        }
    };

    lambda_runtime::run(service_fn(move |event| handler(event, Arc::clone(&registry)))).await
}
