use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only path to the language model. Holds the credential; handlers
    /// never see it.
    pub completion: CompletionClient,
    pub config: Config,
}
