use crate::chat::AiService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no provider credential is configured (or the client could
    /// not be built). Handlers substitute fallback content in that case.
    pub ai: Option<AiService>,
    pub config: Config,
}

impl AppState {
    pub fn provider_name(&self) -> Option<&'static str> {
        self.ai.as_ref().map(|ai| ai.provider_name())
    }
}
