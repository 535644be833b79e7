use std::sync::Arc;

use crate::assistant::Assistant;
use crate::config::{Config, SecretSource};
use crate::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Keyword scorer over the fixed rule table.
    pub scorer: Arc<dyn ResumeScorer>,
    /// Chat-completions client. Default: `AssistantClient` (OpenRouter).
    pub assistant: Arc<dyn Assistant>,
    /// Where the assistant API key is looked up, once per question.
    pub secrets: Arc<dyn SecretSource>,
}
