use std::sync::Arc;

use crate::analysis::CvAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analysis backend. Default: `LlmCvAnalyzer` over OpenRouter.
    pub analyzer: Arc<dyn CvAnalyzer>,
}
