//! Server application state shared across handlers

use crate::config::AiConfig;
use crate::gateway::{GeminiSearchClient, QueryGateway, SearchModel};
use crate::research::ResearchOrchestrator;
use crate::views::Views;
use std::sync::Arc;

/// Shared state for the server: the rendered views and the research
/// orchestrator with its injected AI capability.
#[derive(Clone)]
pub struct ServerAppState {
    pub views: Arc<Views>,
    pub orchestrator: Arc<ResearchOrchestrator>,
}

impl ServerAppState {
    /// Production wiring: a Gemini search client built from config
    pub fn new(config: AiConfig) -> Result<Self, String> {
        Self::with_model(Arc::new(GeminiSearchClient::new(config)))
    }

    /// Wire the state around any AI capability (tests inject a fake here)
    pub fn with_model(model: Arc<dyn SearchModel>) -> Result<Self, String> {
        let views = Arc::new(
            Views::new().map_err(|e| format!("Failed to compile templates: {}", e))?,
        );
        let orchestrator = Arc::new(ResearchOrchestrator::new(
            QueryGateway::new(model),
            views.clone(),
        ));

        Ok(Self {
            views,
            orchestrator,
        })
    }
}
