// Research orchestration
//
// Turns a ResearchRequest into a displayable HTML fragment: validate,
// compose the prompt, query the gateway once, render the outcome. Every
// failure path ends here as an inline fragment; nothing propagates.

use crate::gateway::QueryGateway;
use crate::models::{ResearchRequest, ResearchResult, ResearchTopic};
use crate::prompts;
use crate::views::Views;
use pulldown_cmark::{html, Options, Parser};
use std::sync::Arc;

pub struct ResearchOrchestrator {
    gateway: QueryGateway,
    views: Arc<Views>,
}

impl ResearchOrchestrator {
    pub fn new(gateway: QueryGateway, views: Arc<Views>) -> Self {
        Self { gateway, views }
    }

    /// Execute one research action and return the fragment to display.
    ///
    /// Missing parameters and unknown aspects short-circuit without a
    /// gateway call; otherwise exactly one query is issued.
    pub async fn research(&self, request: &ResearchRequest) -> String {
        let conditions: Vec<String> = request
            .conditions
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if request.syndrome.trim().is_empty()
            || request.aspect.trim().is_empty()
            || conditions.is_empty()
        {
            return self
                .views
                .alert("Missing research parameters: aspect, syndrome and conditions are required");
        }

        let topic = match request.aspect.parse::<ResearchTopic>() {
            Ok(topic) => topic,
            Err(_) => {
                return self
                    .views
                    .alert(&format!("Unknown aspect: '{}'", request.aspect));
            }
        };

        let prompt = prompts::compose(&request.syndrome, &conditions, topic);
        log::info!(
            "Researching '{}' for syndrome '{}' ({} conditions)",
            topic.label(),
            request.syndrome,
            conditions.len()
        );

        match self.gateway.query(&prompt).await {
            ResearchResult::Success(text) => self
                .views
                .research_result(topic.label(), &markdown_to_html(&text)),
            ResearchResult::Failure(message) => self
                .views
                .alert(&format!("Research failed: {}", message)),
        }
    }
}

/// Render AI result markdown as HTML, with table support for the
/// full-comparison output
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SearchModel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fake capability that records prompts and replies with canned output
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        response: Result<String, String>,
    }

    impl RecordingModel {
        fn succeeding(text: &str) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                response: Ok(text.to_string()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                response: Err(message.to_string()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchModel for RecordingModel {
        async fn generate(&self, prompt: &str) -> Result<String, String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone()
        }
    }

    fn orchestrator(model: Arc<RecordingModel>) -> ResearchOrchestrator {
        ResearchOrchestrator::new(
            QueryGateway::new(model),
            Arc::new(Views::new().unwrap()),
        )
    }

    fn pharyngitis_request(aspect: &str) -> ResearchRequest {
        ResearchRequest {
            syndrome: "Pharyngitis".to_string(),
            conditions: vec![
                "Strep throat".to_string(),
                "Mono".to_string(),
                "Viral pharyngitis".to_string(),
            ],
            aspect: aspect.to_string(),
        }
    }

    #[tokio::test]
    async fn test_full_comparison_issues_one_call_with_comparison_template() {
        let model = RecordingModel::succeeding("| Aspect | Strep |");
        let fragment = orchestrator(model.clone())
            .research(&pharyngitis_request("full_comparison"))
            .await;

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("markdown table"));
        assert!(calls[0].contains("Strep throat"));
        assert!(fragment.contains("Full Comparison"));
    }

    #[tokio::test]
    async fn test_per_aspect_research_uses_aspect_template() {
        let model = RecordingModel::succeeding("Strep throat peaks in winter.");
        let fragment = orchestrator(model.clone())
            .research(&pharyngitis_request("Epidemiology"))
            .await;

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("epidemiology"));
        assert!(!calls[0].contains("markdown table"));
        assert!(fragment.contains("Strep throat peaks in winter."));
    }

    #[tokio::test]
    async fn test_missing_parameters_skip_the_gateway() {
        let model = RecordingModel::succeeding("unused");
        let orchestrator = orchestrator(model.clone());

        let empty_conditions = ResearchRequest {
            syndrome: "Pharyngitis".to_string(),
            conditions: vec!["".to_string()],
            aspect: "Epidemiology".to_string(),
        };
        let fragment = orchestrator.research(&empty_conditions).await;
        assert!(fragment.contains("Missing research parameters"));

        let no_syndrome = ResearchRequest {
            syndrome: "  ".to_string(),
            conditions: vec!["A".to_string(), "B".to_string()],
            aspect: "Epidemiology".to_string(),
        };
        let fragment = orchestrator.research(&no_syndrome).await;
        assert!(fragment.contains("Missing research parameters"));

        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_aspect_skips_the_gateway() {
        let model = RecordingModel::succeeding("unused");
        let fragment = orchestrator(model.clone())
            .research(&pharyngitis_request("Treatment"))
            .await;

        assert!(fragment.contains("Unknown aspect"));
        assert!(fragment.contains("Treatment"));
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_error_fragment() {
        let model = RecordingModel::failing("quota exceeded");
        let fragment = orchestrator(model)
            .research(&pharyngitis_request("Time Course"))
            .await;

        assert!(fragment.contains("alert-error"));
        assert!(fragment.contains("quota exceeded"));
    }

    #[test]
    fn test_markdown_to_html_renders_tables() {
        let markdown = "| Aspect | Strep |\n| --- | --- |\n| Onset | sudden |";
        let html = markdown_to_html(markdown);
        assert!(html.contains("<table>"));
        assert!(html.contains("sudden"));
    }
}
