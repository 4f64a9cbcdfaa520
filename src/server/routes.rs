//! HTTP handlers for the study table pages and fragments
//!
//! Every handler answers HTTP 200 with a fragment; validation and gateway
//! failures come back as inline alerts, never as error status codes.

use super::ServerAppState;
use crate::models::{ResearchRequest, Study};
use crate::{export, storage};
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;

/// Form body of `POST /create-study`
#[derive(Debug, Deserialize)]
pub struct CreateStudyForm {
    #[serde(default)]
    pub syndrome: String,
    #[serde(default)]
    pub condition1: String,
    #[serde(default)]
    pub condition2: String,
    #[serde(default)]
    pub condition3: String,
}

/// `GET /` - the landing page with the study creation form
pub async fn index(State(state): State<ServerAppState>) -> Html<String> {
    Html(state.views.index_page())
}

/// `POST /create-study` - validate the form and return the table fragment
pub async fn create_study(
    State(state): State<ServerAppState>,
    Form(form): Form<CreateStudyForm>,
) -> Html<String> {
    let raw_conditions = vec![form.condition1, form.condition2, form.condition3];

    match Study::new(&form.syndrome, &raw_conditions) {
        Ok(study) => {
            log::info!(
                "Created study '{}' with {} conditions",
                study.syndrome(),
                study.conditions().len()
            );
            Html(state.views.study_table(&study))
        }
        Err(e) => {
            log::info!("Rejected study form: {}", e);
            Html(
                state
                    .views
                    .alert("Please enter a syndrome and at least 2 conditions"),
            )
        }
    }
}

/// `POST /research` - run one research action and return its fragment.
///
/// The body is read leniently: anything that fails to parse is treated as a
/// request with missing parameters, which renders the fixed inline alert.
pub async fn research(State(state): State<ServerAppState>, body: String) -> Html<String> {
    let request: ResearchRequest = serde_json::from_str(&body).unwrap_or_default();
    Html(state.orchestrator.research(&request).await)
}

/// `POST /export-csv` - rebuild the study from the client's storage slot and
/// answer with a CSV attachment
pub async fn export_csv(State(state): State<ServerAppState>, body: String) -> Response {
    match storage::decode(&body) {
        Some(study) => {
            let csv = export::to_csv(&study);
            let filename = export_filename_header(study.syndrome());
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, filename),
                ],
                csv,
            )
                .into_response()
        }
        None => {
            log::warn!("Export request carried an unreadable study payload");
            Html(
                state
                    .views
                    .alert("No saved study to export - fill in the table and save first"),
            )
            .into_response()
        }
    }
}

/// `GET /health` - liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn export_filename_header(syndrome: &str) -> String {
    format!(
        "attachment; filename=\"{}\"",
        export::export_filename(syndrome)
    )
}
