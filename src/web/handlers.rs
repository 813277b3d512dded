//! HTTP request handlers

use super::state::AppState;
use crate::breach::BreachResult;
use crate::query::{QueryInput, SearchMode};
use crate::search::SearchState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// `email` (default) or `domain`
    pub mode: Option<String>,
    /// Email address or domain name
    pub q: Option<String>,
}

/// Breach card contents with the description sanitized for rendering
#[derive(Debug, Serialize)]
pub struct BreachView {
    pub title: String,
    pub domain: String,
    pub description: String,
    pub breach_date: String,
    pub status: String,
    pub accounts_affected: String,
    pub compromised_data: Vec<String>,
    pub logo: Option<String>,
}

impl From<&BreachResult> for BreachView {
    fn from(breach: &BreachResult) -> Self {
        Self {
            title: breach.title.clone(),
            domain: breach.domain.clone(),
            description: breach.sanitized_description(),
            breach_date: breach.breach_date.clone(),
            status: breach.status.to_string(),
            accounts_affected: breach.accounts_affected.clone(),
            compromised_data: breach.compromised_data.clone(),
            logo: breach.logo.clone(),
        }
    }
}

/// One of the mutually exclusive views the UI renders
#[derive(Debug, Serialize)]
pub struct StateView {
    pub state: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breach: Option<BreachView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&SearchState> for StateView {
    fn from(state: &SearchState) -> Self {
        let message = match state {
            SearchState::Idle => "Enter an email or domain to check for breaches",
            SearchState::Pending => "Searching...",
            SearchState::Found(_) => "1 Breach Found",
            SearchState::NotFound => "No Breaches Found",
            SearchState::Failed(_) => {
                "The breach lookup could not be completed; no result is available"
            }
        };

        Self {
            state: state.kind(),
            message,
            breach: state.breach().map(BreachView::from),
            reason: state.failure().map(|r| r.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Search handler
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let mut input = QueryInput::new();

    if let Some(ref mode) = params.mode {
        match mode.parse::<SearchMode>() {
            Ok(mode) => input.set_mode(mode),
            Err(e) => return bad_request(e),
        }
    }
    input.set_text(params.q.unwrap_or_default());

    let result = match input.to_query() {
        Ok(query) => state.controller.search(query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(result) => {
            let status = if matches!(result, SearchState::Failed(_)) {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::OK
            };
            (status, Json(StateView::from(&result))).into_response()
        }
        Err(e) => bad_request(e.to_string()),
    }
}

/// Current state of the latest search
pub async fn current_state(State(state): State<AppState>) -> Json<StateView> {
    Json(StateView::from(&state.controller.state()))
}

/// Active lookup source
pub async fn source_info(State(state): State<AppState>) -> impl IntoResponse {
    let source = state.controller.source();
    let settings = &state.settings.source;

    let mut body = serde_json::json!({
        "instance_name": state.instance_name(),
        "source": source.name(),
        "live": source.is_live(),
        "timeout_secs": state.controller.lookup_timeout().as_secs_f64(),
    });

    if source.is_live() {
        body["endpoints"] = serde_json::json!({
            "email": settings.endpoints.email,
            "domain": settings.endpoints.domain,
        });
        body["shared_endpoint"] = settings.endpoints.modes_share_endpoint().into();
    }

    Json(body)
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
