//! HTTP handlers.
//!
//! Each request runs an independent analysis; the only shared state is the
//! read-only [`ContractAnalyzer`].

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use super::params::{AnalyzeParams, ErrorBody};
use crate::agent::{AnalysisResponse, ContractAnalyzer};
use crate::core::Document;
use crate::error::Error;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    analyzer: Arc<ContractAnalyzer>,
}

impl AppState {
    /// Wraps an analyzer for sharing across requests.
    #[must_use]
    pub fn new(analyzer: ContractAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Error response: input problems are 400, everything else 500.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Error detail sent to the client.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = if err.is_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze_contract", post(analyze_contract))
        .route("/health", get(health))
        .with_state(state)
}

/// `POST /analyze_contract`: plan and run a full analysis.
///
/// # Errors
///
/// Returns [`ApiError`] with 400 for a malformed body or blank document and
/// 500 for any retrieval or generation failure.
pub async fn analyze_contract(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeParams>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(params) = payload?;
    let name = params.name.unwrap_or_else(|| "upload".to_string());
    let document = Document::from_text(name, &params.document).map_err(Error::from)?;

    info!(document = document.name(), "analysis requested");
    match state.analyzer.analyze_document(&document).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            error!(document = document.name(), error = %err, "analysis failed");
            Err(err.into())
        }
    }
}

/// `GET /health`.
pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::mock::MockProvider;
    use crate::agent::{AgentConfig, PromptSet};
    use crate::core::sample::SAMPLE_CONTRACT;
    use crate::core::{ProfileTable, RosterPlanner};
    use crate::error::InputError;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, header};

    fn state(provider: MockProvider) -> AppState {
        let config = AgentConfig::builder()
            .api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let analyzer = ContractAnalyzer::new(
            RosterPlanner::new(Arc::new(ProfileTable::default())),
            Arc::new(provider),
            config,
        )
        .with_prompts(PromptSet::defaults());
        AppState::new(analyzer)
    }

    fn params(document: &str) -> Result<Json<AnalyzeParams>, JsonRejection> {
        Ok(Json(AnalyzeParams {
            document: document.to_string(),
            name: None,
        }))
    }

    async fn parse_body(body: &'static str) -> Result<Json<AnalyzeParams>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze_contract")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap_or_else(|_| unreachable!());
        Json::<AnalyzeParams>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_analyze_contract_success() {
        let result = analyze_contract(
            State(state(MockProvider::new("finding"))),
            params(SAMPLE_CONTRACT),
        )
        .await;
        let Ok(Json(response)) = result else {
            unreachable!("analysis should succeed");
        };
        assert_eq!(response.status, "Success");
        assert!(response.strategy_used.contains(&"Legal_Agent".to_string()));
        assert!(response.strategy_used.contains(&"Compliance_Agent".to_string()));
    }

    #[tokio::test]
    async fn test_blank_document_is_bad_request() {
        let result =
            analyze_contract(State(state(MockProvider::new("unused"))), params("   ")).await;
        let Err(err) = result else {
            unreachable!("blank document must be rejected");
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.detail().contains("empty"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_internal_error() {
        let provider = MockProvider::new("finding").failing_on(0);
        let result = analyze_contract(State(state(provider)), params(SAMPLE_CONTRACT)).await;
        let Err(err) = result else {
            unreachable!("provider failure must surface");
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail().contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let provider = Arc::new(MockProvider::new("unused"));
        let payload = parse_body("{\"document\": ").await;
        assert!(payload.is_err());

        let config = AgentConfig::builder()
            .api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let analyzer = ContractAnalyzer::new(
            RosterPlanner::new(Arc::new(ProfileTable::default())),
            provider.clone(),
            config,
        )
        .with_prompts(PromptSet::defaults());
        let result = analyze_contract(State(AppState::new(analyzer)), payload).await;
        let Err(err) = result else {
            unreachable!("malformed body must be rejected");
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(!err.detail().is_empty());
        assert_eq!(provider.call_count(), 0);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
        assert!(value["detail"].is_string());
    }

    #[tokio::test]
    async fn test_missing_document_field_is_bad_request() {
        let Err(rejection) = parse_body("{\"name\": \"msa\"}").await else {
            unreachable!("document is required");
        };
        assert_eq!(ApiError::from(rejection).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_response_status() {
        let err: ApiError = Error::from(InputError::EmptyQuestion).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }
}
