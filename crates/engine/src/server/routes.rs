use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::error;

use crate::{
    store::AssessmentType,
    workflow::WorkflowEngine,
    Error,
};

/// Translates engine errors into HTTP responses. Structured fields
/// (missing prerequisites, recommended action) survive into the body so
/// the dispatcher can relay them to the assistant.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "session_not_found", "session_id": id }),
            ),
            Error::UnknownTool(tool) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "unknown_tool", "tool": tool }),
            ),
            Error::DependencyUnsatisfied {
                tool,
                missing,
                recommended_action,
            } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "dependency_unsatisfied",
                    "tool": tool,
                    "missing_dependencies": missing,
                    "recommended_action": recommended_action,
                }),
            ),
            Error::AutoExecutionUnavailable(reason) => (
                StatusCode::CONFLICT,
                json!({ "error": "auto_execution_unavailable", "reason": reason }),
            ),
            e => {
                error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics() -> String {
    crate::metrics::gather_metrics()
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub project_name: String,
    pub project_description: String,
    /// Explicit template override; omitted means auto-detect.
    pub assessment_type: Option<String>,
}

pub async fn create_session(
    State(engine): State<Arc<WorkflowEngine>>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Response, ApiError> {
    // An explicit type is honored only when it parses; anything else
    // falls back to auto-detection from the description.
    let assessment_type = req
        .assessment_type
        .as_deref()
        .and_then(AssessmentType::parse);

    let session = engine
        .create_session(req.project_name, req.project_description, assessment_type)
        .await?;

    let body = json!({
        "session_id": session.id,
        "assessment_type": session.assessment_type,
        "workflow_sequence": session.workflow_sequence,
        "state": session.state,
    });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn get_session(
    State(engine): State<Arc<WorkflowEngine>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session = engine.get_session(&id).await?;
    Ok(Json(session).into_response())
}

pub async fn workflow_summary(
    State(engine): State<Arc<WorkflowEngine>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let summary = engine.workflow_summary(&id).await?;
    Ok(Json(summary).into_response())
}

pub async fn execute_tool(
    State(engine): State<Arc<WorkflowEngine>>,
    Path((id, tool)): Path<(String, String)>,
    Json(tool_result): Json<JsonValue>,
) -> Result<Response, ApiError> {
    let report = engine.execute_tool(&id, &tool, tool_result).await?;
    Ok(Json(report).into_response())
}

#[derive(Debug, Deserialize)]
pub struct AutoExecuteRequest {
    #[serde(default = "default_steps")]
    pub steps_to_execute: usize,
}

fn default_steps() -> usize {
    3
}

pub async fn auto_execute(
    State(engine): State<Arc<WorkflowEngine>>,
    Path(id): Path<String>,
    Json(req): Json<AutoExecuteRequest>,
) -> Result<Response, ApiError> {
    let plan = engine
        .auto_execute_workflow(&id, req.steps_to_execute)
        .await?;
    Ok(Json(plan).into_response())
}
