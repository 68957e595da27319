use serde_json::Value as JsonValue;
use tracing::debug;

use crate::registry::{ToolCategory, ToolDescriptor};
use crate::store::{Session, WorkflowState};

/// How a stored result is judged successful. The validation tool carries
/// a nested pass flag; every other tool succeeds unless it explicitly
/// says otherwise.
pub fn result_success(descriptor: &ToolDescriptor, result: &JsonValue) -> bool {
    match descriptor.category {
        ToolCategory::Validation => result
            .pointer("/validation/is_valid")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false),
        _ => result
            .get("success")
            .and_then(JsonValue::as_bool)
            .unwrap_or(true),
    }
}

/// Advances the coarse workflow state after a tool has executed and its
/// result was recorded. The state is advisory ("where are we"); whether
/// a tool was allowed to run is the dependency validator's job alone.
pub fn advance(session: &mut Session, descriptor: &ToolDescriptor, success: bool) {
    match descriptor.category {
        ToolCategory::Validation => {
            session.validation_passed = success;
            // A re-run that passes overrides an earlier sticky failure.
            session.state = if success {
                WorkflowState::Validating
            } else {
                WorkflowState::Failed
            };
        }
        ToolCategory::Analysis => session.state = WorkflowState::Analyzing,
        ToolCategory::Assessment => session.state = WorkflowState::Assessing,
        ToolCategory::Export => {
            session.state = WorkflowState::Reporting;
            // This export was the last or second-to-last remaining step.
            if session.completed_tools.len() >= session.workflow_sequence.len().saturating_sub(1) {
                session.state = WorkflowState::Completed;
            }
        }
    }

    if let Some(idx) = session
        .workflow_sequence
        .iter()
        .position(|t| t == descriptor.name)
    {
        session.current_step_index = idx + 1;
    }

    debug!(
        session_id = %session.id,
        tool = descriptor.name,
        state = %session.state,
        step = session.current_step_index,
        "workflow state advanced"
    );
}
