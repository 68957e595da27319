use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::classifier;
use crate::metrics::{DEPENDENCY_REJECTIONS_TOTAL, SESSIONS_CREATED_TOTAL, TOOLS_EXECUTED_TOTAL};
use crate::registry;
use crate::store::{AssessmentType, Session, SessionStore, WorkflowState};
use crate::workflow::{
    advisor::{self, NextAction, Recommendation},
    planner::{self, ExecutionPlan},
    progress, transitions, validator,
};

/// Bookkeeping snapshot returned after every tool execution.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStatusReport {
    pub session_id: String,
    pub state: WorkflowState,
    pub completed_tools: Vec<String>,
    /// Fraction of this session's own sequence that has executed.
    pub progress: f64,
    pub next_actions: Vec<NextAction>,
    pub recommendation: Recommendation,
}

/// Full session snapshot plus routing guidance.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSummary {
    pub session: Session,
    pub progress: f64,
    pub progress_rendered: String,
    pub next_actions: Vec<NextAction>,
    pub recommendation: Recommendation,
}

/// Orchestration facade. Owns no state of its own; all session data
/// lives in the injected store. The dispatcher runs each tool's business
/// logic and reports the result here; the engine validates ordering,
/// persists the result, advances state, and returns routing guidance.
pub struct WorkflowEngine {
    store: Arc<dyn SessionStore>,
}

impl WorkflowEngine {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Creates a session, classifying the description when no explicit
    /// assessment type is supplied, and snapshotting the template's tool
    /// sequence.
    pub async fn create_session(
        &self,
        project_name: String,
        project_description: String,
        assessment_type: Option<AssessmentType>,
    ) -> crate::Result<Session> {
        let assessment_type =
            assessment_type.unwrap_or_else(|| classifier::classify(&project_description));
        let sequence = registry::sequence_for(assessment_type);
        let session = Session::new(project_name, project_description, assessment_type, sequence);
        info!(
            session_id = %session.id,
            assessment_type = %assessment_type,
            steps = session.workflow_sequence.len(),
            "created session"
        );
        SESSIONS_CREATED_TOTAL.inc();
        self.store.create(session.clone()).await?;
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> crate::Result<Session> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| crate::Error::SessionNotFound(session_id.to_string()))
    }

    /// Records the outcome of a tool the dispatcher has already run.
    /// Rejects the call when the tool's prerequisites are unmet; on
    /// success persists the result, advances state, and reports where
    /// the workflow stands.
    pub async fn execute_tool(
        &self,
        session_id: &str,
        tool_name: &str,
        tool_result: JsonValue,
    ) -> crate::Result<WorkflowStatusReport> {
        let mut session = self.get_session(session_id).await?;
        let descriptor = registry::tool(tool_name)
            .ok_or_else(|| crate::Error::UnknownTool(tool_name.to_string()))?;

        let check = validator::can_execute(&session, tool_name)?;
        if !check.valid {
            warn!(
                session_id = %session_id,
                tool = tool_name,
                missing = ?check.missing_dependencies,
                "rejected out-of-order tool execution"
            );
            DEPENDENCY_REJECTIONS_TOTAL.inc();
            return Err(crate::Error::DependencyUnsatisfied {
                tool: tool_name.to_string(),
                missing: check.missing_dependencies,
                recommended_action: check
                    .recommended_action
                    .unwrap_or_else(|| "Run the missing prerequisite first".to_string()),
            });
        }

        let success = transitions::result_success(descriptor, &tool_result);
        session.record_result(tool_name, tool_result, success);
        transitions::advance(&mut session, descriptor, success);
        TOOLS_EXECUTED_TOTAL.inc();
        info!(
            session_id = %session_id,
            tool = tool_name,
            success,
            state = %session.state,
            "recorded tool execution"
        );

        self.store.update(session.clone()).await?;

        Ok(WorkflowStatusReport {
            session_id: session.id.clone(),
            state: session.state,
            completed_tools: session.completed_tools.clone(),
            progress: session.progress(),
            next_actions: advisor::next_actions(&session),
            recommendation: advisor::recommend(&session),
        })
    }

    /// Returns an advisory plan of unattended-runnable tools. Nothing is
    /// executed here; the caller feeds results back via `execute_tool`.
    pub async fn auto_execute_workflow(
        &self,
        session_id: &str,
        steps_to_execute: usize,
    ) -> crate::Result<ExecutionPlan> {
        let session = self.get_session(session_id).await?;
        planner::plan(&session, steps_to_execute)
    }

    pub async fn workflow_summary(&self, session_id: &str) -> crate::Result<WorkflowSummary> {
        let session = self.get_session(session_id).await?;
        Ok(WorkflowSummary {
            progress: session.progress(),
            progress_rendered: progress::render(&session),
            next_actions: advisor::next_actions(&session),
            recommendation: advisor::recommend(&session),
            session,
        })
    }

    /// Sweeps expired sessions; safe to call at any time.
    pub async fn cleanup_expired(&self) -> crate::Result<usize> {
        self.store.cleanup_expired().await
    }
}
