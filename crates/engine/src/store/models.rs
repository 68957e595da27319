use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Which regulatory workflow template a session runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    AiaFull,
    AiaPreview,
    OsfiE23,
    Combined,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::AiaFull => "aia_full",
            AssessmentType::AiaPreview => "aia_preview",
            AssessmentType::OsfiE23 => "osfi_e23",
            AssessmentType::Combined => "combined",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "aia_full" => Some(AssessmentType::AiaFull),
            "aia_preview" => Some(AssessmentType::AiaPreview),
            "osfi_e23" => Some(AssessmentType::OsfiE23),
            "combined" => Some(AssessmentType::Combined),
            _ => None,
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse position of a session in its workflow. Advisory only; the
/// dependency validator, not this state, decides what may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Created,
    Validating,
    Analyzing,
    Assessing,
    Reporting,
    Completed,
    Failed,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowState::Created => "created",
            WorkflowState::Validating => "validating",
            WorkflowState::Analyzing => "analyzing",
            WorkflowState::Assessing => "assessing",
            WorkflowState::Reporting => "reporting",
            WorkflowState::Completed => "completed",
            WorkflowState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Stored outcome of one tool invocation. Re-running a tool overwrites
/// its entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolExecution {
    pub result: JsonValue,
    pub executed_at: DateTime<Utc>,
    pub success: bool,
}

/// One in-progress assessment conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub project_name: String,
    pub project_description: String,
    pub assessment_type: AssessmentType,
    /// Ordered tool names snapshotted from the template registry at
    /// creation; never mutated afterwards.
    pub workflow_sequence: Vec<String>,
    pub state: WorkflowState,
    /// Tool names that have executed, insertion order preserved. A name
    /// appears at most once even across re-runs.
    pub completed_tools: Vec<String>,
    pub tool_results: HashMap<String, ToolExecution>,
    /// Cursor into `workflow_sequence`, pointing at the next step.
    pub current_step_index: usize,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub validation_passed: bool,
}

impl Session {
    pub fn new(
        project_name: String,
        project_description: String,
        assessment_type: AssessmentType,
        workflow_sequence: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            project_name,
            project_description,
            assessment_type,
            workflow_sequence,
            state: WorkflowState::Created,
            completed_tools: Vec::new(),
            tool_results: HashMap::new(),
            current_step_index: 0,
            created_at: now,
            last_accessed_at: now,
            validation_passed: false,
        }
    }

    /// Whether the tool has executed at all, successfully or not.
    pub fn has_completed(&self, tool: &str) -> bool {
        self.completed_tools.iter().any(|t| t == tool)
    }

    /// Whether the tool has executed and its stored result reported
    /// success. Dependency checks use this, so a validation run that
    /// failed does not unblock downstream tools.
    pub fn tool_succeeded(&self, tool: &str) -> bool {
        self.tool_results.get(tool).map(|r| r.success).unwrap_or(false)
    }

    pub fn record_result(&mut self, tool: &str, result: JsonValue, success: bool) {
        if !self.has_completed(tool) {
            self.completed_tools.push(tool.to_string());
        }
        self.tool_results.insert(
            tool.to_string(),
            ToolExecution {
                result,
                executed_at: Utc::now(),
                success,
            },
        );
    }

    /// Fraction of this session's own sequence that has executed.
    pub fn progress(&self) -> f64 {
        if self.workflow_sequence.is_empty() {
            return 0.0;
        }
        let done = self
            .workflow_sequence
            .iter()
            .filter(|t| self.has_completed(t))
            .count();
        done as f64 / self.workflow_sequence.len() as f64
    }

    /// Sequence tools not yet executed, in template order.
    pub fn pending_tools(&self) -> Vec<&str> {
        self.workflow_sequence
            .iter()
            .filter(|t| !self.has_completed(t))
            .map(|t| t.as_str())
            .collect()
    }

    pub fn touch(&mut self) {
        self.last_accessed_at = Utc::now();
    }
}
