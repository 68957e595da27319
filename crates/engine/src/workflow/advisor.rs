use serde::Serialize;

use crate::registry::{
    self, ASSESS_MODEL_RISK, GET_AIA_PREVIEW, VALIDATE_PROJECT_DESCRIPTION,
};
use crate::store::{AssessmentType, Session, WorkflowState};
use crate::workflow::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

/// A pending sequence step, annotated with whether it could run right now.
#[derive(Debug, Clone, Serialize)]
pub struct NextAction {
    pub tool: String,
    /// 1-based position in the workflow sequence.
    pub step_number: usize,
    pub dependencies_met: bool,
    pub auto_executable: bool,
}

/// The single next best action, chosen by a fixed priority ladder.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    pub priority: Priority,
    pub reason: String,
}

/// Up to three not-yet-run sequence tools, in template order.
pub fn next_actions(session: &Session) -> Vec<NextAction> {
    session
        .workflow_sequence
        .iter()
        .enumerate()
        .filter(|(_, tool)| !session.has_completed(tool))
        .take(3)
        .map(|(idx, tool)| {
            let dependencies_met = validator::can_execute(session, tool)
                .map(|c| c.valid)
                .unwrap_or(false);
            let auto_executable = registry::tool(tool)
                .map(|d| !d.requires_manual_input)
                .unwrap_or(false);
            NextAction {
                tool: tool.clone(),
                step_number: idx + 1,
                dependencies_met,
                auto_executable: dependencies_met && auto_executable,
            }
        })
        .collect()
}

pub fn recommend(session: &Session) -> Recommendation {
    if session.state == WorkflowState::Failed {
        return Recommendation {
            action: "Revise the project description and re-run validation".to_string(),
            tool: Some(VALIDATE_PROJECT_DESCRIPTION.to_string()),
            priority: Priority::Critical,
            reason: "The project description failed validation; nothing downstream can run until it passes".to_string(),
        };
    }

    if !session.has_completed(VALIDATE_PROJECT_DESCRIPTION) {
        return Recommendation {
            action: format!("Run {}", VALIDATE_PROJECT_DESCRIPTION),
            tool: Some(VALIDATE_PROJECT_DESCRIPTION.to_string()),
            priority: Priority::High,
            reason: "Every workflow starts by validating the project description".to_string(),
        };
    }

    if session.assessment_type == AssessmentType::AiaPreview
        && !session.has_completed(GET_AIA_PREVIEW)
    {
        return Recommendation {
            action: format!("Run {}", GET_AIA_PREVIEW),
            tool: Some(GET_AIA_PREVIEW.to_string()),
            priority: Priority::High,
            reason: "A preview assessment should produce its preview early".to_string(),
        };
    }

    if session.assessment_type == AssessmentType::OsfiE23
        && !session.has_completed(ASSESS_MODEL_RISK)
    {
        return Recommendation {
            action: format!("Run {}", ASSESS_MODEL_RISK),
            tool: Some(ASSESS_MODEL_RISK.to_string()),
            priority: Priority::High,
            reason: "E-23 workflows hinge on the model risk assessment".to_string(),
        };
    }

    match session.pending_tools().first() {
        Some(next) => Recommendation {
            action: format!("Continue with {}", next),
            tool: Some(next.to_string()),
            priority: Priority::Medium,
            reason: "Next step in the workflow sequence".to_string(),
        },
        None => Recommendation {
            action: "Workflow complete; retrieve the summary or export results".to_string(),
            tool: None,
            priority: Priority::Medium,
            reason: "Every step in the sequence has executed".to_string(),
        },
    }
}
