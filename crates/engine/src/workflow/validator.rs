use serde::Serialize;

use crate::registry::{self, PrerequisiteMode};
use crate::store::Session;

/// Outcome of a dependency check. On failure, names every missing
/// prerequisite and the one to run first.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
}

impl ExecutionCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            missing_dependencies: Vec::new(),
            recommended_action: None,
        }
    }
}

/// A prerequisite counts as satisfied only when the tool has run and its
/// stored result reported success. Running is not enough: a validation
/// pass that came back `is_valid = false` must keep downstream tools
/// blocked.
fn satisfied(session: &Session, dep: &str) -> bool {
    session.tool_succeeded(dep)
}

/// Decides whether `tool_name` may run against the session right now.
/// Position in the workflow sequence is irrelevant; only the set of
/// successfully executed tools matters.
pub fn can_execute(session: &Session, tool_name: &str) -> crate::Result<ExecutionCheck> {
    let descriptor =
        registry::tool(tool_name).ok_or_else(|| crate::Error::UnknownTool(tool_name.to_string()))?;

    if descriptor.prerequisites.is_empty() {
        return Ok(ExecutionCheck::ok());
    }

    match descriptor.prerequisite_mode {
        // Export tools: any one of the listed upstream results unblocks.
        PrerequisiteMode::Any => {
            if descriptor.prerequisites.iter().any(|d| satisfied(session, d)) {
                Ok(ExecutionCheck::ok())
            } else {
                let alternatives = descriptor.prerequisites.join(" or ");
                Ok(ExecutionCheck {
                    valid: false,
                    reason: Some(format!(
                        "{} requires at least one of: {}",
                        tool_name, alternatives
                    )),
                    missing_dependencies: descriptor
                        .prerequisites
                        .iter()
                        .map(|d| d.to_string())
                        .collect(),
                    recommended_action: Some(format!("Run {} first", descriptor.prerequisites[0])),
                })
            }
        }
        PrerequisiteMode::All => {
            let missing: Vec<String> = descriptor
                .prerequisites
                .iter()
                .filter(|d| !satisfied(session, d))
                .map(|d| d.to_string())
                .collect();
            if missing.is_empty() {
                Ok(ExecutionCheck::ok())
            } else {
                let recommended = missing[0].clone();
                Ok(ExecutionCheck {
                    valid: false,
                    reason: Some(format!(
                        "{} requires {} to have run successfully",
                        tool_name,
                        missing.join(", ")
                    )),
                    missing_dependencies: missing,
                    recommended_action: Some(format!("Run {} first", recommended)),
                })
            }
        }
    }
}
