use std::collections::HashSet;

use serde::Serialize;

use crate::registry::{self, PrerequisiteMode};
use crate::store::{Session, WorkflowState};

/// One step the caller may run without human input.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub tool: String,
    /// 1-based position in the workflow sequence.
    pub step_number: usize,
    /// Named input fields the caller must supply when invoking the tool.
    pub required_inputs: Vec<String>,
}

/// Advisory plan of tools that can run unattended. The planner never
/// executes anything; the caller runs each entry and reports results
/// back through `execute_tool`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    pub execution_plan: Vec<PlanEntry>,
    pub auto_executable_steps: usize,
    pub manual_intervention_required: bool,
    /// The tool that stopped the walk because it needs human input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_manual_tool: Option<String>,
}

/// Walks the sequence from the current cursor, up to `step_budget`
/// entries. Refuses outright when the very next step already needs
/// manual input. Otherwise the walk stops at the first such tool, and
/// at the first tool whose prerequisites would still be unmet even after
/// every earlier plan entry had run (dependencies are evaluated against
/// the session's completed tools plus the plan's own earlier steps).
pub fn plan(session: &Session, step_budget: usize) -> crate::Result<ExecutionPlan> {
    match session.state {
        WorkflowState::Failed => {
            return Err(crate::Error::AutoExecutionUnavailable(
                "session is in a failed state; re-run validation first".to_string(),
            ))
        }
        WorkflowState::Completed => {
            return Err(crate::Error::AutoExecutionUnavailable(
                "workflow already completed".to_string(),
            ))
        }
        _ => {}
    }

    let mut entries = Vec::new();
    let mut manual_intervention_required = false;
    let mut next_manual_tool = None;

    // Tools assumed complete once the plan up to this point has run.
    let mut assumed: HashSet<&str> = session
        .completed_tools
        .iter()
        .filter(|t| session.tool_succeeded(t))
        .map(|t| t.as_str())
        .collect();

    for (idx, tool_name) in session
        .workflow_sequence
        .iter()
        .enumerate()
        .skip(session.current_step_index)
    {
        if entries.len() >= step_budget {
            break;
        }
        let descriptor = registry::tool(tool_name)
            .ok_or_else(|| crate::Error::UnknownTool(tool_name.clone()))?;

        if descriptor.requires_manual_input {
            // A manual tool with nothing plannable before it means there is
            // no unattended work at all; that is an error, not an empty plan.
            if entries.is_empty() {
                return Err(crate::Error::AutoExecutionUnavailable(format!(
                    "next step {} requires manual input",
                    tool_name
                )));
            }
            manual_intervention_required = true;
            next_manual_tool = Some(tool_name.clone());
            break;
        }

        let feasible = match descriptor.prerequisite_mode {
            PrerequisiteMode::Any => {
                descriptor.prerequisites.is_empty()
                    || descriptor.prerequisites.iter().any(|d| assumed.contains(d))
            }
            PrerequisiteMode::All => {
                descriptor.prerequisites.iter().all(|d| assumed.contains(d))
            }
        };
        if !feasible {
            break;
        }

        assumed.insert(descriptor.name);
        entries.push(PlanEntry {
            tool: tool_name.clone(),
            step_number: idx + 1,
            required_inputs: descriptor.inputs.iter().map(|i| i.to_string()).collect(),
        });
    }

    let auto_executable_steps = entries.len();
    Ok(ExecutionPlan {
        execution_plan: entries,
        auto_executable_steps,
        manual_intervention_required,
        next_manual_tool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::*;
    use crate::store::AssessmentType;
    use serde_json::json;

    fn session(at: AssessmentType) -> Session {
        Session::new(
            "Pilot".to_string(),
            "desc".to_string(),
            at,
            registry::sequence_for(at),
        )
    }

    #[test]
    fn test_fresh_osfi_session_plans_up_to_manual_step() {
        let s = session(AssessmentType::OsfiE23);
        let plan = plan(&s, 5).unwrap();

        // validate, assess_model_risk, evaluate_lifecycle_compliance run
        // unattended (later deps satisfied by earlier plan entries); the
        // governance step needs human input and stops the walk.
        let tools: Vec<&str> = plan.execution_plan.iter().map(|e| e.tool.as_str()).collect();
        assert_eq!(
            tools,
            vec![
                VALIDATE_PROJECT_DESCRIPTION,
                ASSESS_MODEL_RISK,
                EVALUATE_LIFECYCLE_COMPLIANCE,
            ]
        );
        assert_eq!(plan.auto_executable_steps, 3);
        assert!(plan.manual_intervention_required);
        assert_eq!(
            plan.next_manual_tool.as_deref(),
            Some(DESIGN_GOVERNANCE_FRAMEWORK)
        );
    }

    #[test]
    fn test_budget_bounds_plan_length() {
        let s = session(AssessmentType::OsfiE23);
        let plan = plan(&s, 2).unwrap();
        assert_eq!(plan.execution_plan.len(), 2);
        // The budget, not a manual tool, stopped the walk.
        assert!(!plan.manual_intervention_required);
    }

    #[test]
    fn test_zero_budget_yields_empty_plan() {
        let s = session(AssessmentType::OsfiE23);
        let plan = plan(&s, 0).unwrap();
        assert!(plan.execution_plan.is_empty());
        assert!(!plan.manual_intervention_required);
    }

    #[test]
    fn test_manual_step_stops_walk_immediately() {
        let s = session(AssessmentType::AiaFull);
        let plan = plan(&s, 5).unwrap();
        // validate, analyze; calculate_aia_score needs question responses.
        assert_eq!(plan.execution_plan.len(), 2);
        assert!(plan.manual_intervention_required);
        assert_eq!(plan.next_manual_tool.as_deref(), Some(CALCULATE_AIA_SCORE));
        // Nothing after the manual tool is included either.
        assert!(plan
            .execution_plan
            .iter()
            .all(|e| e.tool != GENERATE_AIA_REPORT));
    }

    #[test]
    fn test_plan_entries_carry_step_numbers_and_inputs() {
        let s = session(AssessmentType::AiaPreview);
        let plan = plan(&s, 10).unwrap();
        assert_eq!(plan.execution_plan[0].step_number, 1);
        assert_eq!(
            plan.execution_plan[0].required_inputs,
            vec!["project_description".to_string()]
        );
    }

    #[test]
    fn test_manual_next_step_refuses_auto_execution() {
        let mut s = session(AssessmentType::AiaFull);
        s.record_result(
            VALIDATE_PROJECT_DESCRIPTION,
            json!({"validation": {"is_valid": true}}),
            true,
        );
        s.record_result(ANALYZE_PROJECT_DESCRIPTION, json!({"answers": {}}), true);
        s.state = WorkflowState::Analyzing;
        s.current_step_index = 2;

        // The very next step is calculate_aia_score, which needs human
        // input: there is nothing to plan, so this is an error rather
        // than a successful zero-step plan.
        match plan(&s, 3) {
            Err(crate::Error::AutoExecutionUnavailable(reason)) => {
                assert!(reason.contains(CALCULATE_AIA_SCORE));
            }
            other => panic!("expected AutoExecutionUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_session_refuses_auto_execution() {
        let mut s = session(AssessmentType::OsfiE23);
        s.state = WorkflowState::Failed;
        assert!(matches!(
            plan(&s, 3),
            Err(crate::Error::AutoExecutionUnavailable(_))
        ));
    }

    #[test]
    fn test_completed_session_refuses_auto_execution() {
        let mut s = session(AssessmentType::OsfiE23);
        s.state = WorkflowState::Completed;
        assert!(matches!(
            plan(&s, 3),
            Err(crate::Error::AutoExecutionUnavailable(_))
        ));
    }

    #[test]
    fn test_walk_resumes_from_cursor() {
        let mut s = session(AssessmentType::OsfiE23);
        s.record_result(
            VALIDATE_PROJECT_DESCRIPTION,
            json!({"validation": {"is_valid": true}}),
            true,
        );
        s.state = WorkflowState::Validating;
        s.current_step_index = 1;

        let plan = plan(&s, 5).unwrap();
        assert_eq!(plan.execution_plan[0].tool, ASSESS_MODEL_RISK);
        assert_eq!(plan.execution_plan[0].step_number, 2);
    }
}
