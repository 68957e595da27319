use std::sync::Arc;

use serde_json::json;

use regflow_engine::{
    registry::{
        ASSESS_MODEL_RISK, EVALUATE_LIFECYCLE_COMPLIANCE, VALIDATE_PROJECT_DESCRIPTION,
    },
    store::{AssessmentType, MemoryStore, SessionStore, WorkflowState},
    workflow::WorkflowEngine,
    Error,
};

fn engine() -> WorkflowEngine {
    engine_with_timeout(chrono::Duration::hours(2))
}

fn engine_with_timeout(timeout: chrono::Duration) -> WorkflowEngine {
    let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new(timeout));
    WorkflowEngine::new(store)
}

fn valid_result() -> serde_json::Value {
    json!({"validation": {"is_valid": true, "word_count": 120}})
}

fn invalid_result() -> serde_json::Value {
    json!({"validation": {"is_valid": false, "issues": ["description too short"]}})
}

#[tokio::test]
async fn test_explicit_assessment_type_overrides_classifier() {
    let engine = engine();
    let session = engine
        .create_session(
            "Benefits Triage".to_string(),
            "Automated triage of federal benefit applications".to_string(),
            Some(AssessmentType::OsfiE23),
        )
        .await
        .unwrap();
    assert_eq!(session.assessment_type, AssessmentType::OsfiE23);
    assert_eq!(session.workflow_sequence.len(), 6);
}

#[tokio::test]
async fn test_classifier_fallback_when_type_omitted() {
    let engine = engine();
    let session = engine
        .create_session(
            "Credit Model".to_string(),
            "Credit scoring model for mortgage lending at a retail bank".to_string(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(session.assessment_type, AssessmentType::OsfiE23);
}

#[tokio::test]
async fn test_fresh_osfi_auto_plan_stops_at_manual_step() {
    let engine = engine();
    let session = engine
        .create_session("M".to_string(), "d".to_string(), Some(AssessmentType::OsfiE23))
        .await
        .unwrap();

    let plan = engine.auto_execute_workflow(&session.id, 5).await.unwrap();
    let tools: Vec<&str> = plan.execution_plan.iter().map(|e| e.tool.as_str()).collect();
    assert_eq!(
        tools,
        vec![
            VALIDATE_PROJECT_DESCRIPTION,
            ASSESS_MODEL_RISK,
            EVALUATE_LIFECYCLE_COMPLIANCE,
        ]
    );
    assert!(plan.manual_intervention_required);
}

#[tokio::test]
async fn test_failed_validation_blocks_assessment_until_rerun() {
    let engine = engine();
    let session = engine
        .create_session("M".to_string(), "d".to_string(), Some(AssessmentType::OsfiE23))
        .await
        .unwrap();

    let report = engine
        .execute_tool(&session.id, VALIDATE_PROJECT_DESCRIPTION, invalid_result())
        .await
        .unwrap();
    assert_eq!(report.state, WorkflowState::Failed);

    let snapshot = engine.get_session(&session.id).await.unwrap();
    assert!(!snapshot.validation_passed);

    // Validation ran but failed, so it does not satisfy the dependency.
    let err = engine
        .execute_tool(&session.id, ASSESS_MODEL_RISK, json!({"risk_rating": "low"}))
        .await
        .unwrap_err();
    match err {
        Error::DependencyUnsatisfied { missing, .. } => {
            assert_eq!(missing, vec![VALIDATE_PROJECT_DESCRIPTION.to_string()]);
        }
        other => panic!("expected DependencyUnsatisfied, got {:?}", other),
    }

    // Auto-execution is also off the table while failed.
    assert!(matches!(
        engine.auto_execute_workflow(&session.id, 3).await,
        Err(Error::AutoExecutionUnavailable(_))
    ));

    // A passing re-run clears the failure and unblocks downstream tools.
    let report = engine
        .execute_tool(&session.id, VALIDATE_PROJECT_DESCRIPTION, valid_result())
        .await
        .unwrap();
    assert_eq!(report.state, WorkflowState::Validating);

    let report = engine
        .execute_tool(&session.id, ASSESS_MODEL_RISK, json!({"risk_rating": "low"}))
        .await
        .unwrap();
    assert_eq!(report.state, WorkflowState::Assessing);
}

#[tokio::test]
async fn test_idempotent_reexecution_overwrites_result_once() {
    let engine = engine();
    let session = engine
        .create_session("M".to_string(), "d".to_string(), Some(AssessmentType::AiaFull))
        .await
        .unwrap();

    engine
        .execute_tool(&session.id, VALIDATE_PROJECT_DESCRIPTION, invalid_result())
        .await
        .unwrap();
    engine
        .execute_tool(&session.id, VALIDATE_PROJECT_DESCRIPTION, valid_result())
        .await
        .unwrap();

    let snapshot = engine.get_session(&session.id).await.unwrap();
    assert_eq!(
        snapshot
            .completed_tools
            .iter()
            .filter(|t| *t == VALIDATE_PROJECT_DESCRIPTION)
            .count(),
        1
    );
    let stored = &snapshot.tool_results[VALIDATE_PROJECT_DESCRIPTION];
    assert!(stored.success);
    assert_eq!(stored.result["validation"]["is_valid"], json!(true));
}

#[tokio::test]
async fn test_expired_session_is_not_found() {
    let engine = engine_with_timeout(chrono::Duration::milliseconds(50));
    let session = engine
        .create_session("M".to_string(), "d".to_string(), Some(AssessmentType::AiaFull))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(120)).await;

    assert!(matches!(
        engine.get_session(&session.id).await,
        Err(Error::SessionNotFound(_))
    ));
    assert!(matches!(
        engine
            .execute_tool(&session.id, VALIDATE_PROJECT_DESCRIPTION, valid_result())
            .await,
        Err(Error::SessionNotFound(_))
    ));
}

#[tokio::test]
async fn test_progress_uses_each_sessions_own_sequence_length() {
    let engine = engine();
    let osfi = engine
        .create_session("A".to_string(), "d".to_string(), Some(AssessmentType::OsfiE23))
        .await
        .unwrap();
    let aia = engine
        .create_session("B".to_string(), "d".to_string(), Some(AssessmentType::AiaFull))
        .await
        .unwrap();

    engine
        .execute_tool(&osfi.id, VALIDATE_PROJECT_DESCRIPTION, valid_result())
        .await
        .unwrap();
    engine
        .execute_tool(&aia.id, VALIDATE_PROJECT_DESCRIPTION, valid_result())
        .await
        .unwrap();

    let osfi_summary = engine.workflow_summary(&osfi.id).await.unwrap();
    let aia_summary = engine.workflow_summary(&aia.id).await.unwrap();
    assert!((osfi_summary.progress - 1.0 / 6.0).abs() < 1e-9);
    assert!((aia_summary.progress - 1.0 / 5.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_session_yields_not_found_not_partial_plan() {
    let engine = engine();
    assert!(matches!(
        engine.auto_execute_workflow("no-such-session", 3).await,
        Err(Error::SessionNotFound(_))
    ));
}
