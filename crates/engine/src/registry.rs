//! Static workflow template registry: the tool universe, per-tool
//! prerequisite declarations, and the ordered template for each
//! assessment type. Read-only data; sessions snapshot their sequence at
//! creation and keep it even if this table changes in a later build.

use serde::{Deserialize, Serialize};

use crate::store::AssessmentType;

pub const VALIDATE_PROJECT_DESCRIPTION: &str = "validate_project_description";
pub const ANALYZE_PROJECT_DESCRIPTION: &str = "analyze_project_description";
pub const GET_AIA_PREVIEW: &str = "get_aia_preview";
pub const CALCULATE_AIA_SCORE: &str = "calculate_aia_score";
pub const ASSESS_MODEL_RISK: &str = "assess_model_risk";
pub const EVALUATE_LIFECYCLE_COMPLIANCE: &str = "evaluate_lifecycle_compliance";
pub const DESIGN_GOVERNANCE_FRAMEWORK: &str = "design_governance_framework";
pub const GENERATE_AIA_REPORT: &str = "generate_aia_report";
pub const GENERATE_COMPLIANCE_REPORT: &str = "generate_compliance_report";
pub const EXPORT_ASSESSMENT_DOCX: &str = "export_assessment_docx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Validation,
    Analysis,
    Assessment,
    Export,
}

/// How a tool's prerequisite list is evaluated. Export tools accept any
/// one of several upstream results; everything else needs all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisiteMode {
    All,
    Any,
}

#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub category: ToolCategory,
    /// True when the tool needs human-supplied data and therefore stops
    /// auto-execution.
    pub requires_manual_input: bool,
    /// Named input fields the caller must supply when invoking the tool.
    pub inputs: &'static [&'static str],
    pub prerequisites: &'static [&'static str],
    pub prerequisite_mode: PrerequisiteMode,
}

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: VALIDATE_PROJECT_DESCRIPTION,
        category: ToolCategory::Validation,
        requires_manual_input: false,
        inputs: &["project_description"],
        prerequisites: &[],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: ANALYZE_PROJECT_DESCRIPTION,
        category: ToolCategory::Analysis,
        requires_manual_input: false,
        inputs: &["project_description"],
        prerequisites: &[VALIDATE_PROJECT_DESCRIPTION],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: GET_AIA_PREVIEW,
        category: ToolCategory::Analysis,
        requires_manual_input: false,
        inputs: &["session_id"],
        prerequisites: &[VALIDATE_PROJECT_DESCRIPTION],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: CALCULATE_AIA_SCORE,
        category: ToolCategory::Assessment,
        requires_manual_input: true,
        inputs: &["question_responses"],
        prerequisites: &[VALIDATE_PROJECT_DESCRIPTION, ANALYZE_PROJECT_DESCRIPTION],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: ASSESS_MODEL_RISK,
        category: ToolCategory::Assessment,
        requires_manual_input: false,
        inputs: &["project_description"],
        prerequisites: &[VALIDATE_PROJECT_DESCRIPTION],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: EVALUATE_LIFECYCLE_COMPLIANCE,
        category: ToolCategory::Assessment,
        requires_manual_input: false,
        inputs: &["session_id"],
        prerequisites: &[ASSESS_MODEL_RISK],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: DESIGN_GOVERNANCE_FRAMEWORK,
        category: ToolCategory::Assessment,
        requires_manual_input: true,
        inputs: &["governance_inputs"],
        prerequisites: &[ASSESS_MODEL_RISK],
        prerequisite_mode: PrerequisiteMode::All,
    },
    ToolDescriptor {
        name: GENERATE_AIA_REPORT,
        category: ToolCategory::Export,
        requires_manual_input: false,
        inputs: &["session_id"],
        prerequisites: &[CALCULATE_AIA_SCORE, GET_AIA_PREVIEW],
        prerequisite_mode: PrerequisiteMode::Any,
    },
    ToolDescriptor {
        name: GENERATE_COMPLIANCE_REPORT,
        category: ToolCategory::Export,
        requires_manual_input: false,
        inputs: &["session_id"],
        prerequisites: &[ASSESS_MODEL_RISK, CALCULATE_AIA_SCORE],
        prerequisite_mode: PrerequisiteMode::Any,
    },
    ToolDescriptor {
        name: EXPORT_ASSESSMENT_DOCX,
        category: ToolCategory::Export,
        requires_manual_input: false,
        inputs: &["session_id"],
        prerequisites: &[GENERATE_AIA_REPORT, GENERATE_COMPLIANCE_REPORT],
        prerequisite_mode: PrerequisiteMode::Any,
    },
];

pub fn tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.name == name)
}

/// Ordered tool list for an assessment type. Sessions copy this once at
/// creation.
pub fn template(assessment_type: AssessmentType) -> &'static [&'static str] {
    match assessment_type {
        AssessmentType::AiaFull => &[
            VALIDATE_PROJECT_DESCRIPTION,
            ANALYZE_PROJECT_DESCRIPTION,
            CALCULATE_AIA_SCORE,
            GENERATE_AIA_REPORT,
            EXPORT_ASSESSMENT_DOCX,
        ],
        AssessmentType::AiaPreview => &[
            VALIDATE_PROJECT_DESCRIPTION,
            ANALYZE_PROJECT_DESCRIPTION,
            GET_AIA_PREVIEW,
            GENERATE_AIA_REPORT,
        ],
        AssessmentType::OsfiE23 => &[
            VALIDATE_PROJECT_DESCRIPTION,
            ASSESS_MODEL_RISK,
            EVALUATE_LIFECYCLE_COMPLIANCE,
            DESIGN_GOVERNANCE_FRAMEWORK,
            GENERATE_COMPLIANCE_REPORT,
            EXPORT_ASSESSMENT_DOCX,
        ],
        AssessmentType::Combined => &[
            VALIDATE_PROJECT_DESCRIPTION,
            ANALYZE_PROJECT_DESCRIPTION,
            CALCULATE_AIA_SCORE,
            ASSESS_MODEL_RISK,
            GENERATE_COMPLIANCE_REPORT,
            EXPORT_ASSESSMENT_DOCX,
        ],
    }
}

pub fn sequence_for(assessment_type: AssessmentType) -> Vec<String> {
    template(assessment_type)
        .iter()
        .map(|t| t.to_string())
        .collect()
}
