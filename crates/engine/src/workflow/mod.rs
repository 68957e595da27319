pub mod advisor;
pub mod engine;
pub mod planner;
pub mod progress;
pub mod transitions;
pub mod validator;

pub use advisor::{NextAction, Priority, Recommendation};
pub use engine::{WorkflowEngine, WorkflowStatusReport, WorkflowSummary};
pub use planner::{ExecutionPlan, PlanEntry};
pub use validator::ExecutionCheck;
