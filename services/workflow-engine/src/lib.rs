//! # Yardim Beneficiary Workflow Engine
//!
//! Decision logic for moving aid applications through their approval
//! lifecycle, plus the aggregates dashboards and reviewer queues are built
//! from.
//!
//! - **transitions**: the static rule table
//! - **engine**: role-gated permission checks and single transitions
//! - **analytics**: statistics, efficiency and attention triage
//! - **messages**: localized labels and reason texts
//!
//! Every function is pure. Callers load the current stage and roles, ask the
//! engine, then persist the returned stage and audit entry themselves.

pub mod transitions;
pub mod engine;
pub mod analytics;
pub mod messages;

pub use transitions::{rule_for, rules_from, transitions, TransitionRule};
pub use engine::{
    AppliedTransition, PermissionCheck, StepProgress, StepStatus, TransitionError,
    TransitionResult, WorkflowEngine, WorkflowProgress, WorkflowStep,
};
pub use analytics::{
    calculate_workflow_efficiency, calculate_workflow_statistics, count_by_stage,
    items_requiring_attention, items_requiring_attention_at, AttentionItem, AttentionPriority,
    AttentionReason, WorkflowEfficiency, WorkflowStatistics,
};
pub use messages::{action_label, stage_description, stage_label};
