//! # Yardim Core Domain Models
//!
//! Vocabulary shared by the beneficiary approval workflow: stages, actions,
//! roles, the case snapshots handed to analytics, and the audit log entry
//! written after each transition.
//!
//! ## Key Models
//!
//! - **WorkflowStage**: position of a case in the approval lifecycle
//! - **WorkflowAction**: a requested move between stages
//! - **RoleSet**: the capabilities a caller holds
//! - **WorkflowItem**: read-only snapshot of a persisted case
//! - **WorkflowLogEntry**: hash-chained record of an applied transition

pub mod workflow;
pub mod locale;
pub mod audit;

#[cfg(test)]
pub mod property_tests;

pub use workflow::*;
pub use locale::Locale;
pub use audit::*;
