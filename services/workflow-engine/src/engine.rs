//! Workflow Engine
//!
//! Answers what a caller may do from a stage and decides single
//! transitions. Nothing here persists; the caller writes the new stage.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use yardim_models::{
    EntityType, Locale, RoleSet, WorkflowAction, WorkflowLogEntry, WorkflowStage,
};
use yardim_utils::{WorkflowSettings, YardimError};

use crate::messages;
use crate::transitions::{self, TransitionRule};

/// Why a requested transition was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum TransitionError {
    #[error("no {action} transition from {stage}")]
    InvalidTransition {
        stage: WorkflowStage,
        action: WorkflowAction,
    },

    #[error("caller lacks a role allowed to {action}")]
    InsufficientRole { action: WorkflowAction },

    #[error("{action} requires a comment")]
    CommentRequired { action: WorkflowAction },
}

impl TransitionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::InsufficientRole { .. } => "insufficient_role",
            Self::CommentRequired { .. } => "comment_required",
        }
    }

    pub fn message(&self, locale: Locale) -> String {
        messages::transition_error(self, locale)
    }

    pub fn to_error(&self, locale: Locale) -> YardimError {
        match self {
            Self::InsufficientRole { .. } => YardimError::authorization(self.message(locale)),
            Self::InvalidTransition { .. } | Self::CommentRequired { .. } => {
                YardimError::workflow(self.message(locale))
            }
        }
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionCheck {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<TransitionError>,
}

/// Decision returned to the route layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_stage: Option<WorkflowStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TransitionError>,
}

impl TransitionResult {
    pub fn error_message(&self, locale: Locale) -> Option<String> {
        self.error.map(|error| error.message(locale))
    }
}

impl From<Result<AppliedTransition, TransitionError>> for TransitionResult {
    fn from(result: Result<AppliedTransition, TransitionError>) -> Self {
        match result {
            Ok(applied) => Self {
                success: true,
                new_stage: Some(applied.to_stage),
                error: None,
            },
            Err(error) => Self {
                success: false,
                new_stage: None,
                error: Some(error),
            },
        }
    }
}

/// A transition the engine accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedTransition {
    pub from_stage: WorkflowStage,
    pub action: WorkflowAction,
    pub to_stage: WorkflowStage,
    pub comment: Option<String>,
}

impl AppliedTransition {
    /// Audit record for this transition, to be stored next to the case.
    pub fn log_entry(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        performed_by: impl Into<String>,
    ) -> WorkflowLogEntry {
        let entry = WorkflowLogEntry::new(
            entity_type,
            entity_id,
            self.action,
            self.from_stage,
            self.to_stage,
            performed_by,
        );

        match &self.comment {
            Some(comment) => entry.with_comment(comment.clone()),
            None => entry,
        }
    }
}

/// One step of the linear progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    pub stage: WorkflowStage,
    pub order: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepProgress {
    pub stage: WorkflowStage,
    pub order: u8,
    pub status: StepStatus,
}

/// Progress bar state for a case. `branch` is set when the case sits on a
/// stage outside the main sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowProgress {
    pub steps: Vec<StepProgress>,
    pub branch: Option<WorkflowStage>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowEngine {
    settings: WorkflowSettings,
}

impl WorkflowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: WorkflowSettings) -> Self {
        Self { settings }
    }

    pub fn locale(&self) -> Locale {
        self.settings.locale
    }

    /// Actions `roles` may take from `stage`, in table order.
    pub fn available_actions(&self, stage: WorkflowStage, roles: &RoleSet) -> Vec<WorkflowAction> {
        let mut actions = Vec::new();
        for rule in transitions::rules_from(stage).filter(|rule| rule.permits(roles)) {
            if !actions.contains(&rule.action) {
                actions.push(rule.action);
            }
        }
        actions
    }

    pub fn can_perform_action(
        &self,
        stage: WorkflowStage,
        action: WorkflowAction,
        roles: &RoleSet,
    ) -> PermissionCheck {
        match self.authorize(stage, action, roles) {
            Ok(_) => PermissionCheck {
                allowed: true,
                reason: None,
            },
            Err(reason) => PermissionCheck {
                allowed: false,
                reason: Some(reason),
            },
        }
    }

    fn authorize(
        &self,
        stage: WorkflowStage,
        action: WorkflowAction,
        roles: &RoleSet,
    ) -> Result<&'static TransitionRule, TransitionError> {
        let rule = transitions::rule_for(stage, action)
            .ok_or(TransitionError::InvalidTransition { stage, action })?;

        if !rule.permits(roles) {
            return Err(TransitionError::InsufficientRole { action });
        }

        Ok(rule)
    }

    /// Validates a transition and returns the accepted edge.
    pub fn apply(
        &self,
        stage: WorkflowStage,
        action: WorkflowAction,
        roles: &RoleSet,
        comment: Option<&str>,
    ) -> Result<AppliedTransition, TransitionError> {
        let rule = self.authorize(stage, action, roles).map_err(|error| {
            debug!(from = %stage, action = %action, error = %error, "Workflow transition denied");
            error
        })?;

        let comment = comment
            .map(|text| if self.settings.trim_comments { text.trim() } else { text })
            .filter(|text| !text.is_empty());

        if rule.requires_comment && comment.is_none() {
            debug!(from = %stage, action = %action, "Workflow transition missing comment");
            return Err(TransitionError::CommentRequired { action });
        }

        info!(from = %stage, to = %rule.to_stage, action = %action, "Workflow transition");

        Ok(AppliedTransition {
            from_stage: stage,
            action,
            to_stage: rule.to_stage,
            comment: comment.map(str::to_string),
        })
    }

    pub fn perform_transition(
        &self,
        stage: WorkflowStage,
        action: WorkflowAction,
        roles: &RoleSet,
        comment: Option<&str>,
    ) -> TransitionResult {
        self.apply(stage, action, roles, comment).into()
    }

    /// Localized reason text for a refused transition.
    pub fn describe(&self, error: &TransitionError) -> String {
        error.message(self.locale())
    }

    /// The six main-sequence stages in progress-bar order.
    pub fn workflow_steps() -> Vec<WorkflowStep> {
        WorkflowStage::MAIN_SEQUENCE
            .iter()
            .filter_map(|&stage| stage.order().map(|order| WorkflowStep { stage, order }))
            .collect()
    }

    /// True when `candidate` lies strictly before `current` on the main sequence.
    pub fn is_stage_completed(candidate: WorkflowStage, current: WorkflowStage) -> bool {
        match (candidate.order(), current.order()) {
            (Some(candidate), Some(current)) => candidate < current,
            _ => false,
        }
    }

    pub fn is_stage_active(candidate: WorkflowStage, current: WorkflowStage) -> bool {
        candidate == current
    }

    pub fn stage_progress(current: WorkflowStage) -> WorkflowProgress {
        let steps = Self::workflow_steps()
            .into_iter()
            .map(|step| {
                let status = if Self::is_stage_active(step.stage, current) {
                    StepStatus::Active
                } else if Self::is_stage_completed(step.stage, current) {
                    StepStatus::Completed
                } else {
                    StepStatus::Upcoming
                };

                StepProgress {
                    stage: step.stage,
                    order: step.order,
                    status,
                }
            })
            .collect();

        WorkflowProgress {
            steps,
            branch: (!current.is_main_sequence()).then_some(current),
        }
    }
}
