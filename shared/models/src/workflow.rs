use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a wire value does not name a known stage, action, role or locale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Position of a beneficiary case in the approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Application is still being filled in
    Draft,
    /// Waiting for a reviewer to pick it up
    Submitted,
    UnderReview,
    /// Reviewer asked the applicant for more documents
    NeedsInfo,
    Approved,
    Rejected,
    /// Aid is being handed out
    #[serde(rename = "in_distribution", alias = "distribution")]
    Distribution,
    Completed,
    Cancelled,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 9] = [
        WorkflowStage::Draft,
        WorkflowStage::Submitted,
        WorkflowStage::UnderReview,
        WorkflowStage::NeedsInfo,
        WorkflowStage::Approved,
        WorkflowStage::Rejected,
        WorkflowStage::Distribution,
        WorkflowStage::Completed,
        WorkflowStage::Cancelled,
    ];

    /// The linear happy path shown on the progress bar.
    pub const MAIN_SEQUENCE: [WorkflowStage; 6] = [
        WorkflowStage::Draft,
        WorkflowStage::Submitted,
        WorkflowStage::UnderReview,
        WorkflowStage::Approved,
        WorkflowStage::Distribution,
        WorkflowStage::Completed,
    ];

    /// 1-based position on the main sequence, `None` for branch stages.
    pub fn order(&self) -> Option<u8> {
        match self {
            Self::Draft => Some(1),
            Self::Submitted => Some(2),
            Self::UnderReview => Some(3),
            Self::Approved => Some(4),
            Self::Distribution => Some(5),
            Self::Completed => Some(6),
            Self::NeedsInfo | Self::Rejected | Self::Cancelled => None,
        }
    }

    pub fn is_main_sequence(&self) -> bool {
        self.order().is_some()
    }

    /// Completed, rejected and cancelled cases are closed. Rejected cases can
    /// still be reopened by an administrator.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Cancelled)
    }

    /// Stages where the case sits in a reviewer's queue.
    pub fn awaits_review(&self) -> bool {
        matches!(self, Self::Submitted | Self::UnderReview)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::UnderReview => "under_review",
            Self::NeedsInfo => "needs_info",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Distribution => "in_distribution",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "under_review" => Ok(Self::UnderReview),
            "needs_info" => Ok(Self::NeedsInfo),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "in_distribution" | "distribution" => Ok(Self::Distribution),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseError::new("workflow stage", s)),
        }
    }
}

/// A caller-requested move of a case from one stage to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    Submit,
    StartReview,
    RequestInfo,
    ProvideInfo,
    Approve,
    Reject,
    Reopen,
    StartDistribution,
    Complete,
    Cancel,
}

impl WorkflowAction {
    pub const ALL: [WorkflowAction; 10] = [
        WorkflowAction::Submit,
        WorkflowAction::StartReview,
        WorkflowAction::RequestInfo,
        WorkflowAction::ProvideInfo,
        WorkflowAction::Approve,
        WorkflowAction::Reject,
        WorkflowAction::Reopen,
        WorkflowAction::StartDistribution,
        WorkflowAction::Complete,
        WorkflowAction::Cancel,
    ];

    /// Actions the UI must confirm before sending.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Reject | Self::Cancel)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::StartReview => "start_review",
            Self::RequestInfo => "request_info",
            Self::ProvideInfo => "provide_info",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Reopen => "reopen",
            Self::StartDistribution => "start_distribution",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "submit" => Ok(Self::Submit),
            "start_review" => Ok(Self::StartReview),
            "request_info" => Ok(Self::RequestInfo),
            "provide_info" => Ok(Self::ProvideInfo),
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "reopen" => Ok(Self::Reopen),
            "start_distribution" => Ok(Self::StartDistribution),
            "complete" => Ok(Self::Complete),
            "cancel" => Ok(Self::Cancel),
            _ => Err(ParseError::new("workflow action", s)),
        }
    }
}

/// Capability granted to a caller by the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Approver,
    Reviewer,
    User,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Approver => "approver",
            Self::Reviewer => "reviewer",
            Self::User => "user",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "approver" => Ok(Self::Approver),
            "reviewer" => Ok(Self::Reviewer),
            "user" => Ok(Self::User),
            "viewer" => Ok(Self::Viewer),
            _ => Err(ParseError::new("role", s)),
        }
    }
}

/// The set of roles a caller holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from role names coming from the session layer. Names
    /// that do not map to a known role grant nothing and are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| name.as_ref().parse::<Role>().ok())
            .collect()
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.contains(Role::Admin)
    }

    pub fn intersects(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.0.contains(role))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

/// Snapshot of a persisted case, as read by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowItem {
    pub workflow_stage: WorkflowStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl WorkflowItem {
    pub fn new(workflow_stage: WorkflowStage) -> Self {
        Self {
            workflow_stage,
            created_at: None,
            completed_at: None,
            due_date: None,
            assigned_to: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_assignee(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.map_or(false, |due| due < now)
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(user_id)
    }
}

impl Default for WorkflowItem {
    fn default() -> Self {
        Self::new(WorkflowStage::Draft)
    }
}
