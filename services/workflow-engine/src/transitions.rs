//! Transition Table
//!
//! Static rules mapping a stage and an action to the next stage, the roles
//! allowed to take it and whether a comment is mandatory.

use serde::Serialize;
use yardim_models::{Role, RoleSet, WorkflowAction, WorkflowStage};

/// One edge of the approval state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    pub from_stage: WorkflowStage,
    pub action: WorkflowAction,
    pub to_stage: WorkflowStage,
    pub allowed_roles: &'static [Role],
    pub requires_comment: bool,
}

impl TransitionRule {
    const fn new(
        from_stage: WorkflowStage,
        action: WorkflowAction,
        to_stage: WorkflowStage,
        allowed_roles: &'static [Role],
    ) -> Self {
        Self {
            from_stage,
            action,
            to_stage,
            allowed_roles,
            requires_comment: false,
        }
    }

    const fn with_comment(mut self) -> Self {
        self.requires_comment = true;
        self
    }

    /// Admin may take any rule that exists.
    pub fn permits(&self, roles: &RoleSet) -> bool {
        roles.is_admin() || roles.intersects(self.allowed_roles)
    }
}

const USER: &[Role] = &[Role::User, Role::Admin];
const REVIEWER: &[Role] = &[Role::Reviewer, Role::Admin];
const APPROVER: &[Role] = &[Role::Approver, Role::Admin];
const ADMIN: &[Role] = &[Role::Admin];

static TRANSITIONS: [TransitionRule; 15] = {
    use WorkflowAction::*;
    use WorkflowStage::*;

    [
        TransitionRule::new(Draft, Submit, Submitted, USER),
        TransitionRule::new(Submitted, StartReview, UnderReview, REVIEWER),
        TransitionRule::new(UnderReview, Approve, Approved, APPROVER),
        TransitionRule::new(UnderReview, Reject, Rejected, APPROVER).with_comment(),
        TransitionRule::new(UnderReview, RequestInfo, NeedsInfo, REVIEWER),
        TransitionRule::new(NeedsInfo, ProvideInfo, Submitted, USER),
        TransitionRule::new(Rejected, Reopen, Draft, ADMIN),
        TransitionRule::new(Approved, StartDistribution, Distribution, ADMIN),
        TransitionRule::new(Distribution, Complete, Completed, ADMIN),
        // Any open case can be withdrawn
        TransitionRule::new(Draft, Cancel, Cancelled, ADMIN),
        TransitionRule::new(Submitted, Cancel, Cancelled, ADMIN),
        TransitionRule::new(UnderReview, Cancel, Cancelled, ADMIN),
        TransitionRule::new(NeedsInfo, Cancel, Cancelled, ADMIN),
        TransitionRule::new(Approved, Cancel, Cancelled, ADMIN),
        TransitionRule::new(Distribution, Cancel, Cancelled, ADMIN),
    ]
};

/// Every rule, in table order.
pub fn transitions() -> &'static [TransitionRule] {
    &TRANSITIONS
}

/// The unique rule for `(stage, action)`, if the table defines one.
pub fn rule_for(stage: WorkflowStage, action: WorkflowAction) -> Option<&'static TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|rule| rule.from_stage == stage && rule.action == action)
}

/// Rules leaving `stage`, in table order.
pub fn rules_from(stage: WorkflowStage) -> impl Iterator<Item = &'static TransitionRule> {
    TRANSITIONS.iter().filter(move |rule| rule.from_stage == stage)
}
