//! Workflow lifecycle tests
//!
//! Walks aid applications through complete lifecycles the way a route
//! handler drives the engine: decide, persist the stage, append the log.

use chrono::{Duration, Utc};
use yardim_models::{
    verify_chain, EntityType, Locale, Role, RoleSet, WorkflowAction, WorkflowItem,
    WorkflowLogEntry, WorkflowStage,
};
use yardim_utils::{AppConfig, WorkflowSettings};
use yardim_workflow_engine::{
    calculate_workflow_efficiency, calculate_workflow_statistics, items_requiring_attention_at,
    AttentionPriority, TransitionError, WorkflowEngine,
};

struct Case {
    stage: WorkflowStage,
    log: Vec<WorkflowLogEntry>,
}

impl Case {
    fn new() -> Self {
        Self {
            stage: WorkflowStage::Draft,
            log: Vec::new(),
        }
    }

    fn act(
        &mut self,
        engine: &WorkflowEngine,
        action: WorkflowAction,
        role: Role,
        comment: Option<&str>,
    ) -> Result<WorkflowStage, TransitionError> {
        let applied = engine.apply(self.stage, action, &RoleSet::from([role]), comment)?;

        let entry = applied.log_entry(EntityType::AidApplication, "app-1", role.as_str());
        let entry = match self.log.last() {
            Some(previous) => entry.chained_to(previous),
            None => entry,
        };

        self.log.push(entry);
        self.stage = applied.to_stage;
        Ok(self.stage)
    }
}

#[test]
fn test_happy_path_to_completion() {
    let engine = WorkflowEngine::new();
    let mut case = Case::new();

    case.act(&engine, WorkflowAction::Submit, Role::User, None).unwrap();
    case.act(&engine, WorkflowAction::StartReview, Role::Reviewer, None).unwrap();
    case.act(&engine, WorkflowAction::Approve, Role::Approver, None).unwrap();
    case.act(&engine, WorkflowAction::StartDistribution, Role::Admin, None).unwrap();
    let stage = case.act(&engine, WorkflowAction::Complete, Role::Admin, None).unwrap();

    assert_eq!(stage, WorkflowStage::Completed);
    assert_eq!(case.log.len(), 5);
    assert!(verify_chain(&case.log));

    for role in [Role::Admin, Role::Approver, Role::Reviewer, Role::User, Role::Viewer] {
        assert!(engine
            .available_actions(case.stage, &RoleSet::from([role]))
            .is_empty());
    }
}

#[test]
fn test_needs_info_loop_returns_to_submitted() {
    let engine = WorkflowEngine::new();
    let mut case = Case::new();

    case.act(&engine, WorkflowAction::Submit, Role::User, None).unwrap();
    case.act(&engine, WorkflowAction::StartReview, Role::Reviewer, None).unwrap();
    case.act(&engine, WorkflowAction::RequestInfo, Role::Reviewer, None).unwrap();
    assert_eq!(case.stage, WorkflowStage::NeedsInfo);

    let denied = case.act(&engine, WorkflowAction::ProvideInfo, Role::Reviewer, None);
    assert_eq!(
        denied,
        Err(TransitionError::InsufficientRole {
            action: WorkflowAction::ProvideInfo
        })
    );

    let stage = case
        .act(&engine, WorkflowAction::ProvideInfo, Role::User, Some("Kira sözleşmesi eklendi"))
        .unwrap();
    assert_eq!(stage, WorkflowStage::Submitted);
    assert_eq!(case.log.len(), 4);
}

#[test]
fn test_reject_then_reopen() {
    let engine = WorkflowEngine::new();
    let mut case = Case::new();

    case.act(&engine, WorkflowAction::Submit, Role::User, None).unwrap();
    case.act(&engine, WorkflowAction::StartReview, Role::Reviewer, None).unwrap();

    let missing = case.act(&engine, WorkflowAction::Reject, Role::Approver, None);
    assert_eq!(
        missing,
        Err(TransitionError::CommentRequired {
            action: WorkflowAction::Reject
        })
    );
    assert_eq!(case.stage, WorkflowStage::UnderReview);

    case.act(&engine, WorkflowAction::Reject, Role::Approver, Some("Gelir sınırı aşılıyor"))
        .unwrap();
    assert_eq!(
        engine.available_actions(case.stage, &RoleSet::from([Role::Admin])),
        vec![WorkflowAction::Reopen]
    );
    assert!(engine
        .available_actions(case.stage, &RoleSet::from([Role::Approver]))
        .is_empty());

    let stage = case.act(&engine, WorkflowAction::Reopen, Role::Admin, None).unwrap();
    assert_eq!(stage, WorkflowStage::Draft);

    let rejection = &case.log[2];
    assert_eq!(rejection.comment.as_deref(), Some("Gelir sınırı aşılıyor"));
    assert!(verify_chain(&case.log));
}

#[test]
fn test_cancel_is_admin_only() {
    let engine = WorkflowEngine::new();
    let mut case = Case::new();

    case.act(&engine, WorkflowAction::Submit, Role::User, None).unwrap();

    assert!(case.act(&engine, WorkflowAction::Cancel, Role::User, None).is_err());
    let stage = case.act(&engine, WorkflowAction::Cancel, Role::Admin, None).unwrap();
    assert_eq!(stage, WorkflowStage::Cancelled);

    let check = engine.can_perform_action(
        WorkflowStage::Cancelled,
        WorkflowAction::Reopen,
        &RoleSet::from([Role::Admin]),
    );
    assert!(!check.allowed);
}

#[test]
fn test_engine_from_config_uses_locale() {
    let mut config = AppConfig::default();
    config.workflow = WorkflowSettings {
        locale: Locale::En,
        trim_comments: true,
    };
    let engine = WorkflowEngine::from_settings(config.workflow);

    let result = engine.perform_transition(
        WorkflowStage::Draft,
        WorkflowAction::Submit,
        &RoleSet::from_names(["viewer"]),
        None,
    );

    assert!(!result.success);
    let error = result.error.unwrap();
    assert_eq!(engine.describe(&error), "You are not allowed to perform this action");
    assert_eq!(
        error.message(Locale::Tr),
        "Bu işlem için yetkiniz bulunmuyor"
    );
}

#[test]
fn test_result_serializes_for_route_layer() {
    let engine = WorkflowEngine::new();

    let ok = engine.perform_transition(
        WorkflowStage::Draft,
        WorkflowAction::Submit,
        &RoleSet::from([Role::User]),
        None,
    );
    let json = serde_json::to_value(ok).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["newStage"], "submitted");
    assert!(json.get("error").is_none());

    let denied = engine.perform_transition(
        WorkflowStage::Completed,
        WorkflowAction::Cancel,
        &RoleSet::from([Role::Admin]),
        None,
    );
    let json = serde_json::to_value(denied).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "invalid_transition");
}

#[test]
fn test_dashboard_snapshot() {
    let now = Utc::now();
    let items = vec![
        WorkflowItem::new(WorkflowStage::Draft),
        WorkflowItem::new(WorkflowStage::Submitted).with_assignee("reviewer-1"),
        WorkflowItem::new(WorkflowStage::UnderReview).with_due_date(now - Duration::days(2)),
        WorkflowItem::new(WorkflowStage::NeedsInfo),
        WorkflowItem::new(WorkflowStage::Completed)
            .with_created_at(now - Duration::days(10))
            .with_completed_at(now),
        WorkflowItem::new(WorkflowStage::Cancelled),
        WorkflowItem::new(WorkflowStage::Rejected),
        WorkflowItem::new(WorkflowStage::Rejected),
    ];

    let stats = calculate_workflow_statistics(&items);
    assert_eq!(stats.total, 8);
    assert_eq!(stats.active_count, 4);
    assert_eq!(stats.completion_rate, 13);

    let efficiency = calculate_workflow_efficiency(&items);
    assert_eq!(efficiency.rejection_rate, 25);
    assert_eq!(efficiency.cancellation_rate, 13);
    assert_eq!(efficiency.average_completion_time, Some(10));

    let queue = items_requiring_attention_at(&items, Some("reviewer-1"), now);
    let priorities: Vec<AttentionPriority> = queue.iter().map(|entry| entry.priority).collect();
    assert_eq!(
        priorities,
        vec![AttentionPriority::High, AttentionPriority::Medium, AttentionPriority::Medium]
    );
    assert_eq!(queue[0].item.workflow_stage, WorkflowStage::UnderReview);
    assert_eq!(queue[1].item.workflow_stage, WorkflowStage::Submitted);
    assert_eq!(queue[2].item.workflow_stage, WorkflowStage::NeedsInfo);
}
