//! Property-based tests for the workflow vocabulary
//!
//! Covers wire-name parsing, role set construction and audit entry
//! integrity across arbitrary inputs.

use proptest::prelude::*;
use chrono::{DateTime, TimeZone, Utc};

use crate::{
    verify_chain, EntityType, Role, RoleSet, WorkflowAction, WorkflowItem, WorkflowLogEntry,
    WorkflowStage,
};

prop_compose! {
    fn arb_datetime()(timestamp in 0i64..2147483647i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }
}

fn arb_stage() -> impl Strategy<Value = WorkflowStage> {
    prop::sample::select(WorkflowStage::ALL.to_vec())
}

fn arb_action() -> impl Strategy<Value = WorkflowAction> {
    prop::sample::select(WorkflowAction::ALL.to_vec())
}

fn arb_role_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["admin", "approver", "reviewer", "user", "viewer"])
            .prop_map(str::to_string),
        "[a-z]{3,12}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_stage_wire_name_parses_back(stage in arb_stage()) {
        prop_assert_eq!(stage.as_str().parse::<WorkflowStage>(), Ok(stage));
        prop_assert_eq!(stage.as_str().to_uppercase().parse::<WorkflowStage>(), Ok(stage));
    }

    #[test]
    fn prop_action_wire_name_parses_back(action in arb_action()) {
        prop_assert_eq!(action.to_string().parse::<WorkflowAction>(), Ok(action));
    }

    #[test]
    fn prop_main_sequence_has_order(stage in arb_stage()) {
        prop_assert_eq!(stage.is_main_sequence(), WorkflowStage::MAIN_SEQUENCE.contains(&stage));
    }

    #[test]
    fn prop_role_set_keeps_only_known_roles(names in prop::collection::vec(arb_role_name(), 0..6)) {
        let roles = RoleSet::from_names(&names);

        for role in roles.iter() {
            prop_assert!(names.iter().any(|name| name == role.as_str()));
        }
        for name in &names {
            if let Ok(role) = name.parse::<Role>() {
                prop_assert!(roles.contains(role));
            }
        }
    }

    #[test]
    fn prop_item_overdue_iff_due_before_now(due in arb_datetime(), now in arb_datetime()) {
        let item = WorkflowItem::new(WorkflowStage::UnderReview).with_due_date(due);
        prop_assert_eq!(item.is_overdue(now), due < now);
    }

    #[test]
    fn prop_log_entry_comment_is_covered_by_hash(
        comment in "[a-zA-Z ]{1,40}",
        other in "[a-zA-Z ]{1,40}",
        from in arb_stage(),
        to in arb_stage(),
        action in arb_action(),
    ) {
        let entry = WorkflowLogEntry::new(EntityType::Beneficiary, "ben-1", action, from, to, "user-1")
            .with_comment(comment.clone());
        prop_assert!(entry.verify_integrity());

        let mut edited = entry.clone();
        edited.comment = Some(other.clone());
        prop_assert_eq!(edited.verify_integrity(), comment == other);

        let next = WorkflowLogEntry::new(EntityType::Beneficiary, "ben-1", action, to, from, "user-2")
            .chained_to(&entry);
        prop_assert!(verify_chain(&[entry, next]));
    }
}
