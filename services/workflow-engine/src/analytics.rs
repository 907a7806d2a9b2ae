//! Workflow Analytics
//!
//! Aggregates over case snapshots for dashboards and reviewer work queues.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use yardim_models::{Locale, WorkflowItem, WorkflowStage};

use crate::messages;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatistics {
    pub total: usize,
    pub by_stage: BTreeMap<WorkflowStage, usize>,
    pub completed_count: usize,
    pub rejected_count: usize,
    /// Cases not yet completed, rejected or cancelled
    pub active_count: usize,
    /// Percentage of completed cases, rounded
    pub completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEfficiency {
    pub rejection_rate: u32,
    pub cancellation_rate: u32,
    /// Mean days from creation to completion, signed. `None` means no
    /// completed case carried both timestamps.
    pub average_completion_time: Option<i64>,
}

/// Ordered so that sorting ascending puts the most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttentionPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionReason {
    /// Due date has passed
    Overdue,
    /// Applicant owes documents
    AwaitingInfo,
    /// Submitted or under review and assigned to the requesting user
    ReviewNeeded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionItem<'a> {
    pub item: &'a WorkflowItem,
    pub reason: AttentionReason,
    pub priority: AttentionPriority,
}

impl AttentionItem<'_> {
    pub fn reason_text(&self, locale: Locale) -> &'static str {
        messages::attention_reason(self.reason, locale)
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 * 100.0 / total as f64).round() as u32
}

/// Number of cases per stage. Every stage is present, empty ones with 0.
pub fn count_by_stage(items: &[WorkflowItem]) -> BTreeMap<WorkflowStage, usize> {
    let mut counts: BTreeMap<WorkflowStage, usize> =
        WorkflowStage::ALL.iter().map(|&stage| (stage, 0)).collect();

    for item in items {
        *counts.entry(item.workflow_stage).or_insert(0) += 1;
    }

    counts
}

pub fn calculate_workflow_statistics(items: &[WorkflowItem]) -> WorkflowStatistics {
    let total = items.len();
    let by_stage = count_by_stage(items);
    let count = |stage: WorkflowStage| by_stage.get(&stage).copied().unwrap_or(0);

    let completed_count = count(WorkflowStage::Completed);
    let rejected_count = count(WorkflowStage::Rejected);
    let active_count = items
        .iter()
        .filter(|item| !item.workflow_stage.is_terminal())
        .count();

    let statistics = WorkflowStatistics {
        total,
        completed_count,
        rejected_count,
        active_count,
        completion_rate: percentage(completed_count, total),
        by_stage,
    };

    debug!(
        total = statistics.total,
        active = statistics.active_count,
        completion_rate = statistics.completion_rate,
        "Calculated workflow statistics"
    );

    statistics
}

pub fn calculate_workflow_efficiency(items: &[WorkflowItem]) -> WorkflowEfficiency {
    let total = items.len();
    let rejected = items
        .iter()
        .filter(|item| item.workflow_stage == WorkflowStage::Rejected)
        .count();
    let cancelled = items
        .iter()
        .filter(|item| item.workflow_stage == WorkflowStage::Cancelled)
        .count();

    let durations: Vec<i64> = items
        .iter()
        .filter(|item| item.workflow_stage == WorkflowStage::Completed)
        .filter_map(|item| match (item.created_at, item.completed_at) {
            (Some(created), Some(completed)) => {
                if completed < created {
                    warn!(%created, %completed, "Completed case finished before it was created");
                }
                Some((completed - created).num_seconds())
            }
            _ => None,
        })
        .collect();

    let average_completion_time = if durations.is_empty() {
        None
    } else {
        let mean_seconds = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
        Some((mean_seconds / SECONDS_PER_DAY).round() as i64)
    };

    WorkflowEfficiency {
        rejection_rate: percentage(rejected, total),
        cancellation_rate: percentage(cancelled, total),
        average_completion_time,
    }
}

/// Open cases a person should look at, most urgent first.
pub fn items_requiring_attention<'a>(
    items: &'a [WorkflowItem],
    user_id: Option<&str>,
) -> Vec<AttentionItem<'a>> {
    items_requiring_attention_at(items, user_id, Utc::now())
}

/// Same as [`items_requiring_attention`] with an explicit clock.
pub fn items_requiring_attention_at<'a>(
    items: &'a [WorkflowItem],
    user_id: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<AttentionItem<'a>> {
    let mut attention: Vec<AttentionItem<'a>> = items
        .iter()
        .filter(|item| !item.workflow_stage.is_terminal())
        .filter_map(|item| {
            let (reason, priority) = triage(item, user_id, now)?;
            Some(AttentionItem {
                item,
                reason,
                priority,
            })
        })
        .collect();

    // stable: equal priorities keep input order
    attention.sort_by_key(|entry| entry.priority);
    attention
}

fn triage(
    item: &WorkflowItem,
    user_id: Option<&str>,
    now: DateTime<Utc>,
) -> Option<(AttentionReason, AttentionPriority)> {
    if item.is_overdue(now) {
        return Some((AttentionReason::Overdue, AttentionPriority::High));
    }

    if item.workflow_stage == WorkflowStage::NeedsInfo {
        return Some((AttentionReason::AwaitingInfo, AttentionPriority::Medium));
    }

    match user_id {
        Some(user_id) if item.workflow_stage.awaits_review() && item.is_assigned_to(user_id) => {
            Some((AttentionReason::ReviewNeeded, AttentionPriority::Medium))
        }
        _ => None,
    }
}
