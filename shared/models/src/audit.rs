use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::workflow::{WorkflowAction, WorkflowStage};

/// Record of one applied transition, written to the workflow log by the
/// caller after it persisted the new stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowLogEntry {
    pub id: Uuid,
    pub entity_id: String,
    pub entity_type: EntityType,
    pub action: WorkflowAction,
    pub from_stage: WorkflowStage,
    pub to_stage: WorkflowStage,
    pub performed_by: String,
    pub performed_by_name: Option<String>,
    pub comment: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub hash: String,
    pub previous_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Beneficiary,
    AidApplication,
}

impl WorkflowLogEntry {
    pub fn new(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        action: WorkflowAction,
        from_stage: WorkflowStage,
        to_stage: WorkflowStage,
        performed_by: impl Into<String>,
    ) -> Self {
        let entry = Self {
            id: Uuid::new_v4(),
            entity_id: entity_id.into(),
            entity_type,
            action,
            from_stage,
            to_stage,
            performed_by: performed_by.into(),
            performed_by_name: None,
            comment: None,
            metadata: BTreeMap::new(),
            created_at: Utc::now(),
            hash: String::new(),
            previous_hash: None,
        };

        entry.seal()
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self.seal()
    }

    pub fn with_performer_name(mut self, name: impl Into<String>) -> Self {
        self.performed_by_name = Some(name.into());
        self.seal()
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self.seal()
    }

    /// Links this entry to the previous entry of the same entity.
    pub fn chained_to(mut self, previous: &WorkflowLogEntry) -> Self {
        self.previous_hash = Some(previous.hash.clone());
        self.seal()
    }

    fn seal(mut self) -> Self {
        self.hash = self.calculate_hash();
        self
    }

    fn calculate_hash(&self) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.entity_id.as_bytes());
        hasher.update(serde_json::to_string(&self.entity_type).unwrap_or_default());
        hasher.update(self.action.as_str());
        hasher.update(self.from_stage.as_str());
        hasher.update(self.to_stage.as_str());
        hasher.update(self.performed_by.as_bytes());
        hasher.update(serde_json::to_string(&self.performed_by_name).unwrap_or_default());
        hasher.update(serde_json::to_string(&self.comment).unwrap_or_default());
        hasher.update(serde_json::to_string(&self.metadata).unwrap_or_default());
        hasher.update(self.created_at.to_rfc3339());
        hasher.update(self.previous_hash.as_deref().unwrap_or_default());

        hex::encode(hasher.finalize())
    }

    pub fn verify_integrity(&self) -> bool {
        self.calculate_hash() == self.hash
    }
}

/// Checks every entry's hash and that each entry points at its predecessor.
pub fn verify_chain(entries: &[WorkflowLogEntry]) -> bool {
    entries.iter().all(WorkflowLogEntry::verify_integrity)
        && entries
            .windows(2)
            .all(|pair| pair[1].previous_hash.as_deref() == Some(pair[0].hash.as_str()))
}
