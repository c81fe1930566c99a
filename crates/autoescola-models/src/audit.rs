//! Audit trail models.
//!
//! Entries are append-only. There is no update or delete representation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    InstructorApproved,
    InstructorRejected,
    InstructorBlocked,
    InstructorUnblocked,
    PlanCreated,
    PlanUpdated,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct UnknownAuditAction(pub String);

impl AuditAction {
    pub const ALL: [AuditAction; 6] = [
        AuditAction::InstructorApproved,
        AuditAction::InstructorRejected,
        AuditAction::InstructorBlocked,
        AuditAction::InstructorUnblocked,
        AuditAction::PlanCreated,
        AuditAction::PlanUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::InstructorApproved => "INSTRUCTOR_APPROVED",
            AuditAction::InstructorRejected => "INSTRUCTOR_REJECTED",
            AuditAction::InstructorBlocked => "INSTRUCTOR_BLOCKED",
            AuditAction::InstructorUnblocked => "INSTRUCTOR_UNBLOCKED",
            AuditAction::PlanCreated => "PLAN_CREATED",
            AuditAction::PlanUpdated => "PLAN_UPDATED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = UnknownAuditAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAuditAction(s.to_string()))
    }
}

/// Entry about to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub actor_id: Uuid,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuditEntry {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: Uuid,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
