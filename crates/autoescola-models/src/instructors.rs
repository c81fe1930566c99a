//! Instructor verification status.
//!
//! Only the status column is owned by the admin panel. Profile data belongs
//! to the backend's instructor resource.
//!
//! Transitions:
//!
//! | Action | From | To |
//! |---|---|---|
//! | approve | PENDING, REJECTED | APPROVED |
//! | reject | PENDING | REJECTED |
//! | block | PENDING, APPROVED | BLOCKED |
//! | unblock | BLOCKED | APPROVED |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::audit::AuditAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstructorStatus {
    Pending,
    Approved,
    Rejected,
    Blocked,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown instructor status: {0}")]
pub struct UnknownInstructorStatus(pub String);

impl InstructorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructorStatus::Pending => "PENDING",
            InstructorStatus::Approved => "APPROVED",
            InstructorStatus::Rejected => "REJECTED",
            InstructorStatus::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for InstructorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstructorStatus {
    type Err = UnknownInstructorStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(InstructorStatus::Pending),
            "APPROVED" => Ok(InstructorStatus::Approved),
            "REJECTED" => Ok(InstructorStatus::Rejected),
            "BLOCKED" => Ok(InstructorStatus::Blocked),
            other => Err(UnknownInstructorStatus(other.to_string())),
        }
    }
}

/// Privileged status changes an admin can apply to an instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructorAction {
    Approve,
    Reject,
    Block,
    Unblock,
}

impl InstructorAction {
    pub fn target(&self) -> InstructorStatus {
        match self {
            InstructorAction::Approve | InstructorAction::Unblock => InstructorStatus::Approved,
            InstructorAction::Reject => InstructorStatus::Rejected,
            InstructorAction::Block => InstructorStatus::Blocked,
        }
    }

    pub fn allowed_from(&self, current: InstructorStatus) -> bool {
        use InstructorStatus::*;

        match self {
            InstructorAction::Approve => matches!(current, Pending | Rejected),
            InstructorAction::Reject => matches!(current, Pending),
            InstructorAction::Block => matches!(current, Pending | Approved),
            InstructorAction::Unblock => matches!(current, Blocked),
        }
    }

    pub fn audit_action(&self) -> AuditAction {
        match self {
            InstructorAction::Approve => AuditAction::InstructorApproved,
            InstructorAction::Reject => AuditAction::InstructorRejected,
            InstructorAction::Block => AuditAction::InstructorBlocked,
            InstructorAction::Unblock => AuditAction::InstructorUnblocked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstructorAction::Approve => "approve",
            InstructorAction::Reject => "reject",
            InstructorAction::Block => "block",
            InstructorAction::Unblock => "unblock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Instructor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub status: InstructorStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InstructorResponse {
    pub instructor: Instructor,
}

/// Optional justification attached to a status change. Recorded in the audit entry.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct StatusChangeRequest {
    #[validate(length(max = 500, message = "Motivo deve ter no máximo 500 caracteres"))]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [InstructorStatus; 4] = [
        InstructorStatus::Pending,
        InstructorStatus::Approved,
        InstructorStatus::Rejected,
        InstructorStatus::Blocked,
    ];

    #[test]
    fn test_block_transitions() {
        let allowed: Vec<_> = ALL
            .into_iter()
            .filter(|s| InstructorAction::Block.allowed_from(*s))
            .collect();
        assert_eq!(
            allowed,
            vec![InstructorStatus::Pending, InstructorStatus::Approved]
        );
    }

    #[test]
    fn test_unblock_only_from_blocked() {
        for status in ALL {
            assert_eq!(
                InstructorAction::Unblock.allowed_from(status),
                status == InstructorStatus::Blocked
            );
        }
        assert_eq!(InstructorAction::Unblock.target(), InstructorStatus::Approved);
    }

    #[test]
    fn test_no_action_targets_its_own_source() {
        for action in [
            InstructorAction::Approve,
            InstructorAction::Reject,
            InstructorAction::Block,
            InstructorAction::Unblock,
        ] {
            assert!(!action.allowed_from(action.target()), "{:?}", action);
        }
    }

    #[test]
    fn test_status_parse() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<InstructorStatus>(), Ok(status));
        }
        assert!("ACTIVE".parse::<InstructorStatus>().is_err());
    }

    #[test]
    fn test_reason_length() {
        let long = StatusChangeRequest {
            reason: Some("x".repeat(501)),
        };
        assert!(long.validate().is_err());
        assert!(StatusChangeRequest::default().validate().is_ok());
    }
}
