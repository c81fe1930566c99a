use anyhow::anyhow;
use autoescola_auth::{AdminRole, Identity};
use autoescola_core::AppError;
use autoescola_models::{Instructor, InstructorAction, StatusChangeRequest};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::audit::AuditRecorder;
use crate::store::{InstructorStore, WriteStore};

pub const ENTITY_TYPE: &str = "instructor";

pub struct InstructorService;

impl InstructorService {
    /// Applies `action` to the instructor and records it in the audit trail.
    ///
    /// Fails with 404 for an unknown instructor and 409 when the action is not
    /// allowed from the current status. Nothing is audited in either case.
    /// The status change and its audit entry are committed together.
    #[instrument(skip(instructors, writes, actor, dto), fields(actor_id = %actor.id, action = action.as_str()))]
    pub async fn change_status(
        instructors: &dyn InstructorStore,
        writes: &dyn WriteStore,
        actor: &Identity<AdminRole>,
        id: Uuid,
        action: InstructorAction,
        dto: StatusChangeRequest,
    ) -> Result<Instructor, AppError> {
        let current = instructors
            .find_instructor(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Instrutor não encontrado")))?;

        if !action.allowed_from(current.status) {
            return Err(AppError::conflict(anyhow!(
                "Não é possível aplicar '{}' a um instrutor com status {}",
                action.as_str(),
                current.status
            )));
        }

        let mut tx = writes.begin().await?;

        let updated = tx
            .transition_instructor(id, current.status, action.target())
            .await?
            .ok_or_else(|| {
                AppError::conflict(anyhow!("Status do instrutor foi alterado, tente novamente"))
            })?;

        AuditRecorder::record(
            &mut *tx,
            actor.id,
            action.audit_action(),
            ENTITY_TYPE,
            updated.id,
            json!({
                "from": current.status,
                "to": updated.status,
                "reason": dto.reason,
            }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            instructor_id = %updated.id,
            from = %current.status,
            to = %updated.status,
            "instructor status changed"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use autoescola_models::{AuditAction, InstructorStatus};
    use axum::http::StatusCode;

    fn operator() -> Identity<AdminRole> {
        Identity::new(Uuid::new_v4(), "Operadora", "op@local.dev", AdminRole::Operator)
    }

    #[tokio::test]
    async fn test_block_records_audit_entry() {
        let store = MemoryStore::new();
        let instructor = store.insert_instructor("Carlos", InstructorStatus::Approved);
        let actor = operator();

        let updated = InstructorService::change_status(
            store.as_ref(),
            store.as_ref(),
            &actor,
            instructor.id,
            InstructorAction::Block,
            StatusChangeRequest {
                reason: Some("Documentação vencida".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, InstructorStatus::Blocked);
        let entries = store.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::InstructorBlocked);
        assert_eq!(entries[0].actor_id, actor.id);
        assert_eq!(entries[0].entity_id, instructor.id);
        assert_eq!(entries[0].metadata["from"], "APPROVED");
        assert_eq!(entries[0].metadata["reason"], "Documentação vencida");
    }

    #[tokio::test]
    async fn test_disallowed_transition_is_conflict_and_not_audited() {
        let store = MemoryStore::new();
        let instructor = store.insert_instructor("Carlos", InstructorStatus::Approved);

        let err = InstructorService::change_status(
            store.as_ref(),
            store.as_ref(),
            &operator(),
            instructor.id,
            InstructorAction::Unblock,
            StatusChangeRequest::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(store.audit_entries().is_empty());
        assert_eq!(
            store.instructor(instructor.id).unwrap().status,
            InstructorStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_unknown_instructor_is_not_found() {
        let store = MemoryStore::new();

        let err = InstructorService::change_status(
            store.as_ref(),
            store.as_ref(),
            &operator(),
            Uuid::new_v4(),
            InstructorAction::Approve,
            StatusChangeRequest::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_audit_leaves_status_unchanged() {
        let store = MemoryStore::new();
        store.fail_audit_writes(true);
        let instructor = store.insert_instructor("Carlos", InstructorStatus::Pending);

        let err = InstructorService::change_status(
            store.as_ref(),
            store.as_ref(),
            &operator(),
            instructor.id,
            InstructorAction::Approve,
            StatusChangeRequest::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            store.instructor(instructor.id).unwrap().status,
            InstructorStatus::Pending
        );
        assert!(store.audit_entries().is_empty());

        store.fail_audit_writes(false);
        let updated = InstructorService::change_status(
            store.as_ref(),
            store.as_ref(),
            &operator(),
            instructor.id,
            InstructorAction::Approve,
            StatusChangeRequest::default(),
        )
        .await
        .unwrap();

        assert_eq!(updated.status, InstructorStatus::Approved);
        assert_eq!(store.audit_entries().len(), 1);
    }
}
