//! Append-only audit trail for privileged admin mutations.
//!
//! The entry is written through the same unit of work as the mutation it
//! describes, so either both are committed or neither is. A failed write
//! fails the request.

use autoescola_core::AppError;
use autoescola_models::{AuditAction, AuditEntry, NewAuditEntry};
use autoescola_observability::{track_audit_failure, track_audit_written};
use tracing::instrument;
use uuid::Uuid;

use crate::store::StoreTx;

pub struct AuditRecorder;

impl AuditRecorder {
    #[instrument(skip(tx, metadata), fields(action = %action))]
    pub async fn record(
        tx: &mut dyn StoreTx,
        actor_id: Uuid,
        action: AuditAction,
        entity_type: &str,
        entity_id: Uuid,
        metadata: serde_json::Value,
    ) -> Result<AuditEntry, AppError> {
        let entry = NewAuditEntry {
            actor_id,
            action,
            entity_type: entity_type.to_string(),
            entity_id,
            metadata,
        };

        match tx.append_audit(entry).await {
            Ok(entry) => {
                track_audit_written(action.as_str());
                Ok(entry)
            }
            Err(e) => {
                tracing::error!(
                    action = %action,
                    entity_type,
                    entity_id = %entity_id,
                    actor_id = %actor_id,
                    error = %e,
                    "audit write failed"
                );
                track_audit_failure(action.as_str());
                Err(AppError::audit_write_failure(e))
            }
        }
    }
}
