use anyhow::anyhow;
use autoescola_auth::{AdminRole, Identity};
use autoescola_core::AppError;
use autoescola_models::{AuditAction, CreatePlanDto, Plan, UpdatePlanDto};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::audit::AuditRecorder;
use crate::store::WriteStore;

pub const ENTITY_TYPE: &str = "plan";

pub struct PlanService;

impl PlanService {
    #[instrument(skip(writes, actor), fields(actor_id = %actor.id))]
    pub async fn create_plan(
        writes: &dyn WriteStore,
        actor: &Identity<AdminRole>,
        dto: CreatePlanDto,
    ) -> Result<Plan, AppError> {
        let mut tx = writes.begin().await?;
        let plan = tx.create_plan(&dto).await?;

        AuditRecorder::record(
            &mut *tx,
            actor.id,
            AuditAction::PlanCreated,
            ENTITY_TYPE,
            plan.id,
            json!({
                "name": plan.name,
                "price_cents": plan.price_cents,
                "duration_days": plan.duration_days,
            }),
        )
        .await?;

        tx.commit().await?;
        Ok(plan)
    }

    #[instrument(skip(writes, actor), fields(actor_id = %actor.id))]
    pub async fn update_plan(
        writes: &dyn WriteStore,
        actor: &Identity<AdminRole>,
        id: Uuid,
        dto: UpdatePlanDto,
    ) -> Result<Plan, AppError> {
        if dto.is_empty() {
            return Err(AppError::invalid_input(
                "body",
                "Informe ao menos um campo para atualizar",
            ));
        }

        let mut tx = writes.begin().await?;
        let plan = tx
            .update_plan(id, &dto)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Plano não encontrado")))?;

        let mut changes = serde_json::Map::new();
        if let Some(name) = &dto.name {
            changes.insert("name".into(), json!(name));
        }
        if let Some(price_cents) = dto.price_cents {
            changes.insert("price_cents".into(), json!(price_cents));
        }
        if let Some(duration_days) = dto.duration_days {
            changes.insert("duration_days".into(), json!(duration_days));
        }
        if let Some(is_active) = dto.is_active {
            changes.insert("is_active".into(), json!(is_active));
        }

        AuditRecorder::record(
            &mut *tx,
            actor.id,
            AuditAction::PlanUpdated,
            ENTITY_TYPE,
            plan.id,
            json!({ "changes": changes }),
        )
        .await?;

        tx.commit().await?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use axum::http::StatusCode;

    fn admin() -> Identity<AdminRole> {
        Identity::new(Uuid::new_v4(), "Admin Local", "admin@local.dev", AdminRole::Admin)
    }

    #[tokio::test]
    async fn test_update_records_only_changed_fields() {
        let store = MemoryStore::new();
        let plan = store.insert_plan("Plano Mensal", 9900, 30);

        let updated = PlanService::update_plan(
            store.as_ref(),
            &admin(),
            plan.id,
            UpdatePlanDto {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(!updated.is_active);
        let entries = store.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::PlanUpdated);
        assert_eq!(entries[0].metadata, json!({ "changes": { "is_active": false } }));
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let store = MemoryStore::new();
        let plan = store.insert_plan("Plano Mensal", 9900, 30);

        let err = PlanService::update_plan(
            store.as_ref(),
            &admin(),
            plan.id,
            UpdatePlanDto::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(store.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_plan_is_not_found() {
        let store = MemoryStore::new();

        let err = PlanService::update_plan(
            store.as_ref(),
            &admin(),
            Uuid::new_v4(),
            UpdatePlanDto {
                name: Some("Plano Anual".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_audit_discards_new_plan() {
        let store = MemoryStore::new();
        store.fail_audit_writes(true);

        let err = PlanService::create_plan(
            store.as_ref(),
            &admin(),
            CreatePlanDto {
                name: "Plano Anual".to_string(),
                price_cents: 99_900,
                duration_days: 365,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.plans().is_empty());
        assert!(store.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn test_failed_audit_discards_plan_changes() {
        let store = MemoryStore::new();
        let plan = store.insert_plan("Plano Mensal", 9900, 30);
        store.fail_audit_writes(true);

        PlanService::update_plan(
            store.as_ref(),
            &admin(),
            plan.id,
            UpdatePlanDto {
                price_cents: Some(12_900),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(store.plans(), vec![plan]);
    }
}
