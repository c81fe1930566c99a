//! PostgreSQL store tests. Run with `DATABASE_URL` set and `--ignored`.

use autoescola::autoescola_auth::{AdminRole, AppRole};
use autoescola::autoescola_core::hash_password_with_cost;
use autoescola::autoescola_models::{
    AuditAction, CreatePlanDto, InstructorStatus, NewAuditEntry, UpdatePlanDto,
};
use autoescola::store::{AdminStore, InstructorStore, PgStore, UserStore, WriteStore};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn insert_user(pool: &PgPool, email: &str, role: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(hash_password_with_cost("password123", 4).unwrap())
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_admin_lookup_ignores_email_case(pool: PgPool) {
    sqlx::query("INSERT INTO admins (name, email, password_hash, role) VALUES ($1, $2, $3, $4)")
        .bind("Admin Local")
        .bind("admin@local.dev")
        .bind(hash_password_with_cost("admin123", 4).unwrap())
        .bind("OPERATOR")
        .execute(&pool)
        .await
        .unwrap();

    let store = PgStore::new(pool);
    let admin = store
        .find_admin_by_email("ADMIN@local.dev")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(admin.role, AdminRole::Operator);
    assert!(admin.is_active);
    assert!(store.find_admin_by_email("nobody@local.dev").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_lookup(pool: PgPool) {
    let id = insert_user(&pool, "aluna@example.com", "STUDENT").await;
    let store = PgStore::new(pool);

    let user = store
        .find_user_by_email("aluna@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.role, AppRole::Student);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_transition_is_conditional(pool: PgPool) {
    let user_id = insert_user(&pool, "instrutor@example.com", "INSTRUCTOR").await;
    let instructor_id: Uuid =
        sqlx::query_scalar("INSERT INTO instructors (user_id) VALUES ($1) RETURNING id")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let store = PgStore::new(pool);

    let instructor = store.find_instructor(instructor_id).await.unwrap().unwrap();
    assert_eq!(instructor.status, InstructorStatus::Pending);

    let mut tx = store.begin().await.unwrap();
    let approved = tx
        .transition_instructor(instructor_id, InstructorStatus::Pending, InstructorStatus::Approved)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, InstructorStatus::Approved);

    let stale = tx
        .transition_instructor(instructor_id, InstructorStatus::Pending, InstructorStatus::Rejected)
        .await
        .unwrap();
    assert!(stale.is_none());
    tx.commit().await.unwrap();

    let stored = store.find_instructor(instructor_id).await.unwrap().unwrap();
    assert_eq!(stored.status, InstructorStatus::Approved);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_uncommitted_transition_is_rolled_back(pool: PgPool) {
    let user_id = insert_user(&pool, "instrutor@example.com", "INSTRUCTOR").await;
    let instructor_id: Uuid =
        sqlx::query_scalar("INSERT INTO instructors (user_id) VALUES ($1) RETURNING id")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let store = PgStore::new(pool.clone());

    let mut tx = store.begin().await.unwrap();
    tx.transition_instructor(instructor_id, InstructorStatus::Pending, InstructorStatus::Approved)
        .await
        .unwrap()
        .unwrap();
    tx.append_audit(NewAuditEntry {
        actor_id: Uuid::new_v4(),
        action: AuditAction::InstructorApproved,
        entity_type: "instructor".to_string(),
        entity_id: instructor_id,
        metadata: json!({}),
    })
    .await
    .unwrap();
    drop(tx);

    let stored = store.find_instructor(instructor_id).await.unwrap().unwrap();
    assert_eq!(stored.status, InstructorStatus::Pending);
    let audits: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(audits, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_plan_update_keeps_absent_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut tx = store.begin().await.unwrap();
    let plan = tx
        .create_plan(&CreatePlanDto {
            name: "Plano Mensal".to_string(),
            price_cents: 9900,
            duration_days: 30,
        })
        .await
        .unwrap();

    let updated = tx
        .update_plan(
            plan.id,
            &UpdatePlanDto {
                price_cents: Some(12900),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.price_cents, 12900);
    assert_eq!(updated.name, "Plano Mensal");
    assert_eq!(updated.duration_days, 30);
    assert!(
        tx.update_plan(Uuid::new_v4(), &UpdatePlanDto::default())
            .await
            .unwrap()
            .is_none()
    );
    tx.commit().await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_audit_append_returns_stored_row(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let actor_id = Uuid::new_v4();
    let entity_id = Uuid::new_v4();

    let mut tx = store.begin().await.unwrap();
    let entry = tx
        .append_audit(NewAuditEntry {
            actor_id,
            action: AuditAction::InstructorBlocked,
            entity_type: "instructor".to_string(),
            entity_id,
            metadata: json!({ "from": "APPROVED", "to": "BLOCKED" }),
        })
        .await
        .unwrap();

    assert_eq!(entry.actor_id, actor_id);
    assert_eq!(entry.action, AuditAction::InstructorBlocked);
    assert_eq!(entry.metadata["to"], "BLOCKED");
    tx.commit().await.unwrap();

    let action: String = sqlx::query_scalar("SELECT action FROM audit_logs WHERE id = $1")
        .bind(entry.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(action, "INSTRUCTOR_BLOCKED");
}
