use async_trait::async_trait;
use autoescola_auth::{AdminRole, AppRole};
use autoescola_models::{
    AdminAccount, AuditAction, AuditEntry, CreatePlanDto, Instructor, InstructorStatus,
    NewAuditEntry, Plan, UpdatePlanDto, UserAccount,
};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use super::{
    AdminStore, InstructorStore, StoreError, StoreResult, StoreTx, UserStore, WriteStore,
};

/// Postgres-backed implementation of every store trait.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
}

impl TryFrom<AdminRow> for AdminAccount {
    type Error = StoreError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<AdminRole>()
            .map_err(|e| StoreError::Corrupt(format!("admins.role for {}: {}", row.id, e)))?;

        Ok(AdminAccount {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            is_active: row.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<AppRole>()
            .map_err(|e| StoreError::Corrupt(format!("users.role for {}: {}", row.id, e)))?;

        Ok(UserAccount {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
struct InstructorRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    status: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InstructorRow> for Instructor {
    type Error = StoreError;

    fn try_from(row: InstructorRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<InstructorStatus>().map_err(|e| {
            StoreError::Corrupt(format!("instructors.status for {}: {}", row.id, e))
        })?;

        Ok(Instructor {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            status,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: Uuid,
    actor_id: Uuid,
    action: String,
    entity_type: String,
    entity_id: Uuid,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = StoreError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let action = row
            .action
            .parse::<AuditAction>()
            .map_err(|e| StoreError::Corrupt(format!("audit_logs.action for {}: {}", row.id, e)))?;

        Ok(AuditEntry {
            id: row.id,
            actor_id: row.actor_id,
            action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            metadata: row.metadata,
            created_at: row.created_at,
        })
    }
}

const PLAN_COLUMNS: &str =
    "id, name, price_cents, duration_days, is_active, created_at, updated_at";

#[async_trait]
impl AdminStore for PgStore {
    #[instrument(skip(self))]
    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<AdminAccount>> {
        sqlx::query_as::<_, AdminRow>(
            "SELECT id, name, email, password_hash, role, is_active
             FROM admins WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(AdminAccount::try_from)
        .transpose()
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, role
             FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(UserAccount::try_from)
        .transpose()
    }
}

#[async_trait]
impl InstructorStore for PgStore {
    #[instrument(skip(self))]
    async fn find_instructor(&self, id: Uuid) -> StoreResult<Option<Instructor>> {
        sqlx::query_as::<_, InstructorRow>(
            "SELECT i.id, i.user_id, u.name, i.status, i.updated_at
             FROM instructors i
             JOIN users u ON u.id = i.user_id
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Instructor::try_from)
        .transpose()
    }
}

#[async_trait]
impl WriteStore for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgTx { tx }))
    }
}

/// A Postgres transaction. Rolled back on drop unless committed.
struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgTx {
    #[instrument(skip(self))]
    async fn transition_instructor(
        &mut self,
        id: Uuid,
        from: InstructorStatus,
        to: InstructorStatus,
    ) -> StoreResult<Option<Instructor>> {
        sqlx::query_as::<_, InstructorRow>(
            "WITH updated AS (
                 UPDATE instructors SET status = $3, updated_at = NOW()
                 WHERE id = $1 AND status = $2
                 RETURNING id, user_id, status, updated_at
             )
             SELECT updated.id, updated.user_id, u.name, updated.status, updated.updated_at
             FROM updated
             JOIN users u ON u.id = updated.user_id",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(&mut *self.tx)
        .await?
        .map(Instructor::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn create_plan(&mut self, dto: &CreatePlanDto) -> StoreResult<Plan> {
        let plan = sqlx::query_as::<_, Plan>(&format!(
            "INSERT INTO plans (name, price_cents, duration_days)
             VALUES ($1, $2, $3)
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.price_cents)
        .bind(dto.duration_days)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(plan)
    }

    #[instrument(skip(self))]
    async fn update_plan(&mut self, id: Uuid, dto: &UpdatePlanDto) -> StoreResult<Option<Plan>> {
        let plan = sqlx::query_as::<_, Plan>(&format!(
            "UPDATE plans SET
                 name = COALESCE($2, name),
                 price_cents = COALESCE($3, price_cents),
                 duration_days = COALESCE($4, duration_days),
                 is_active = COALESCE($5, is_active),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PLAN_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name.as_deref())
        .bind(dto.price_cents)
        .bind(dto.duration_days)
        .bind(dto.is_active)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(plan)
    }

    #[instrument(skip(self), fields(action = %entry.action, entity_id = %entry.entity_id))]
    async fn append_audit(&mut self, entry: NewAuditEntry) -> StoreResult<AuditEntry> {
        sqlx::query_as::<_, AuditRow>(
            "INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, actor_id, action, entity_type, entity_id, metadata, created_at",
        )
        .bind(entry.actor_id)
        .bind(entry.action.as_str())
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.metadata)
        .fetch_one(&mut *self.tx)
        .await?
        .try_into()
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let PgTx { tx } = *self;
        tx.commit().await?;
        Ok(())
    }
}
