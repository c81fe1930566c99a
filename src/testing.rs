//! In-memory stores and fixtures for tests.
//!
//! Enabled for this crate's unit tests and, through the `test-utils` feature,
//! for the integration tests under `tests/`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use autoescola_auth::{AdminRole, AppRole};
use autoescola_config::{CorsConfig, JwtConfig, SessionConfig};
use autoescola_core::hash_password_with_cost;
use autoescola_models::{
    AdminAccount, AuditEntry, CreatePlanDto, Instructor, InstructorStatus, NewAuditEntry, Plan,
    UpdatePlanDto, UserAccount,
};
use chrono::Utc;
use uuid::Uuid;

use crate::state::AppState;
use crate::store::{
    AdminStore, InstructorStore, StoreError, StoreResult, StoreTx, UserStore, WriteStore,
};

pub const TEST_SESSION_SECRET: &str = "test-admin-session-secret-0123456789abcdef";
pub const TEST_JWT_SECRET: &str = "test-api-jwt-secret-0123456789abcdef0123";

/// Lowest bcrypt cost, to keep tests fast.
const TEST_BCRYPT_COST: u32 = 4;

#[derive(Default)]
struct Inner {
    admins: Vec<AdminAccount>,
    users: Vec<UserAccount>,
    instructors: HashMap<Uuid, Instructor>,
    plans: HashMap<Uuid, Plan>,
    audit: Vec<AuditEntry>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    fail_audit_writes: Arc<AtomicBool>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    pub fn insert_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: AdminRole,
    ) -> AdminAccount {
        let account = AdminAccount {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password_with_cost(password, TEST_BCRYPT_COST)
                .unwrap_or_default(),
            role,
            is_active: true,
        };
        self.lock().admins.push(account.clone());
        account
    }

    pub fn deactivate_admin(&self, id: Uuid) {
        if let Some(admin) = self.lock().admins.iter_mut().find(|a| a.id == id) {
            admin.is_active = false;
        }
    }

    pub fn insert_user(&self, name: &str, email: &str, password: &str, role: AppRole) -> UserAccount {
        let account = UserAccount {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password_with_cost(password, TEST_BCRYPT_COST)
                .unwrap_or_default(),
            role,
        };
        self.lock().users.push(account.clone());
        account
    }

    pub fn insert_instructor(&self, name: &str, status: InstructorStatus) -> Instructor {
        let instructor = Instructor {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            status,
            updated_at: Utc::now(),
        };
        self.lock()
            .instructors
            .insert(instructor.id, instructor.clone());
        instructor
    }

    pub fn instructor(&self, id: Uuid) -> Option<Instructor> {
        self.lock().instructors.get(&id).cloned()
    }

    pub fn insert_plan(&self, name: &str, price_cents: i64, duration_days: i32) -> Plan {
        let now = Utc::now();
        let plan = Plan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price_cents,
            duration_days,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.lock().plans.insert(plan.id, plan.clone());
        plan
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.lock().plans.values().cloned().collect()
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.lock().audit.clone()
    }

    /// Makes every subsequent audit append fail, as if the connection was lost.
    pub fn fail_audit_writes(&self, fail: bool) {
        self.fail_audit_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<AdminAccount>> {
        Ok(self
            .lock()
            .admins
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl InstructorStore for MemoryStore {
    async fn find_instructor(&self, id: Uuid) -> StoreResult<Option<Instructor>> {
        Ok(self.instructor(id))
    }
}

#[async_trait]
impl WriteStore for MemoryStore {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>> {
        Ok(Box::new(MemoryTx {
            inner: self.inner.clone(),
            fail_audit_writes: self.fail_audit_writes.clone(),
            instructors: HashMap::new(),
            plans: HashMap::new(),
            audit: Vec::new(),
        }))
    }
}

/// Buffers writes and applies them under one lock on commit.
struct MemoryTx {
    inner: Arc<Mutex<Inner>>,
    fail_audit_writes: Arc<AtomicBool>,
    instructors: HashMap<Uuid, Instructor>,
    plans: HashMap<Uuid, Plan>,
    audit: Vec<AuditEntry>,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn transition_instructor(
        &mut self,
        id: Uuid,
        from: InstructorStatus,
        to: InstructorStatus,
    ) -> StoreResult<Option<Instructor>> {
        let current = match self.instructors.get(&id) {
            Some(staged) => Some(staged.clone()),
            None => lock(&self.inner).instructors.get(&id).cloned(),
        };

        match current {
            Some(mut instructor) if instructor.status == from => {
                instructor.status = to;
                instructor.updated_at = Utc::now();
                self.instructors.insert(id, instructor.clone());
                Ok(Some(instructor))
            }
            _ => Ok(None),
        }
    }

    async fn create_plan(&mut self, dto: &CreatePlanDto) -> StoreResult<Plan> {
        let now = Utc::now();
        let plan = Plan {
            id: Uuid::new_v4(),
            name: dto.name.clone(),
            price_cents: dto.price_cents,
            duration_days: dto.duration_days,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update_plan(&mut self, id: Uuid, dto: &UpdatePlanDto) -> StoreResult<Option<Plan>> {
        let current = match self.plans.get(&id) {
            Some(staged) => Some(staged.clone()),
            None => lock(&self.inner).plans.get(&id).cloned(),
        };

        Ok(current.map(|mut plan| {
            dto.apply(&mut plan);
            plan.updated_at = Utc::now();
            self.plans.insert(id, plan.clone());
            plan
        }))
    }

    async fn append_audit(&mut self, entry: NewAuditEntry) -> StoreResult<AuditEntry> {
        if self.fail_audit_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }

        let entry = AuditEntry {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            metadata: entry.metadata,
            created_at: Utc::now(),
        };
        self.audit.push(entry.clone());
        Ok(entry)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let MemoryTx {
            inner,
            instructors,
            plans,
            audit,
            ..
        } = *self;

        let mut inner = lock(&inner);
        inner.instructors.extend(instructors);
        inner.plans.extend(plans);
        inner.audit.extend(audit);
        Ok(())
    }
}

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SESSION_SECRET.to_string(),
        expiry: 86_400,
        cookie_name: "admin-session".to_string(),
        secure: false,
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        expiry: 86_400,
    }
}

pub fn test_cors_config() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// Application state over `store` with fixed test secrets and no metrics.
pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(
        store,
        test_session_config(),
        &test_jwt_config(),
        test_cors_config(),
    )
}
