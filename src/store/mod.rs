//! Data access seams.
//!
//! Handlers and services depend on these traits, never on a concrete pool.
//! [`PgStore`] implements all of them over Postgres; the in-memory store in
//! [`crate::testing`] backs the integration tests.

mod postgres;

pub use postgres::PgStore;

use async_trait::async_trait;
use autoescola_models::{
    AdminAccount, AuditEntry, CreatePlanDto, Instructor, InstructorStatus, NewAuditEntry, Plan,
    UpdatePlanDto, UserAccount,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value the domain types cannot represent.
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<AdminAccount>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>>;
}

#[async_trait]
pub trait InstructorStore: Send + Sync {
    async fn find_instructor(&self, id: Uuid) -> StoreResult<Option<Instructor>>;
}

/// Opens units of work for privileged mutations.
#[async_trait]
pub trait WriteStore: Send + Sync {
    async fn begin(&self) -> StoreResult<Box<dyn StoreTx>>;
}

/// One unit of work.
///
/// Writes made through it become visible together on [`StoreTx::commit`].
/// Dropping it without committing discards all of them.
#[async_trait]
pub trait StoreTx: Send {
    /// Moves the instructor to `to` only if its status is still `from`.
    ///
    /// Returns `None` when the instructor does not exist or its status changed
    /// since it was read.
    async fn transition_instructor(
        &mut self,
        id: Uuid,
        from: InstructorStatus,
        to: InstructorStatus,
    ) -> StoreResult<Option<Instructor>>;

    async fn create_plan(&mut self, dto: &CreatePlanDto) -> StoreResult<Plan>;

    /// Applies the present fields. `None` when the plan does not exist.
    async fn update_plan(&mut self, id: Uuid, dto: &UpdatePlanDto) -> StoreResult<Option<Plan>>;

    /// Appends one entry. Entries are never updated or deleted.
    async fn append_audit(&mut self, entry: NewAuditEntry) -> StoreResult<AuditEntry>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}

/// Every store the application needs, implemented by one backend.
pub trait Store: AdminStore + UserStore + InstructorStore + WriteStore {}

impl<T> Store for T where T: AdminStore + UserStore + InstructorStore + WriteStore {}
