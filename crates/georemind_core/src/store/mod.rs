//! Reminder data-source port and result envelope.
//!
//! # Responsibility
//! - Define the async CRUD contract consumed by controllers.
//! - Keep failure reporting inside the returned envelope; callers must match,
//!   never assume success.
//!
//! # Invariants
//! - `StoreError::NotFound` displays exactly `Reminder not found!`; consumers
//!   branch on that message, so the string is part of the contract.
//! - An empty store is a successful empty list, never an error.
//! - No implementation may convert an error outcome into a success.

use crate::model::reminder::Reminder;
use async_trait::async_trait;

mod local;
mod memory;

pub use local::LocalReminderStore;
pub use memory::InMemoryReminderStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure envelope for every data-source operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The requested id is absent. The display string is an observable
    /// contract; do not reword it.
    #[error("Reminder not found!")]
    NotFound,
    /// The underlying persistence layer is inaccessible.
    #[error("{0}")]
    Unavailable(String),
}

/// Async CRUD port over persisted reminders.
///
/// Backed interchangeably by [`LocalReminderStore`] (SQLite) or
/// [`InMemoryReminderStore`] (test double), selected by explicit construction.
/// Each call is atomic with respect to the record set it touches; there are no
/// partial-failure semantics.
#[async_trait]
pub trait ReminderDataSource: Send + Sync {
    /// Upserts by id: insert when the id is new, replace the whole record
    /// when it already exists.
    async fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()>;

    /// Returns all records in storage-defined order. An empty store yields
    /// `Ok` with an empty list.
    async fn get_reminders(&self) -> StoreResult<Vec<Reminder>>;

    /// Returns the record for `id`, or [`StoreError::NotFound`].
    async fn get_reminder(&self, id: &str) -> StoreResult<Reminder>;

    /// Unconditional physical wipe. Idempotent.
    async fn delete_all_reminders(&self) -> StoreResult<()>;
}
