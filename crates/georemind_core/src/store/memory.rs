//! In-memory reminder store used as the test double for the data-source port.
//!
//! # Responsibility
//! - Mirror the storage contract without touching disk.
//! - Let tests force the storage-unavailable failure mode and hold calls
//!   in flight so observable controller state can be asserted mid-operation.

use crate::model::reminder::Reminder;
use crate::store::{ReminderDataSource, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Hash-map backed implementation of [`ReminderDataSource`].
///
/// Iteration order of the map is the "storage-defined" list order; callers
/// must not rely on it.
#[derive(Default)]
pub struct InMemoryReminderStore {
    records: Mutex<HashMap<String, Reminder>>,
    unavailable: AtomicBool,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl InMemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = Reminder>) -> Self {
        let store = Self::new();
        {
            let mut guard = store
                .records
                .try_lock()
                .expect("freshly built store is uncontended");
            for record in records {
                guard.insert(record.id.clone(), record);
            }
        }
        store
    }

    /// Forces every subsequent operation to fail with
    /// [`StoreError::Unavailable`] until switched back off.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes every subsequent operation wait on `gate` before completing.
    ///
    /// Tests use this to observe in-flight state (for example a loading flag)
    /// and then release the call with `gate.notify_one()`.
    pub async fn hold_calls(&self, gate: Arc<Notify>) {
        *self.gate.lock().await = Some(gate);
    }

    async fn checkpoint(&self) -> StoreResult<()> {
        let gate = self.gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "Test exception: reminders unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ReminderDataSource for InMemoryReminderStore {
    async fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()> {
        self.checkpoint().await?;
        self.records
            .lock()
            .await
            .insert(reminder.id.clone(), reminder.clone());
        Ok(())
    }

    async fn get_reminders(&self) -> StoreResult<Vec<Reminder>> {
        self.checkpoint().await?;
        Ok(self.records.lock().await.values().cloned().collect())
    }

    async fn get_reminder(&self, id: &str) -> StoreResult<Reminder> {
        self.checkpoint().await?;
        self.records
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_all_reminders(&self) -> StoreResult<()> {
        self.checkpoint().await?;
        self.records.lock().await.clear();
        Ok(())
    }
}
