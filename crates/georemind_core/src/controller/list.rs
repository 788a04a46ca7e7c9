//! Reminder list loading state machine.
//!
//! # Responsibility
//! - Load all reminders through the data-source port into observable state.
//!
//! # Invariants
//! - On error the visible list is left unchanged; only the message updates.
//! - The empty flag is true iff a successful load returned zero records.

use crate::model::reminder::Reminder;
use crate::store::ReminderDataSource;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Controller behind the reminder list screen.
pub struct ReminderListController {
    store: Arc<dyn ReminderDataSource>,
    loading_tx: watch::Sender<bool>,
    reminders_tx: watch::Sender<Vec<Reminder>>,
    empty_tx: watch::Sender<bool>,
    message_tx: watch::Sender<Option<String>>,
}

impl ReminderListController {
    pub fn new(store: Arc<dyn ReminderDataSource>) -> Self {
        let (loading_tx, _) = watch::channel(false);
        let (reminders_tx, _) = watch::channel(Vec::new());
        let (empty_tx, _) = watch::channel(true);
        let (message_tx, _) = watch::channel(None);
        Self {
            store,
            loading_tx,
            reminders_tx,
            empty_tx,
            message_tx,
        }
    }

    /// Observable loading flag.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Observable visible list.
    pub fn reminders(&self) -> watch::Receiver<Vec<Reminder>> {
        self.reminders_tx.subscribe()
    }

    /// Observable no-data flag: true iff the last successful load was empty.
    pub fn empty(&self) -> watch::Receiver<bool> {
        self.empty_tx.subscribe()
    }

    /// Observable error message from the last failed load.
    pub fn message(&self) -> watch::Receiver<Option<String>> {
        self.message_tx.subscribe()
    }

    /// Loads all reminders.
    ///
    /// The loading flag is true for the duration of the call and cleared
    /// exactly once in both outcomes.
    pub async fn load_reminders(&self) {
        self.loading_tx.send_replace(true);
        let loaded = self.store.get_reminders().await;
        self.loading_tx.send_replace(false);

        match loaded {
            Ok(reminders) => {
                info!(
                    "event=reminder_load module=controller status=ok count={}",
                    reminders.len()
                );
                self.empty_tx.send_replace(reminders.is_empty());
                self.reminders_tx.send_replace(reminders);
            }
            Err(err) => {
                warn!("event=reminder_load module=controller status=error error={err}");
                self.message_tx.send_replace(Some(err.to_string()));
            }
        }
    }
}
