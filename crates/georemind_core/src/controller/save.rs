//! Save orchestration: validation, persistence, geofence registration.
//!
//! # Responsibility
//! - Gate saves behind draft validation with a fixed check order.
//! - Drive the loading flag around the async persistence call.
//! - Trigger watch registration only after persistence completes.
//!
//! # Invariants
//! - Validation short-circuits: only the first violation is surfaced and
//!   nothing is persisted.
//! - A saved reminder with a failed registration stays persisted; there is
//!   no compensating rollback.

use crate::geofence::descriptor::{GeoPoint, GeofenceDescriptor};
use crate::geofence::manager::GeofenceManager;
use crate::model::reminder::{Reminder, ReminderDraft};
use crate::store::ReminderDataSource;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::watch;

/// Toast text surfaced after a successful save.
pub const REMINDER_SAVED_MESSAGE: &str = "Reminder Saved !";

/// Draft rejection reasons, surfaced in this exact precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter title")]
    MissingTitle,
    #[error("Please enter description")]
    MissingDescription,
    #[error("Please select location")]
    MissingLocation,
}

/// Checks a draft for completeness.
///
/// Check order is significant: title emptiness is reported before description
/// emptiness, which is reported before a missing location.
pub fn validate_draft(draft: &ReminderDraft) -> Result<(), ValidationError> {
    if is_blank(draft.title.as_deref()) {
        return Err(ValidationError::MissingTitle);
    }
    if is_blank(draft.description.as_deref()) {
        return Err(ValidationError::MissingDescription);
    }
    if is_blank(draft.location.as_deref()) || draft.latitude.is_none() || draft.longitude.is_none()
    {
        return Err(ValidationError::MissingLocation);
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

/// Controller behind the save screen.
///
/// Observable state is exposed as `watch` receivers; only the controller
/// mutates the sending halves.
pub struct SaveReminderController {
    store: Arc<dyn ReminderDataSource>,
    geofences: Arc<GeofenceManager>,
    loading_tx: watch::Sender<bool>,
    message_tx: watch::Sender<Option<String>>,
}

impl SaveReminderController {
    pub fn new(store: Arc<dyn ReminderDataSource>, geofences: Arc<GeofenceManager>) -> Self {
        let (loading_tx, _) = watch::channel(false);
        let (message_tx, _) = watch::channel(None);
        Self {
            store,
            geofences,
            loading_tx,
            message_tx,
        }
    }

    /// Observable loading flag.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Observable user-facing message (validation failure, save toast, or
    /// store error).
    pub fn message(&self) -> watch::Receiver<Option<String>> {
        self.message_tx.subscribe()
    }

    /// Validates `draft`, surfacing the first violation as the visible
    /// message. Persists nothing on failure.
    pub fn validate(&self, draft: &ReminderDraft) -> Result<(), ValidationError> {
        match validate_draft(draft) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.message_tx.send_replace(Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Validates and then saves, mirroring the single submit action.
    pub async fn validate_and_save(&self, draft: ReminderDraft) -> Option<Reminder> {
        self.validate(&draft).ok()?;
        self.save_reminder(draft).await
    }

    /// Persists `draft`, assigning a generated id when absent.
    ///
    /// The loading flag is true for the duration of the store call and
    /// cleared exactly once on completion. Geofence registration fires only
    /// after a successful persistence call, using the saved coordinates.
    pub async fn save_reminder(&self, draft: ReminderDraft) -> Option<Reminder> {
        let reminder = draft.into_reminder();

        self.loading_tx.send_replace(true);
        let saved = self.store.save_reminder(&reminder).await;
        self.loading_tx.send_replace(false);

        match saved {
            Ok(()) => {
                info!(
                    "event=reminder_save module=controller status=ok id={}",
                    reminder.id
                );
                self.message_tx
                    .send_replace(Some(REMINDER_SAVED_MESSAGE.to_string()));
                self.register_geofence(&reminder);
                Some(reminder)
            }
            Err(err) => {
                warn!(
                    "event=reminder_save module=controller status=error id={} error={err}",
                    reminder.id
                );
                self.message_tx.send_replace(Some(err.to_string()));
                None
            }
        }
    }

    /// Clears observable message state when the screen is torn down.
    pub fn on_clear(&self) {
        self.message_tx.send_replace(None);
    }

    fn register_geofence(&self, reminder: &Reminder) {
        if let (Some(latitude), Some(longitude)) = (reminder.latitude, reminder.longitude) {
            let center = GeoPoint {
                latitude,
                longitude,
            };
            self.geofences
                .register_watch(GeofenceDescriptor::for_reminder(reminder.id.clone(), center));
        } else {
            // A validated draft always carries coordinates; a direct save of a
            // partial record stays unmonitored.
            warn!(
                "event=reminder_save module=controller status=unmonitored id={}",
                reminder.id
            );
        }
    }
}
