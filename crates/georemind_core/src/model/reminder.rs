//! Reminder record and draft types.
//!
//! # Responsibility
//! - Define the persisted reminder shape shared by storage and controllers.
//! - Provide id generation for newly created reminders.
//!
//! # Invariants
//! - `id` is assigned once and never changes for the lifetime of a record.
//! - All fields other than `id` are replace-on-save; there is no partial patch.
//! - Storage accepts partial records; completeness is a validation concern.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted reminder tied to a geographic point.
///
/// Every field except `id` is optional at the storage layer: a reminder can be
/// saved half-filled and is only required to be complete when the save
/// controller validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable global id, uuid-v4 text. Doubles as the geofence id.
    pub id: String,
    /// User-entered title.
    pub title: Option<String>,
    /// User-entered description.
    pub description: Option<String>,
    /// Human-readable place name shown for the picked location.
    pub location: Option<String>,
    /// Geographic center latitude. No bounds validation.
    pub latitude: Option<f64>,
    /// Geographic center longitude. No bounds validation.
    pub longitude: Option<f64>,
}

impl Reminder {
    /// Creates a reminder with a freshly generated id.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        location: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            id: generate_reminder_id(),
            title,
            description,
            location,
            latitude,
            longitude,
        }
    }
}

/// Controller-side input for a reminder about to be saved.
///
/// Identical to [`Reminder`] except the id may still be absent; the save
/// controller assigns one before persisting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ReminderDraft {
    /// Converts the draft into a persistable record, generating an id when
    /// the draft carries none.
    pub fn into_reminder(self) -> Reminder {
        Reminder {
            id: self.id.unwrap_or_else(generate_reminder_id),
            title: self.title,
            description: self.description,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<Reminder> for ReminderDraft {
    fn from(value: Reminder) -> Self {
        Self {
            id: Some(value.id),
            title: value.title,
            description: value.description,
            location: value.location,
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

/// Generates a new reminder id.
pub(crate) fn generate_reminder_id() -> String {
    Uuid::new_v4().to_string()
}
