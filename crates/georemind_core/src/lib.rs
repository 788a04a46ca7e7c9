//! Core domain logic for location-bound reminders.
//! This crate is the single source of truth for data and event correctness:
//! the persisted reminder store and the geofence watch lifecycle.

pub mod controller;
pub mod db;
pub mod geofence;
pub mod logging;
pub mod model;
pub mod store;

pub use controller::list::ReminderListController;
pub use controller::save::{
    validate_draft, SaveReminderController, ValidationError, REMINDER_SAVED_MESSAGE,
};
pub use geofence::{
    CallbackToken, GeoPoint, GeofenceDescriptor, GeofenceEvent, GeofenceManager,
    GeofencingProvider, ProviderError, ProviderErrorCode, ReminderAlert, TransitionType,
    WatchOutcome, WatchPhase, GEOFENCE_RADIUS_METERS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::reminder::{Reminder, ReminderDraft};
pub use store::{
    InMemoryReminderStore, LocalReminderStore, ReminderDataSource, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
