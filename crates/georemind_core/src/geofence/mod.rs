//! Geofence descriptors, provider boundary, and watch lifecycle.
//!
//! # Responsibility
//! - Build provider-ready registration requests from saved reminders.
//! - Own the single shared callback token and the watch state machine.
//! - Reconcile enter-region events back into reminder alerts.
//!
//! # Invariants
//! - `geofence id == reminder id`; watches are never stored independently.
//! - Registration and deregistration are fire-and-return; outcomes arrive on
//!   a channel, never as a blocking result.

pub mod descriptor;
pub mod manager;
pub mod provider;

pub use descriptor::{GeoPoint, GeofenceDescriptor, TransitionType, GEOFENCE_RADIUS_METERS};
pub use manager::{
    CallbackToken, GeofenceEvent, GeofenceManager, ReminderAlert, WatchOutcome, WatchPhase,
};
pub use provider::{GeofencingProvider, ProviderError, ProviderErrorCode};
