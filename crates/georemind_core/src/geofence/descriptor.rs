//! Provider-ready geofence registration requests.
//!
//! # Responsibility
//! - Pure transformation from (id, center, radius, transition) into the
//!   request shape submitted to the monitoring service.
//!
//! # Invariants
//! - Building a descriptor performs no I/O and is deterministic.

use serde::{Deserialize, Serialize};

/// Circular watch radius used for every reminder, in meters.
pub const GEOFENCE_RADIUS_METERS: f32 = 100.0;

/// Geographic center of a watch region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Region transition the monitoring service should report.
///
/// The product path only registers for `Enter`; the other variants exist so
/// inbound provider events can be classified and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    Enter,
    Exit,
    Dwell,
}

/// One registration request for the external monitoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceDescriptor {
    /// Matches the owning reminder's id.
    pub id: String,
    pub center: GeoPoint,
    pub radius_meters: f32,
    pub transition: TransitionType,
}

impl GeofenceDescriptor {
    /// Builds a descriptor. Same inputs always produce an equal descriptor.
    pub fn build(
        id: impl Into<String>,
        center: GeoPoint,
        radius_meters: f32,
        transition: TransitionType,
    ) -> Self {
        Self {
            id: id.into(),
            center,
            radius_meters,
            transition,
        }
    }

    /// Builds the standard enter-watch descriptor used for saved reminders.
    pub fn for_reminder(id: impl Into<String>, center: GeoPoint) -> Self {
        Self::build(id, center, GEOFENCE_RADIUS_METERS, TransitionType::Enter)
    }
}
