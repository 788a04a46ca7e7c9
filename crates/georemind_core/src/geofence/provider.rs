//! External location-monitoring service boundary.
//!
//! # Responsibility
//! - Define the async register/deregister contract the lifecycle manager
//!   submits watches through.
//! - Map provider rejection codes to the fixed human-readable strings.
//!
//! # Invariants
//! - Unrecognized rejection codes always read "unknown error".

use crate::geofence::descriptor::GeofenceDescriptor;
use crate::geofence::manager::CallbackToken;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection codes observed from the monitoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorCode {
    GeofenceNotAvailable,
    TooManyGeofences,
    TooManyPendingIntents,
    /// Any code outside the known table, kept for logging.
    Other(i32),
}

/// Rejection surfaced by the monitoring service for a register or deregister
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderError {
    pub code: ProviderErrorCode,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode) -> Self {
        Self { code }
    }

    /// Fixed code-to-message table. These strings are shown to users.
    pub fn message(&self) -> &'static str {
        match self.code {
            ProviderErrorCode::GeofenceNotAvailable => "Geofence not available",
            ProviderErrorCode::TooManyGeofences => "Too many geofences",
            ProviderErrorCode::TooManyPendingIntents => "Too many pending intents",
            ProviderErrorCode::Other(_) => "unknown error",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for ProviderError {}

/// Async boundary to the external location-monitoring service.
///
/// The service owns accepted watches; the manager keeps no authoritative copy.
/// All watches registered with one [`CallbackToken`] are cancelled together,
/// so selective removal is impossible with the current one-token design.
#[async_trait]
pub trait GeofencingProvider: Send + Sync {
    /// Submits watch registrations routed through `token`.
    async fn add_geofences(
        &self,
        descriptors: &[GeofenceDescriptor],
        token: CallbackToken,
    ) -> Result<(), ProviderError>;

    /// Cancels every watch routed through `token`.
    async fn remove_geofences(&self, token: CallbackToken) -> Result<(), ProviderError>;
}
