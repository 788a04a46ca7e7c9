//! Geofence watch lifecycle manager.
//!
//! # Responsibility
//! - Register and deregister watches with the monitoring service, routed
//!   through one shared callback token.
//! - Track the conceptual per-watch phase while the provider stays the
//!   source of truth.
//! - Consume inbound enter-region events and resolve them to reminders.
//!
//! # Invariants
//! - Register/deregister never block the caller; outcomes are forwarded on
//!   the outcome channel and logged, with no automatic retry.
//! - Re-registering reuses the current token; `replace_token` overwrites the
//!   shared token rather than adding a second one.
//! - A provider rejection never rolls back an already-saved reminder.

use crate::geofence::descriptor::{GeofenceDescriptor, TransitionType};
use crate::geofence::provider::GeofencingProvider;
use crate::model::reminder::Reminder;
use crate::store::ReminderDataSource;
use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Opaque handle the monitoring service uses to route events back and to
/// allow coarse-grained bulk cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackToken(u64);

impl CallbackToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Conceptual lifecycle of one watch. The provider owns the real state; this
/// mirror exists for observability and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchPhase {
    Unregistered,
    Pending,
    Active,
    Rejected,
    Fired,
}

/// Asynchronous outcome of a register/deregister submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    Registered { id: String },
    RegistrationRejected { id: String, message: String },
    Deregistered,
    DeregistrationRejected { message: String },
}

/// Enter-region notification delivered by the monitoring service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeofenceEvent {
    /// Triggered geofence ids; each equals a reminder id.
    pub ids: Vec<String>,
    pub transition: TransitionType,
}

/// A reminder whose watch region was entered, ready for notification
/// dispatch (presentation is outside this crate).
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderAlert {
    pub reminder: Reminder,
}

type PhaseMap = Arc<Mutex<HashMap<String, WatchPhase>>>;

/// Owns the shared callback token and the conceptual watch phases.
pub struct GeofenceManager {
    provider: Arc<dyn GeofencingProvider>,
    token: Mutex<CallbackToken>,
    token_seq: AtomicU64,
    phases: PhaseMap,
    outcomes_tx: mpsc::UnboundedSender<WatchOutcome>,
}

impl GeofenceManager {
    /// Creates a manager around `provider`, returning the receiver half of
    /// the outcome channel.
    pub fn new(
        provider: Arc<dyn GeofencingProvider>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<WatchOutcome>) {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let manager = Arc::new(Self {
            provider,
            token: Mutex::new(CallbackToken(1)),
            token_seq: AtomicU64::new(1),
            phases: Arc::new(Mutex::new(HashMap::new())),
            outcomes_tx,
        });
        (manager, outcomes_rx)
    }

    /// Returns the shared token all registrations are currently routed
    /// through.
    pub fn callback_token(&self) -> CallbackToken {
        *self.token.lock().expect("token lock poisoned")
    }

    /// Mints a fresh token and overwrites the shared one.
    ///
    /// Watches registered under the previous token can no longer be cancelled
    /// through this manager; callers deregister first when that matters.
    pub fn replace_token(&self) -> CallbackToken {
        let next = CallbackToken(self.token_seq.fetch_add(1, Ordering::SeqCst) + 1);
        *self.token.lock().expect("token lock poisoned") = next;
        info!(
            "event=token_replace module=geofence status=ok token={}",
            next.value()
        );
        next
    }

    /// Returns the conceptual phase for `id`.
    pub fn watch_phase(&self, id: &str) -> WatchPhase {
        self.phases
            .lock()
            .expect("phase lock poisoned")
            .get(id)
            .copied()
            .unwrap_or(WatchPhase::Unregistered)
    }

    /// Submits one watch registration and returns immediately.
    ///
    /// The provider's accept/reject arrives later on the outcome channel; a
    /// rejection is logged with the fixed provider message and never retried.
    pub fn register_watch(&self, descriptor: GeofenceDescriptor) {
        let token = self.callback_token();
        set_phase(&self.phases, &descriptor.id, WatchPhase::Pending);
        info!(
            "event=watch_register module=geofence status=start id={} token={}",
            descriptor.id,
            token.value()
        );

        let provider = Arc::clone(&self.provider);
        let phases = Arc::clone(&self.phases);
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let id = descriptor.id.clone();
            match provider.add_geofences(&[descriptor], token).await {
                Ok(()) => {
                    set_phase(&phases, &id, WatchPhase::Active);
                    info!("event=watch_register module=geofence status=ok id={id}");
                    let _ = outcomes.send(WatchOutcome::Registered { id });
                }
                Err(err) => {
                    set_phase(&phases, &id, WatchPhase::Rejected);
                    error!(
                        "event=watch_register module=geofence status=error id={id} error={}",
                        err.message()
                    );
                    let _ = outcomes.send(WatchOutcome::RegistrationRejected {
                        id,
                        message: err.message().to_string(),
                    });
                }
            }
        });
    }

    /// Cancels every watch routed through the shared token and returns
    /// immediately.
    pub fn deregister_watches(&self) {
        let token = self.callback_token();
        info!(
            "event=watch_deregister module=geofence status=start token={}",
            token.value()
        );

        let provider = Arc::clone(&self.provider);
        let phases = Arc::clone(&self.phases);
        let outcomes = self.outcomes_tx.clone();
        tokio::spawn(async move {
            match provider.remove_geofences(token).await {
                Ok(()) => {
                    phases.lock().expect("phase lock poisoned").clear();
                    info!("event=watch_deregister module=geofence status=ok");
                    let _ = outcomes.send(WatchOutcome::Deregistered);
                }
                Err(err) => {
                    error!(
                        "event=watch_deregister module=geofence status=error error={}",
                        err.message()
                    );
                    let _ = outcomes.send(WatchOutcome::DeregistrationRejected {
                        message: err.message().to_string(),
                    });
                }
            }
        });
    }

    /// Consumer loop for inbound provider events.
    ///
    /// Each enter event resolves its geofence ids through the data-source
    /// port and forwards the matching reminders on `alerts`. Non-enter
    /// transitions and unresolvable ids are logged and skipped. The loop ends
    /// when the event sender is dropped.
    pub async fn run_event_loop(
        self: Arc<Self>,
        mut events: mpsc::UnboundedReceiver<GeofenceEvent>,
        store: Arc<dyn ReminderDataSource>,
        alerts: mpsc::UnboundedSender<ReminderAlert>,
    ) {
        while let Some(event) = events.recv().await {
            if event.transition != TransitionType::Enter {
                warn!(
                    "event=geofence_event module=geofence status=skipped transition={:?}",
                    event.transition
                );
                continue;
            }

            for id in event.ids {
                match store.get_reminder(&id).await {
                    Ok(reminder) => {
                        set_phase(&self.phases, &id, WatchPhase::Fired);
                        info!("event=geofence_event module=geofence status=ok id={id}");
                        let _ = alerts.send(ReminderAlert { reminder });
                    }
                    Err(err) => {
                        warn!(
                            "event=geofence_event module=geofence status=unresolved id={id} error={err}"
                        );
                    }
                }
            }
        }
    }
}

fn set_phase(phases: &PhaseMap, id: &str, phase: WatchPhase) {
    phases
        .lock()
        .expect("phase lock poisoned")
        .insert(id.to_string(), phase);
}
