use async_trait::async_trait;
use georemind_core::{
    CallbackToken, GeofenceDescriptor, GeofenceManager, GeofencingProvider, InMemoryReminderStore,
    ProviderError, ReminderDataSource, ReminderDraft, SaveReminderController, TransitionType,
    ValidationError, WatchOutcome, REMINDER_SAVED_MESSAGE, GEOFENCE_RADIUS_METERS,
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Default)]
struct RecordingProvider {
    added: Mutex<Vec<(Vec<GeofenceDescriptor>, CallbackToken)>>,
}

impl RecordingProvider {
    fn added(&self) -> Vec<(Vec<GeofenceDescriptor>, CallbackToken)> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeofencingProvider for RecordingProvider {
    async fn add_geofences(
        &self,
        descriptors: &[GeofenceDescriptor],
        token: CallbackToken,
    ) -> Result<(), ProviderError> {
        self.added
            .lock()
            .unwrap()
            .push((descriptors.to_vec(), token));
        Ok(())
    }

    async fn remove_geofences(&self, _token: CallbackToken) -> Result<(), ProviderError> {
        Ok(())
    }
}

fn valid_draft() -> ReminderDraft {
    ReminderDraft {
        id: None,
        title: Some("Title1".to_string()),
        description: Some("Description1".to_string()),
        location: Some("location1".to_string()),
        latitude: Some(32.1),
        longitude: Some(32.1),
    }
}

struct Harness {
    store: Arc<InMemoryReminderStore>,
    provider: Arc<RecordingProvider>,
    controller: Arc<SaveReminderController>,
    outcomes: tokio::sync::mpsc::UnboundedReceiver<WatchOutcome>,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryReminderStore::new());
    let provider = Arc::new(RecordingProvider::default());
    let (manager, outcomes) = GeofenceManager::new(provider.clone());
    let controller = Arc::new(SaveReminderController::new(store.clone(), manager));
    Harness {
        store,
        provider,
        controller,
        outcomes,
    }
}

#[tokio::test]
async fn validation_reports_title_first_for_fully_empty_draft() {
    let h = harness();

    let draft = ReminderDraft {
        latitude: Some(32.1),
        longitude: Some(32.1),
        ..ReminderDraft::default()
    };

    let err = h.controller.validate(&draft).unwrap_err();
    assert_eq!(err, ValidationError::MissingTitle);
    assert_eq!(
        h.controller.message().borrow().as_deref(),
        Some("Please enter title")
    );
}

#[tokio::test]
async fn validation_order_is_title_then_description_then_location() {
    let h = harness();

    let mut draft = ReminderDraft::default();
    assert_eq!(
        h.controller.validate(&draft).unwrap_err(),
        ValidationError::MissingTitle
    );

    draft.title = Some("Title1".to_string());
    assert_eq!(
        h.controller.validate(&draft).unwrap_err(),
        ValidationError::MissingDescription
    );

    draft.description = Some("Description1".to_string());
    assert_eq!(
        h.controller.validate(&draft).unwrap_err(),
        ValidationError::MissingLocation
    );

    draft.location = Some("location1".to_string());
    assert_eq!(
        h.controller.validate(&draft).unwrap_err(),
        ValidationError::MissingLocation
    );

    draft.latitude = Some(32.1);
    draft.longitude = Some(32.1);
    assert!(h.controller.validate(&draft).is_ok());
}

#[tokio::test]
async fn blank_text_counts_as_missing() {
    let h = harness();

    let draft = ReminderDraft {
        title: Some("   ".to_string()),
        ..valid_draft()
    };
    assert_eq!(
        h.controller.validate(&draft).unwrap_err(),
        ValidationError::MissingTitle
    );
}

#[tokio::test]
async fn validation_failure_persists_nothing_and_registers_nothing() {
    let mut h = harness();

    let saved = h.controller.validate_and_save(ReminderDraft::default()).await;
    assert!(saved.is_none());
    assert!(h.store.get_reminders().await.unwrap().is_empty());
    assert!(h.provider.added().is_empty());
    assert!(h.outcomes.try_recv().is_err());
}

#[tokio::test]
async fn save_assigns_id_persists_and_registers_watch() {
    let mut h = harness();

    let saved = h
        .controller
        .validate_and_save(valid_draft())
        .await
        .expect("valid draft should save");
    assert!(!saved.id.is_empty());

    let stored = h.store.get_reminder(&saved.id).await.unwrap();
    assert_eq!(stored, saved);
    assert_eq!(
        h.controller.message().borrow().as_deref(),
        Some(REMINDER_SAVED_MESSAGE)
    );

    // Registration is fire-and-forget; the outcome channel tells us when the
    // provider call has landed.
    let outcome = h.outcomes.recv().await.unwrap();
    assert_eq!(
        outcome,
        WatchOutcome::Registered {
            id: saved.id.clone()
        }
    );

    let added = h.provider.added();
    assert_eq!(added.len(), 1);
    let (descriptors, _token) = &added[0];
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].id, saved.id);
    assert_eq!(descriptors[0].center.latitude, 32.1);
    assert_eq!(descriptors[0].center.longitude, 32.1);
    assert_eq!(descriptors[0].radius_meters, GEOFENCE_RADIUS_METERS);
    assert_eq!(descriptors[0].transition, TransitionType::Enter);
}

#[tokio::test]
async fn store_error_surfaces_message_and_skips_registration() {
    let mut h = harness();
    h.store.set_unavailable(true);

    let saved = h.controller.validate_and_save(valid_draft()).await;
    assert!(saved.is_none());

    let message = h.controller.message().borrow().clone().unwrap();
    assert!(message.contains("Test exception"));
    assert!(h.provider.added().is_empty());
    assert!(h.outcomes.try_recv().is_err());
}

#[tokio::test]
async fn loading_flag_is_set_during_save_and_cleared_once() {
    let h = harness();
    let gate = Arc::new(Notify::new());
    h.store.hold_calls(gate.clone()).await;

    let mut loading = h.controller.loading();
    assert!(!*loading.borrow_and_update());

    let controller = h.controller.clone();
    let save = tokio::spawn(async move { controller.save_reminder(valid_draft()).await });

    loading.changed().await.unwrap();
    assert!(*loading.borrow_and_update(), "loading must be observable while the call is in flight");

    gate.notify_one();
    let saved = save.await.unwrap();
    assert!(saved.is_some());

    loading.changed().await.unwrap();
    assert!(!*loading.borrow_and_update());
    assert!(
        !loading.has_changed().unwrap(),
        "loading must clear exactly once"
    );
}

#[tokio::test]
async fn loading_flag_clears_on_error_outcome_too() {
    let h = harness();
    let gate = Arc::new(Notify::new());
    h.store.hold_calls(gate.clone()).await;
    h.store.set_unavailable(true);

    let mut loading = h.controller.loading();
    let controller = h.controller.clone();
    let save = tokio::spawn(async move { controller.save_reminder(valid_draft()).await });

    loading.changed().await.unwrap();
    assert!(*loading.borrow_and_update());

    gate.notify_one();
    let saved = save.await.unwrap();
    assert!(saved.is_none());

    loading.changed().await.unwrap();
    assert!(!*loading.borrow_and_update());
    assert!(!loading.has_changed().unwrap());
}

#[tokio::test]
async fn on_clear_resets_message_state() {
    let h = harness();

    h.controller.validate(&ReminderDraft::default()).unwrap_err();
    assert!(h.controller.message().borrow().is_some());

    h.controller.on_clear();
    assert!(h.controller.message().borrow().is_none());
}
