//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `georemind_core` linkage.
//! - Bootstrap file logging before touching storage.
//! - Keep output deterministic for quick local sanity checks.

use georemind_core::{
    default_log_level, init_logging, LocalReminderStore, Reminder, ReminderDataSource,
    ReminderListController,
};
use std::path::PathBuf;
use std::sync::Arc;

const LOG_DIR_ENV: &str = "GEOREMIND_LOG_DIR";

/// Log directory for this run: `GEOREMIND_LOG_DIR` when set and non-blank,
/// otherwise a per-user path under the system temp directory.
fn resolve_log_dir() -> PathBuf {
    match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => std::env::temp_dir().join("georemind").join("logs"),
    }
}

fn main() {
    let log_dir = resolve_log_dir();
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }

    println!("georemind_core version={}", georemind_core::core_version());
    println!("georemind_core log_dir={}", log_dir.display());

    // Drive one save/list round-trip against an in-memory database to verify
    // that the storage and controller wiring link correctly.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime build should succeed");

    runtime.block_on(async {
        let conn = georemind_core::db::open_db_in_memory().expect("in-memory db should open");
        let store: Arc<dyn ReminderDataSource> = Arc::new(LocalReminderStore::new(conn));

        let probe = Reminder::new(
            Some("smoke".to_string()),
            Some("cli probe".to_string()),
            Some("nowhere".to_string()),
            Some(0.0),
            Some(0.0),
        );
        store
            .save_reminder(&probe)
            .await
            .expect("probe save should succeed");

        let list = ReminderListController::new(store);
        list.load_reminders().await;
        println!("georemind_core reminders={}", list.reminders().borrow().len());
    });
}
