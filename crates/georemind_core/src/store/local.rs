//! SQLite-backed reminder store.
//!
//! # Responsibility
//! - Provide the durable implementation of the reminder data-source port.
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Every operation runs on the blocking pool; callers only await.
//! - A call never exposes partial in-flight state; concurrent callers see
//!   either the previous or the new record set.

use crate::model::reminder::Reminder;
use crate::store::{ReminderDataSource, StoreError, StoreResult};
use async_trait::async_trait;
use log::{error, info};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    location,
    latitude,
    longitude
FROM reminders";

/// Durable reminder store over a migrated SQLite connection.
///
/// The connection is shared behind a mutex and each operation takes it for
/// the duration of one statement, which keeps calls single-writer without
/// exposing any read-modify-write locking to callers.
pub struct LocalReminderStore {
    conn: Arc<Mutex<Connection>>,
}

impl LocalReminderStore {
    /// Wraps an already-bootstrapped connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn run_blocking<T, F>(&self, op: &'static str, call: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let outcome = tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("reminder storage is poisoned".to_string()))?;
            call(&guard)
        })
        .await
        .map_err(|err| StoreError::Unavailable(format!("storage task failed: {err}")))?;

        match &outcome {
            Ok(_) => info!("event=store_call module=store status=ok op={op}"),
            Err(err) => {
                error!("event=store_call module=store status=error op={op} error={err}")
            }
        }
        outcome
    }
}

#[async_trait]
impl ReminderDataSource for LocalReminderStore {
    async fn save_reminder(&self, reminder: &Reminder) -> StoreResult<()> {
        let record = reminder.clone();
        self.run_blocking("save_reminder", move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO reminders (
                    id,
                    title,
                    description,
                    location,
                    latitude,
                    longitude
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    record.id,
                    record.title.as_deref(),
                    record.description.as_deref(),
                    record.location.as_deref(),
                    record.latitude,
                    record.longitude,
                ],
            )
            .map_err(sqlite_unavailable)?;
            Ok(())
        })
        .await
    }

    async fn get_reminders(&self) -> StoreResult<Vec<Reminder>> {
        self.run_blocking("get_reminders", |conn| {
            let mut stmt = conn
                .prepare(REMINDER_SELECT_SQL)
                .map_err(sqlite_unavailable)?;
            let mut rows = stmt.query([]).map_err(sqlite_unavailable)?;
            let mut reminders = Vec::new();

            while let Some(row) = rows.next().map_err(sqlite_unavailable)? {
                reminders.push(parse_reminder_row(row)?);
            }

            Ok(reminders)
        })
        .await
    }

    async fn get_reminder(&self, id: &str) -> StoreResult<Reminder> {
        let id = id.to_string();
        self.run_blocking("get_reminder", move |conn| {
            let mut stmt = conn
                .prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))
                .map_err(sqlite_unavailable)?;
            let mut rows = stmt.query(params![id]).map_err(sqlite_unavailable)?;

            match rows.next().map_err(sqlite_unavailable)? {
                Some(row) => parse_reminder_row(row),
                None => Err(StoreError::NotFound),
            }
        })
        .await
    }

    async fn delete_all_reminders(&self) -> StoreResult<()> {
        self.run_blocking("delete_all_reminders", |conn| {
            conn.execute("DELETE FROM reminders;", [])
                .map_err(sqlite_unavailable)?;
            Ok(())
        })
        .await
    }
}

fn parse_reminder_row(row: &Row<'_>) -> StoreResult<Reminder> {
    Ok(Reminder {
        id: row.get("id").map_err(sqlite_unavailable)?,
        title: row.get("title").map_err(sqlite_unavailable)?,
        description: row.get("description").map_err(sqlite_unavailable)?,
        location: row.get("location").map_err(sqlite_unavailable)?,
        latitude: row.get("latitude").map_err(sqlite_unavailable)?,
        longitude: row.get("longitude").map_err(sqlite_unavailable)?,
    })
}

fn sqlite_unavailable(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
