//! Domain model for location-bound reminders.
//!
//! # Responsibility
//! - Define the canonical persisted record and the controller-facing draft.
//! - Keep one storage shape; partial records are legal until validation.
//!
//! # Invariants
//! - Every persisted reminder is identified by a stable string id.
//! - Deletion is physical; there are no tombstones.

pub mod reminder;
