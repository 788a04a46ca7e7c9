//! Save/list controller state machines.
//!
//! # Responsibility
//! - Orchestrate data-source calls into observable loading/list/message
//!   state consumed by a presentation layer.
//! - Validate drafts before any persistence attempt.
//!
//! # Invariants
//! - Controllers never panic on a store error; every failure becomes a
//!   visible message.
//! - The loading flag is set before an async call starts and cleared exactly
//!   once when it resolves, success or error alike.

pub mod list;
pub mod save;
