//! Core types for Rollcall: the class roster, the call history, and the
//! selection policies that pick names from the roster.
//!
//! Nothing in this crate knows about timing, speech or rendering. The
//! session state machine in `rc-session` composes these pieces.

/// Error types used throughout the workspace.
pub mod error;
/// Plain-text export of the roster and the call history.
pub mod export;
/// Newest-first call history capped at 100 records.
pub mod history;
/// The ordered, deduplicated roster and its weights.
pub mod roster;
/// Round-robin and uniform random selection policies.
pub mod selection;

/// Re-export error types.
pub use error::{RcResult, RollCallError};
/// Re-export history types.
pub use history::{CallKind, HISTORY_CAPACITY, HistoryLog, HistoryRecord};
/// Re-export roster types.
pub use roster::Roster;
/// Re-export selection types.
pub use selection::{Picker, ScriptedPicker};
