//! Session modes, status and the persisted snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rc_core::HistoryLog;

use crate::config::Settings;

/// The active roll-call mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Walk the roster in order, one announced name at a time.
    Sequence,
    /// One random name after a suspense animation.
    Random,
    /// Several distinct random names, revealed one by one.
    Quick,
    /// Like random, recorded as a classroom question.
    #[default]
    Question,
    /// A spoken countdown.
    Timer,
}

impl Mode {
    /// All modes in tab order.
    pub const ALL: [Mode; 5] = [
        Mode::Sequence,
        Mode::Random,
        Mode::Quick,
        Mode::Question,
        Mode::Timer,
    ];

    /// Stable lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sequence => "sequence",
            Mode::Random => "random",
            Mode::Quick => "quick",
            Mode::Question => "question",
            Mode::Timer => "timer",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Sequence => "顺序点名",
            Mode::Random => "随机点名",
            Mode::Quick => "快速连抽",
            Mode::Question => "上课提问",
            Mode::Timer => "计时器",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised mode name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown mode: {0} (expected sequence, random, quick, question or timer)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequence" | "seq" | "顺序" | "顺序点名" => Ok(Mode::Sequence),
            "random" | "rand" | "随机" | "随机点名" => Ok(Mode::Random),
            "quick" | "batch" | "快速" | "快速连抽" => Ok(Mode::Quick),
            "question" | "ask" | "提问" | "上课提问" => Ok(Mode::Question),
            "timer" | "计时" | "计时器" => Ok(Mode::Timer),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Coarse lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No cycle in progress.
    Idle,
    /// A cycle of the given mode is in progress.
    Running(Mode),
    /// A paused cycle of the given mode. Only sequences pause; they resume
    /// at the interrupted name.
    Paused(Mode),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => f.write_str("idle"),
            Status::Running(mode) => write!(f, "running ({mode})"),
            Status::Paused(mode) => write!(f, "paused ({mode})"),
        }
    }
}

/// Read-only view of the session's mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Active mode.
    pub mode: Mode,
    /// Whether a cycle is in progress.
    pub running: bool,
    /// Round-robin cursor.
    pub cursor: usize,
    /// Seconds left on the countdown.
    pub remaining_time: u32,
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Roster names in order.
    pub students: Vec<String>,
    /// Call history, newest first.
    pub history: HistoryLog,
    /// Per-name weights.
    pub weights: BTreeMap<String, f64>,
    /// User settings.
    pub settings: Settings,
    /// Round-robin cursor.
    pub cursor: usize,
}
