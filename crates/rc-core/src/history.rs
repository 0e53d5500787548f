//! Call history: a newest-first log of past selections.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of records kept. Older records are dropped on append.
pub const HISTORY_CAPACITY: usize = 100;

/// How a name came to be called. Serialised as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    /// Round-robin through the roster.
    #[serde(rename = "顺序点名")]
    Sequence,
    /// Single uniform draw.
    #[serde(rename = "随机点名")]
    Random,
    /// Several distinct names drawn at once.
    #[serde(rename = "快速连抽")]
    Quick,
    /// Single uniform draw for a classroom question.
    #[serde(rename = "上课提问")]
    Question,
    /// A name called out by hand.
    #[serde(rename = "手动叫号")]
    Manual,
}

impl CallKind {
    /// The label shown in history listings and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sequence => "顺序点名",
            Self::Random => "随机点名",
            Self::Quick => "快速连抽",
            Self::Question => "上课提问",
            Self::Manual => "手动叫号",
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One past selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The name that was called.
    pub name: String,
    /// How it was called.
    pub mode: CallKind,
    /// When it was called.
    pub timestamp: DateTime<Utc>,
}

/// Newest-first log of selections, capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: VecDeque<HistoryRecord>,
}

// Loaded logs go through `from_records` so the cap holds for files too.
impl<'de> Deserialize<'de> for HistoryLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<HistoryRecord>::deserialize(deserializer).map(Self::from_records)
    }
}

impl HistoryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted records (newest first).
    pub fn from_records(records: impl IntoIterator<Item = HistoryRecord>) -> Self {
        let mut records: VecDeque<_> = records.into_iter().collect();
        records.truncate(HISTORY_CAPACITY);
        Self { records }
    }

    /// Record a call made now.
    pub fn append(&mut self, name: impl Into<String>, mode: CallKind) {
        self.append_at(name, mode, Utc::now());
    }

    /// Record a call with an explicit timestamp.
    pub fn append_at(&mut self, name: impl Into<String>, mode: CallKind, timestamp: DateTime<Utc>) {
        self.records.push_front(HistoryRecord {
            name: name.into(),
            mode,
            timestamp,
        });
        self.records.truncate(HISTORY_CAPACITY);
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// How many times a name has been called (within the retained window).
    pub fn count_for(&self, name: &str) -> usize {
        self.records.iter().filter(|r| r.name == name).count()
    }

    /// Records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.front()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
