//! JSON persistence in a data directory.
//!
//! Four files, one per record: `students.json`, `history.json`,
//! `weights.json` and `settings.json`. A missing file means defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rc_core::HistoryLog;
use rc_session::{PersistedState, Settings};

const STUDENTS_FILE: &str = "students.json";
const HISTORY_FILE: &str = "history.json";
const WEIGHTS_FILE: &str = "weights.json";
const SETTINGS_FILE: &str = "settings.json";

/// Errors reading or writing the data directory.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot encode {name}: {source}")]
    Encode {
        name: &'static str,
        source: serde_json::Error,
    },
}

/// On-disk shape of `settings.json`: the settings plus the round-robin cursor.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsRecord {
    #[serde(flatten)]
    settings: Settings,
    #[serde(default)]
    cursor: usize,
}

/// A data directory.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read all four records. Missing files fall back to defaults.
    pub fn load(&self) -> Result<PersistedState, StoreError> {
        let students: Vec<String> = self.read(STUDENTS_FILE)?.unwrap_or_default();
        let history: HistoryLog = self.read(HISTORY_FILE)?.unwrap_or_default();
        let weights: BTreeMap<String, f64> = self.read(WEIGHTS_FILE)?.unwrap_or_default();
        let record: SettingsRecord = self.read(SETTINGS_FILE)?.unwrap_or_default();
        debug!(
            dir = %self.dir.display(),
            students = students.len(),
            history = history.len(),
            "store loaded"
        );
        Ok(PersistedState {
            students,
            history,
            weights,
            settings: record.settings,
            cursor: record.cursor,
        })
    }

    /// Write all four records, creating the directory if needed.
    pub fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })?;
        self.write(STUDENTS_FILE, &state.students)?;
        self.write(HISTORY_FILE, &state.history)?;
        self.write(WEIGHTS_FILE, &state.weights)?;
        self.write(
            SETTINGS_FILE,
            &SettingsRecord {
                settings: state.settings.clone(),
                cursor: state.cursor,
            },
        )?;
        debug!(dir = %self.dir.display(), "store saved");
        Ok(())
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Parse { path, source })
    }

    fn write<T: Serialize>(&self, name: &'static str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Encode { name, source })?;
        let path = self.path(name);
        fs::write(&path, json).map_err(|source| StoreError::Write { path, source })
    }
}

/// Read a roster import file: one name per line.
pub fn read_names(path: &Path) -> Result<Vec<String>, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(rc_core::roster::parse_roster_text(&text))
}
