//! Settings store collaborator: a synchronous key/value store with an
//! explicit persist step.
//!
//! The default implementation keeps a JSON file in the platform config
//! directory; `MemoryStore` backs tests and embedders that persist
//! elsewhere.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::{fs, io::Write};

use directories::ProjectDirs;
use tracing::debug;

use crate::fields::{FieldValue, ValueMap};

/// Key/value settings with an explicit flush-to-storage step.
///
/// `set`/`set_all` only mutate the in-memory state; nothing reaches disk
/// until [`persist`](Self::persist) is called.
pub trait SettingsStore: Send + Sync {
    /// Snapshot of all current settings.
    fn all(&self) -> ValueMap;

    /// Set a single key.
    fn set(&self, key: &str, value: FieldValue);

    /// Merge a whole map of values.
    fn set_all(&self, values: &ValueMap);

    /// Flush the current state to storage.
    fn persist(&self) -> io::Result<()>;
}

/// Settings persisted as pretty-printed JSON at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<ValueMap>,
}

impl JsonFileStore {
    /// Open the store at the platform config location, loading any existing
    /// file. A missing or unreadable file starts empty.
    pub fn open_default() -> io::Result<Self> {
        let path = default_settings_path()?;
        Ok(Self::at_path(path))
    }

    /// Open the store at an explicit path, loading any existing file.
    pub fn at_path(path: PathBuf) -> Self {
        let state = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            path,
            state: Mutex::new(state),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn all(&self) -> ValueMap {
        self.state.lock().unwrap().clone()
    }

    fn set(&self, key: &str, value: FieldValue) {
        self.state.lock().unwrap().insert(key.to_string(), value);
    }

    fn set_all(&self, values: &ValueMap) {
        let mut state = self.state.lock().unwrap();
        for (key, value) in values {
            state.insert(key.clone(), value.clone());
        }
    }

    fn persist(&self) -> io::Result<()> {
        let state = self.state.lock().unwrap();
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(&*state)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(data.as_bytes())?;
        debug!(path = %self.path.display(), "settings persisted");
        Ok(())
    }
}

fn default_settings_path() -> io::Result<PathBuf> {
    let proj = ProjectDirs::from("io", "quill", "quill-editor").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine config directory")
    })?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Operations a [`MemoryStore`] records, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    Set(String),
    Persist,
}

/// In-memory settings store that records its operation order. Used by tests
/// and by embedders that do their own persistence.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<ValueMap>,
    ops: Mutex<Vec<StoreOp>>,
    fail_persist: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: ValueMap) -> Self {
        Self {
            state: Mutex::new(values),
            ops: Mutex::new(Vec::new()),
            fail_persist: false,
        }
    }

    /// A store whose flush step always fails, for exercising persistence
    /// error paths.
    pub fn failing_persist() -> Self {
        Self {
            fail_persist: true,
            ..Self::default()
        }
    }

    /// The sequence of mutating operations seen so far.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn persist_count(&self) -> usize {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| **op == StoreOp::Persist)
            .count()
    }
}

impl SettingsStore for MemoryStore {
    fn all(&self) -> ValueMap {
        self.state.lock().unwrap().clone()
    }

    fn set(&self, key: &str, value: FieldValue) {
        self.state.lock().unwrap().insert(key.to_string(), value);
        self.ops.lock().unwrap().push(StoreOp::Set(key.to_string()));
    }

    fn set_all(&self, values: &ValueMap) {
        let mut state = self.state.lock().unwrap();
        let mut ops = self.ops.lock().unwrap();
        for (key, value) in values {
            state.insert(key.clone(), value.clone());
            ops.push(StoreOp::Set(key.clone()));
        }
    }

    fn persist(&self) -> io::Result<()> {
        if self.fail_persist {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.ops.lock().unwrap().push(StoreOp::Persist);
        Ok(())
    }
}
