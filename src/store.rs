use std::cell::{Cell, RefCell};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::Employee;
use crate::registry::Registry;

const FORMAT_VERSION: u32 = 1;

/// Durable home for the whole registry.
pub trait Store {
    /// `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Registry>>;
    fn save(&self, registry: &Registry) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    saved_at: DateTime<Utc>,
    employees: Vec<Employee>,
}

impl Snapshot {
    fn into_registry(self) -> Result<Registry> {
        if self.version != FORMAT_VERSION {
            bail!("unsupported data file version {}", self.version);
        }
        Ok(self
            .employees
            .into_iter()
            .map(|mut employee| {
                employee.recompute_net_salary();
                employee
            })
            .collect())
    }
}

/// JSON file store. Saves write a sibling temp file and rename it over the
/// target, so the file on disk is always a complete snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Option<Registry>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file present");
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        let registry = snapshot
            .into_registry()
            .with_context(|| format!("Failed to restore {}", self.path.display()))?;

        info!(path = %self.path.display(), employees = registry.len(), "Loaded registry");
        Ok(Some(registry))
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // serde_json writes NaN and infinity as null, which would not load back
        if let Some(bad) = registry.list().iter().find(|e| !e.has_finite_amounts()) {
            bail!("Employee {} has a non-finite amount and cannot be saved", bad.id());
        }

        let snapshot = Snapshot {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            employees: registry.list(),
        };
        let json = serde_json::to_vec_pretty(&snapshot).context("Failed to encode registry")?;

        let tmp = self.temp_path();
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("Failed to replace {}", self.path.display()));
        }

        debug!(path = %self.path.display(), employees = registry.len(), "Saved registry");
        Ok(())
    }
}

/// Keeps the last saved snapshot in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Registry>>,
    saves: Cell<usize>,
    fail: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        let store = Self::default();
        store.saved.replace(Some(registry));
        store
    }

    /// While set, every load and save fails.
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn saved(&self) -> Option<Registry> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Registry>> {
        if self.fail.get() {
            return Err(anyhow!("memory store unavailable"));
        }
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        if self.fail.get() {
            return Err(anyhow!("memory store unavailable"));
        }
        self.saved.replace(Some(registry.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
