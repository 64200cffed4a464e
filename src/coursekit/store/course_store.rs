use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io;
use tracing::{debug, warn};

use super::backend::StorageBackend;
use super::{reconcile, DoctorReport, ModuleStore, ResourceStore};
use crate::config::CourseConfig;
use crate::error::{CourseError, Result};

/// Both course containers plus the backend they are persisted to.
pub struct CourseStore<B: StorageBackend> {
    backend: B,
    modules_key: String,
    resources_key: String,
    modules: ModuleStore,
    resources: ResourceStore,
    load_report: DoctorReport,
}

impl<B: StorageBackend> CourseStore<B> {
    /// Loads both lists and reconciles them.
    ///
    /// An absent key loads as an empty list, and so does a corrupt one (with a
    /// warning). Records that fail to parse inside an otherwise valid list are
    /// skipped one by one and counted in the load report. Only backend I/O
    /// failures are errors.
    pub fn open(backend: B, config: &CourseConfig) -> Result<Self> {
        let (modules, bad_modules) = load_list(&backend, &config.modules_key)?;
        let (resources, bad_resources) = load_list(&backend, &config.resources_key)?;
        let (modules, resources, mut load_report) = reconcile(modules, resources);
        load_report.unreadable = bad_modules + bad_resources;

        Ok(Self {
            backend,
            modules_key: config.modules_key.clone(),
            resources_key: config.resources_key.clone(),
            modules,
            resources,
            load_report,
        })
    }

    pub fn modules(&self) -> &ModuleStore {
        &self.modules
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn modules_mut(&mut self) -> &mut ModuleStore {
        &mut self.modules
    }

    pub fn resources_mut(&mut self) -> &mut ResourceStore {
        &mut self.resources
    }

    /// Both containers at once, for operations spanning them.
    pub fn parts_mut(&mut self) -> (&mut ResourceStore, &mut ModuleStore) {
        (&mut self.resources, &mut self.modules)
    }

    /// Repairs applied when this store was opened.
    pub fn load_report(&self) -> DoctorReport {
        self.load_report
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes both lists.
    pub fn save(&self) -> Result<()> {
        write_list(&self.backend, &self.modules_key, self.modules.as_slice())?;
        write_list(&self.backend, &self.resources_key, self.resources.as_slice())?;
        debug!(
            modules = self.modules.len(),
            resources = self.resources.len(),
            "course saved"
        );
        Ok(())
    }

    /// Persists after a mutation. A failed write is logged and otherwise
    /// ignored: in-memory state stays authoritative.
    pub fn commit(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist course; changes are kept in memory only");
        }
    }
}

/// Returns the parsed records and how many were skipped as unreadable.
fn load_list<T: DeserializeOwned>(
    backend: &impl StorageBackend,
    key: &str,
) -> Result<(Vec<T>, usize)> {
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok((Vec::new(), 0)),
        // Not UTF-8: the bytes are there but they are not ours.
        Err(CourseError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
            warn!(key, error = %e, "stored data is unreadable, starting from an empty list");
            return Ok((Vec::new(), 0));
        }
        Err(e) => return Err(e),
    };

    let records: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "stored data is corrupt, starting from an empty list");
            return Ok((Vec::new(), 0));
        }
    };

    let total = records.len();
    let items: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect();
    let skipped = total - items.len();
    Ok((items, skipped))
}

fn write_list<T: Serialize>(backend: &impl StorageBackend, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    backend.write(key, &json)
}
