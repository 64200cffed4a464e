//! # Storage Layer
//!
//! The course lives in two containers that are only ever mutated through
//! their own operations:
//!
//! - [`ResourceStore`]: resources not placed in any module.
//! - [`ModuleStore`]: the ordered modules, each owning its resource list.
//!
//! [`CourseStore`] pairs them with a [`StorageBackend`] and writes both lists
//! as JSON arrays after every mutation.
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Reconciliation
//!
//! Data written by older clients can break the placement invariants (a
//! resource both nested and top-level, a `moduleId` tag pointing nowhere).
//! [`reconcile`] repairs what it loads and reports what it fixed in a
//! [`DoctorReport`]. Repairs happen in memory only; they reach storage on
//! the next mutation or an explicit `doctor` run.

pub mod backend;
pub mod course_store;
pub mod fs_backend;
pub mod mem_backend;
pub mod modules;
pub mod resources;

pub use backend::StorageBackend;
pub use course_store::CourseStore;
pub use modules::{ModuleStore, RemovedModule};
pub use resources::{ResourceStore, DUPLICATE_RESOURCE};

use std::collections::HashSet;
use tracing::warn;

use crate::model::{Location, Module, ModuleId, Resource, ResourceId};
use crate::ordering::dedupe_by_id;

/// Counts of the repairs applied while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Modules dropped because an earlier module had the same id.
    pub duplicate_modules: usize,
    /// Resources dropped because the same id was already held elsewhere.
    pub duplicate_resources: usize,
    /// Nested resources whose location tag disagreed with their module.
    pub relocated: usize,
    /// Top-level resources tagged with an existing module, moved into it.
    pub adopted: usize,
    /// Top-level resources tagged with a module that no longer exists.
    pub orphans_cleared: usize,
    /// Stored records that could not be parsed and were skipped.
    pub unreadable: usize,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.duplicate_modules
            + self.duplicate_resources
            + self.relocated
            + self.adopted
            + self.orphans_cleared
            + self.unreadable
    }
}

/// Repairs loaded data so every resource sits in exactly one container.
///
/// First occurrence wins everywhere: earlier modules over later ones, nested
/// placement over top-level.
pub fn reconcile(
    modules: Vec<Module>,
    resources: Vec<Resource>,
) -> (ModuleStore, ResourceStore, DoctorReport) {
    let mut report = DoctorReport::default();

    let module_count = modules.len();
    let mut modules = dedupe_by_id(modules);
    report.duplicate_modules = module_count - modules.len();

    let mut nested: HashSet<ResourceId> = HashSet::new();
    for module in &mut modules {
        let owner = module.location();
        let before = module.resources.len();
        let kept: Vec<Resource> = std::mem::take(&mut module.resources)
            .into_iter()
            .filter(|r| nested.insert(r.id.clone()))
            .map(|mut r| {
                if r.location != owner {
                    report.relocated += 1;
                    r.location = owner.clone();
                }
                r
            })
            .collect();
        report.duplicate_resources += before - kept.len();
        module.resources = kept;
    }

    let known: HashSet<ModuleId> = modules.iter().map(|m| m.id.clone()).collect();
    let mut top_level = Vec::new();
    let mut seen_top: HashSet<ResourceId> = HashSet::new();
    for resource in resources {
        if nested.contains(&resource.id) || !seen_top.insert(resource.id.clone()) {
            report.duplicate_resources += 1;
            continue;
        }
        match resource.location.module_id().cloned() {
            None => top_level.push(resource),
            Some(module_id) if known.contains(&module_id) => {
                if let Some(module) = modules.iter_mut().find(|m| m.id == module_id) {
                    nested.insert(resource.id.clone());
                    module
                        .resources
                        .push(resource.with_location(Location::InModule(module_id)));
                    report.adopted += 1;
                }
            }
            Some(_) => {
                top_level.push(resource.with_location(Location::TopLevel));
                report.orphans_cleared += 1;
            }
        }
    }

    if !report.is_clean() {
        warn!(?report, "repaired inconsistent course data");
    }

    (
        ModuleStore::from_modules_unchecked(modules),
        ResourceStore::from_resources(top_level),
        report,
    )
}
