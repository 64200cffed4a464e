use tracing::debug;

use crate::error::{CourseError, Result};
use crate::model::{Location, Resource, ResourceId, ResourcePatch};
use crate::ordering::dedupe_by_id;

pub const DUPLICATE_RESOURCE: &str = "A resource with this title or content already exists!";

/// Resources that are not placed in any module.
///
/// Every resource held here has [`Location::TopLevel`] and no two share an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceStore {
    items: Vec<Resource>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-loaded resources, dropping repeated ids
    /// and forcing every location to top level.
    pub fn from_resources(resources: Vec<Resource>) -> Self {
        let mut store = Self { items: Vec::new() };
        store.merge(resources);
        store
    }

    /// Adds a newly created resource, rejecting content duplicates.
    pub fn add(&mut self, resource: Resource) -> Result<()> {
        if let Some(existing) = self.find_duplicate(&resource) {
            debug!(
                new = %resource.title,
                existing = %existing.title,
                "rejecting duplicate top-level resource"
            );
            return Err(CourseError::Duplicate(DUPLICATE_RESOURCE.to_string()));
        }
        self.append(resource);
        Ok(())
    }

    /// Returns an existing resource that `candidate` would duplicate.
    pub fn find_duplicate(&self, candidate: &Resource) -> Option<&Resource> {
        self.items.iter().find(|r| r.conflicts_with(candidate))
    }

    /// Applies an edit in place. Returns `false` when the id is unknown.
    pub fn update(&mut self, id: &ResourceId, patch: &ResourcePatch) -> bool {
        match self.items.iter_mut().find(|r| &r.id == id) {
            Some(resource) => {
                resource.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &ResourceId) -> Option<Resource> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Removes and returns a resource so it can be placed elsewhere.
    pub fn take_out(&mut self, id: &ResourceId) -> Result<Resource> {
        self.remove(id)
            .ok_or_else(|| CourseError::ResourceNotFound(id.clone()))
    }

    /// Appends without content checks; id duplicates are still collapsed.
    pub(crate) fn append(&mut self, resource: Resource) {
        self.items.push(resource.with_location(Location::TopLevel));
        self.dedupe();
    }

    /// Appends many resources at once with their locations cleared. An id
    /// already present keeps its existing entry.
    pub fn merge(&mut self, resources: Vec<Resource>) {
        self.items.extend(
            resources
                .into_iter()
                .map(|r| r.with_location(Location::TopLevel)),
        );
        self.dedupe();
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Resource> {
        &mut self.items
    }

    pub(crate) fn dedupe(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.items = dedupe_by_id(items);
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.items.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &ResourceId) -> Option<usize> {
        self.items.iter().position(|r| &r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Resource] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
