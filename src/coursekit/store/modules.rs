use tracing::debug;

use super::resources::{ResourceStore, DUPLICATE_RESOURCE};
use crate::error::{CourseError, Result};
use crate::forms::validate_module_name;
use crate::model::{Module, ModuleId, Resource, ResourceId, ResourcePatch};
use crate::ordering::{dedupe_by_id, reorder};

/// What is left of a module after it has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedModule {
    pub id: ModuleId,
    pub name: String,
    /// Ids of the resources handed back to the top-level store.
    pub repatriated: Vec<ResourceId>,
}

/// The ordered list of modules and, through them, every placed resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleStore {
    modules: Vec<Module>,
}

impl ModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module at the end of the course.
    pub fn add(&mut self, mut module: Module) -> Result<()> {
        module.name = validate_module_name(&module.name)?;
        if self.position(&module.id).is_some() {
            return Err(CourseError::Duplicate(format!(
                "Module {} already exists",
                module.id
            )));
        }
        let owner = module.location();
        let resources = std::mem::take(&mut module.resources);
        module.resources = dedupe_by_id(
            resources
                .into_iter()
                .map(|r| r.with_location(owner.clone()))
                .collect(),
        );
        self.modules.push(module);
        Ok(())
    }

    /// Renames a module, keeping its resources.
    pub fn update(&mut self, id: &ModuleId, name: &str) -> Result<&Module> {
        let name = validate_module_name(name)?;
        let module = self
            .get_mut(id)
            .ok_or_else(|| CourseError::ModuleNotFound(id.clone()))?;
        module.name = name;
        Ok(&*module)
    }

    /// Removes a module and hands its resources back to `unassigned`.
    pub fn remove(&mut self, id: &ModuleId, unassigned: &mut ResourceStore) -> Option<RemovedModule> {
        let index = self.position(id)?;
        let module = self.modules.remove(index);
        let repatriated = module.resources.iter().map(|r| r.id.clone()).collect();
        unassigned.merge(module.resources);
        Some(RemovedModule {
            id: module.id,
            name: module.name,
            repatriated,
        })
    }

    /// Moves the module at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return from < self.modules.len();
        }
        reorder(&mut self.modules, from, to)
    }

    /// Appends a resource to a module's list. The resource's location is
    /// rewritten to the module.
    pub fn add_resource_to(&mut self, module_id: &ModuleId, resource: Resource) -> Result<()> {
        let module = self
            .get_mut(module_id)
            .ok_or_else(|| CourseError::ModuleNotFound(module_id.clone()))?;
        if module.contains_resource(&resource.id) {
            debug!(resource = %resource.id, module = %module_id, "resource already in module");
            return Err(CourseError::Duplicate(format!(
                "Resource {} is already in module '{}'",
                resource.id, module.name
            )));
        }
        let owner = module.location();
        module.resources.push(resource.with_location(owner));
        Ok(())
    }

    /// Adds a newly created resource, rejecting content that duplicates
    /// something already in the module.
    pub fn add_new_resource_to(&mut self, module_id: &ModuleId, resource: Resource) -> Result<()> {
        if self.find_duplicate_in(module_id, &resource)?.is_some() {
            return Err(CourseError::Duplicate(DUPLICATE_RESOURCE.to_string()));
        }
        self.add_resource_to(module_id, resource)
    }

    pub fn remove_resource_from(
        &mut self,
        module_id: &ModuleId,
        resource_id: &ResourceId,
    ) -> Option<Resource> {
        let module = self.get_mut(module_id)?;
        let index = module.resources.iter().position(|r| &r.id == resource_id)?;
        Some(module.resources.remove(index))
    }

    pub fn update_resource_in(
        &mut self,
        module_id: &ModuleId,
        resource_id: &ResourceId,
        patch: &ResourcePatch,
    ) -> bool {
        let Some(module) = self.get_mut(module_id) else {
            return false;
        };
        match module.resources.iter_mut().find(|r| &r.id == resource_id) {
            Some(resource) => {
                resource.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    pub fn find_duplicate_in(&self, module_id: &ModuleId, candidate: &Resource) -> Result<Option<&Resource>> {
        let module = self
            .get(module_id)
            .ok_or_else(|| CourseError::ModuleNotFound(module_id.clone()))?;
        Ok(module.resources.iter().find(|r| r.conflicts_with(candidate)))
    }

    /// The module currently holding `resource_id`, if any.
    pub fn locate(&self, resource_id: &ResourceId) -> Option<&ModuleId> {
        self.modules
            .iter()
            .find(|m| m.contains_resource(resource_id))
            .map(|m| &m.id)
    }

    pub fn position(&self, id: &ModuleId) -> Option<usize> {
        self.modules.iter().position(|m| &m.id == id)
    }

    pub fn get(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    fn get_mut(&mut self, id: &ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| &m.id == id)
    }

    /// Resource list of the module at `index`, for the placement engine.
    pub(crate) fn resources_at_mut(&mut self, index: usize) -> &mut Vec<Resource> {
        &mut self.modules[index].resources
    }

    /// Resource lists of two distinct modules at once.
    pub(crate) fn resource_pair_mut(
        &mut self,
        a: usize,
        b: usize,
    ) -> (&mut Vec<Resource>, &mut Vec<Resource>) {
        debug_assert_ne!(a, b);
        if a < b {
            let (left, right) = self.modules.split_at_mut(b);
            (&mut left[a].resources, &mut right[0].resources)
        } else {
            let (left, right) = self.modules.split_at_mut(a);
            (&mut right[0].resources, &mut left[b].resources)
        }
    }

    /// Ids in course order.
    pub fn ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(|m| m.id.clone()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    pub fn as_slice(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Total number of resources placed in modules.
    pub fn resource_count(&self) -> usize {
        self.modules.iter().map(|m| m.resources.len()).sum()
    }

    pub(crate) fn from_modules_unchecked(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    pub(crate) fn into_modules(self) -> Vec<Module> {
        self.modules
    }
}
