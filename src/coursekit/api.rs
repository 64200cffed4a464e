//! # API Facade
//!
//! [`CourseApi`] is the single entry point for every UI client. It parses
//! string selectors, dispatches to `commands/*`, and owns the one
//! [`DragSession`] a client can have in flight.
//!
//! No business logic lives here, and nothing is printed.
//!
//! ## Selectors
//!
//! - **Modules**: 1-based position (`2`) or module id.
//! - **Resources**: resource id, or a title matched case-insensitively.
//! - **Destinations**: `top` (also `-` or `unassigned`) for the unassigned
//!   list, otherwise a module selector.
//!
//! ## Generic Over StorageBackend
//!
//! `CourseApi<FsBackend>` in the CLI, `CourseApi<MemBackend>` in tests.

use crate::commands::{self, helpers::Destination, helpers::ModuleSelector, CmdResult, Confirmation};
use crate::config::CourseConfig;
use crate::drag::{DragPayload, DragSession, DropEffect, DropTarget, ReorderPreview};
use crate::error::{CourseError, Result};
use crate::forms::{FileRules, FileUploadForm, LinkForm, ModuleForm, ResourceEditForm};
use crate::model::{Location, Resource};
use crate::placement::PlacementOutcome;
use crate::store::{CourseStore, ModuleStore, StorageBackend};

pub struct CourseApi<B: StorageBackend> {
    store: CourseStore<B>,
    rules: FileRules,
    drag: DragSession,
}

impl<B: StorageBackend> CourseApi<B> {
    pub fn new(store: CourseStore<B>, config: &CourseConfig) -> Self {
        Self {
            store,
            rules: config.file_rules(),
            drag: DragSession::new(),
        }
    }

    pub fn open(backend: B, config: &CourseConfig) -> Result<Self> {
        Ok(Self::new(CourseStore::open(backend, config)?, config))
    }

    pub fn store(&self) -> &CourseStore<B> {
        &self.store
    }

    pub fn file_rules(&self) -> &FileRules {
        &self.rules
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search(&self, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, query)
    }

    pub fn create_module(&mut self, name: &str) -> Result<CmdResult> {
        commands::modules::create(&mut self.store, &ModuleForm::new(name))
    }

    pub fn rename_module(&mut self, selector: &str, name: &str) -> Result<CmdResult> {
        let selector: ModuleSelector = selector.parse()?;
        commands::modules::rename(&mut self.store, &selector, &ModuleForm::new(name))
    }

    pub fn delete_module(&mut self, selector: &str, confirmation: Confirmation) -> Result<CmdResult> {
        let selector: ModuleSelector = selector.parse()?;
        commands::modules::delete(&mut self.store, &selector, confirmation)
    }

    pub fn reorder_module(&mut self, selector: &str, position: usize) -> Result<CmdResult> {
        let selector: ModuleSelector = selector.parse()?;
        commands::modules::reorder(&mut self.store, &selector, position)
    }

    pub fn add_link(&mut self, form: &LinkForm) -> Result<CmdResult> {
        commands::resources::add_link(&mut self.store, form)
    }

    pub fn add_file(&mut self, form: &FileUploadForm) -> Result<CmdResult> {
        commands::resources::add_file(&mut self.store, form, &self.rules)
    }

    pub fn edit_resource(&mut self, selector: &str, form: &ResourceEditForm) -> Result<CmdResult> {
        commands::resources::edit(&mut self.store, selector, form)
    }

    pub fn delete_resource(&mut self, selector: &str, confirmation: Confirmation) -> Result<CmdResult> {
        commands::resources::delete(&mut self.store, selector, confirmation)
    }

    pub fn move_resource(&mut self, selector: &str, destination: &str) -> Result<CmdResult> {
        let destination = parse_destination(destination)?;
        commands::move_resource::run(&mut self.store, selector, &destination)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    /// Name of the selected module, for confirmation prompts.
    pub fn module_name(&self, selector: &str) -> Result<String> {
        let selector: ModuleSelector = selector.parse()?;
        let (index, _) = commands::helpers::resolve_module(self.store.modules(), &selector)?;
        Ok(self
            .store
            .modules()
            .get_at(index)
            .map(|m| m.name.clone())
            .unwrap_or_default())
    }

    /// The selected resource, for confirmation prompts and edit defaults.
    pub fn resource(&self, selector: &str) -> Result<Resource> {
        let (id, location) =
            commands::helpers::resolve_resource(self.store.resources(), self.store.modules(), selector)?;
        commands::helpers::find_resource(self.store.resources(), self.store.modules(), &id, &location)
            .cloned()
            .ok_or(CourseError::ResourceNotFound(id))
    }

    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.drag.begin(payload);
    }

    pub fn hover(&self, target: &DropTarget) -> Option<ReorderPreview> {
        self.drag.hover(self.store.modules(), target)
    }

    /// Completes the active drag, persisting when something changed.
    pub fn drop(&mut self, target: &DropTarget) -> DropEffect {
        let (resources, modules) = self.store.parts_mut();
        let effect = self.drag.drop(resources, modules, target);
        if matches!(
            effect,
            DropEffect::Placed(PlacementOutcome::Moved { .. }) | DropEffect::Reordered { .. }
        ) {
            self.store.commit();
        }
        effect
    }

    pub fn cancel_drag(&mut self) -> Option<DragPayload> {
        self.drag.cancel()
    }
}

/// Parses a move destination: `top`, `-` or `unassigned` for the unassigned
/// list, anything else as a module selector.
pub fn parse_destination(input: &str) -> Result<Destination> {
    match input.trim().to_lowercase().as_str() {
        "top" | "-" | "unassigned" => Ok(Destination::TopLevel),
        _ => Ok(Destination::Module(input.parse()?)),
    }
}

/// Drag payload for a resource at its current location.
pub fn resource_payload(resource: &Resource) -> DragPayload {
    DragPayload::resource(resource.id.clone(), &resource.location)
}

/// Drop target for a location. An unknown module gets an index past the end.
pub fn drop_target_for(modules: &ModuleStore, location: &Location) -> DropTarget {
    match location {
        Location::TopLevel => DropTarget::TopLevel,
        Location::InModule(id) => DropTarget::Module {
            id: id.clone(),
            index: modules.position(id).unwrap_or(usize::MAX),
        },
    }
}
