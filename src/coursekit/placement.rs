//! # Placement Engine
//!
//! Moves a resource between the top-level store and a module, or between
//! two modules. A move is one synchronous splice with exclusive access to
//! both stores, so the resource is never observable in two containers or in
//! none, and a second drop of the same payload finds it already moved.
//!
//! Guards run in a fixed order and each aborts without mutation:
//!
//! 1. source equals target: [`PlacementOutcome::AlreadyInPlace`]
//! 2. target module unknown: [`PlacementOutcome::TargetNotFound`]
//! 3. target already holds the id: [`PlacementOutcome::DuplicateInTarget`]
//! 4. source does not hold the id: [`PlacementOutcome::SourceNotFound`]
//!
//! Outcomes are values. A stale drag payload is routine, not an error.

use tracing::{debug, info};

use crate::model::{Location, Resource, ResourceId};
use crate::ordering::{dedupe_by_id, transfer};
use crate::store::{ModuleStore, ResourceStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub resource_id: ResourceId,
    pub source: Location,
    pub target: Location,
}

impl PlacementRequest {
    pub fn new(resource_id: ResourceId, source: Location, target: Location) -> Self {
        Self {
            resource_id,
            source,
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Moved { from: Location, to: Location },
    AlreadyInPlace,
    DuplicateInTarget,
    SourceNotFound,
    TargetNotFound,
}

impl PlacementOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, PlacementOutcome::Moved { .. })
    }
}

/// Where a resource currently is, searching modules first.
pub fn current_location(
    resources: &ResourceStore,
    modules: &ModuleStore,
    id: &ResourceId,
) -> Option<Location> {
    if let Some(module_id) = modules.locate(id) {
        return Some(Location::InModule(module_id.clone()));
    }
    resources.contains(id).then_some(Location::TopLevel)
}

/// Container index: `None` is the top-level store, `Some(i)` the module at
/// position `i`.
type Slot = Option<usize>;

fn slot_for(modules: &ModuleStore, location: &Location) -> Option<Slot> {
    match location {
        Location::TopLevel => Some(None),
        Location::InModule(id) => modules.position(id).map(Some),
    }
}

fn holds(resources: &ResourceStore, modules: &ModuleStore, slot: Slot, id: &ResourceId) -> Option<usize> {
    let list = match slot {
        None => resources.as_slice(),
        Some(i) => modules.get_at(i)?.resources(),
    };
    list.iter().position(|r| &r.id == id)
}

pub fn place_resource(
    resources: &mut ResourceStore,
    modules: &mut ModuleStore,
    request: &PlacementRequest,
) -> PlacementOutcome {
    let id = &request.resource_id;

    if request.source == request.target {
        debug!(resource = %id, location = %request.target, "move is a no-op");
        return PlacementOutcome::AlreadyInPlace;
    }

    let Some(target) = slot_for(modules, &request.target) else {
        debug!(resource = %id, target = %request.target, "drop target no longer exists");
        return PlacementOutcome::TargetNotFound;
    };

    if holds(resources, modules, target, id).is_some() {
        debug!(resource = %id, target = %request.target, "resource already in target");
        return PlacementOutcome::DuplicateInTarget;
    }

    let Some(from) = slot_for(modules, &request.source)
        .and_then(|source| holds(resources, modules, source, id).map(|index| (source, index)))
    else {
        debug!(resource = %id, source = %request.source, "resource not found in source");
        return PlacementOutcome::SourceNotFound;
    };
    let (source, index) = from;

    let moved = match (source, target) {
        (None, Some(t)) => transfer(resources.items_mut(), index, modules.resources_at_mut(t), usize::MAX),
        (Some(s), None) => transfer(modules.resources_at_mut(s), index, resources.items_mut(), usize::MAX),
        (Some(s), Some(t)) if s != t => {
            let (src, dst) = modules.resource_pair_mut(s, t);
            transfer(src, index, dst, usize::MAX)
        }
        // Distinct locations always resolve to distinct containers.
        _ => false,
    };
    if !moved {
        return PlacementOutcome::SourceNotFound;
    }

    let target_list = match target {
        None => resources.items_mut(),
        Some(t) => modules.resources_at_mut(t),
    };
    settle(target_list, &request.target);

    info!(resource = %id, from = %request.source, to = %request.target, "resource moved");
    PlacementOutcome::Moved {
        from: request.source.clone(),
        to: request.target.clone(),
    }
}

/// Stamps the appended resource with its new location and collapses any
/// repeated id.
fn settle(list: &mut Vec<Resource>, location: &Location) {
    if let Some(last) = list.last_mut() {
        last.location = location.clone();
    }
    *list = dedupe_by_id(std::mem::take(list));
}
