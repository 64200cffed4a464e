use std::fmt;
use std::str::FromStr;

use crate::error::{CourseError, Result};
use crate::model::{Location, ModuleId, Resource, ResourceId};
use crate::placement::current_location;
use crate::store::{ModuleStore, ResourceStore};

/// Picks a module by 1-based position or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSelector {
    Position(usize),
    Id(ModuleId),
}

impl FromStr for ModuleSelector {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CourseError::Api("Empty module selector".to_string()));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(CourseError::Api("Module positions start at 1".to_string())),
            Ok(n) => Ok(ModuleSelector::Position(n)),
            Err(_) => Ok(ModuleSelector::Id(ModuleId::from(s))),
        }
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleSelector::Position(n) => write!(f, "{}", n),
            ModuleSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Where a moved resource should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    TopLevel,
    Module(ModuleSelector),
}

pub fn resolve_module(modules: &ModuleStore, selector: &ModuleSelector) -> Result<(usize, ModuleId)> {
    match selector {
        ModuleSelector::Position(n) => n
            .checked_sub(1)
            .and_then(|index| modules.get_at(index).map(|m| (index, m.id.clone())))
            .ok_or_else(|| CourseError::Api(format!("Module {} not found", n))),
        ModuleSelector::Id(id) => modules
            .position(id)
            .map(|index| (index, id.clone()))
            .ok_or_else(|| CourseError::ModuleNotFound(id.clone())),
    }
}

pub fn resolve_destination(modules: &ModuleStore, destination: &Destination) -> Result<Location> {
    match destination {
        Destination::TopLevel => Ok(Location::TopLevel),
        Destination::Module(selector) => {
            let (_, id) = resolve_module(modules, selector)?;
            Ok(Location::InModule(id))
        }
    }
}

/// Finds a resource by exact id, or else by a title matched
/// case-insensitively across every container. Ambiguous titles are errors.
pub fn resolve_resource(
    resources: &ResourceStore,
    modules: &ModuleStore,
    selector: &str,
) -> Result<(ResourceId, Location)> {
    let selector = selector.trim();
    let id = ResourceId::from(selector);
    if let Some(location) = current_location(resources, modules, &id) {
        return Ok((id, location));
    }

    let wanted = selector.to_lowercase();
    let mut matches: Vec<&Resource> = modules
        .iter()
        .flat_map(|m| m.resources().iter())
        .chain(resources.iter())
        .filter(|r| r.title.to_lowercase() == wanted)
        .collect();

    match matches.len() {
        0 => Err(CourseError::ResourceNotFound(id)),
        1 => {
            let found = matches.remove(0);
            Ok((found.id.clone(), found.location.clone()))
        }
        n => Err(CourseError::Api(format!(
            "{} resources are titled '{}', select one by id",
            n, selector
        ))),
    }
}

/// Looks a resource up wherever it is.
pub fn find_resource<'a>(
    resources: &'a ResourceStore,
    modules: &'a ModuleStore,
    id: &ResourceId,
    location: &Location,
) -> Option<&'a Resource> {
    match location {
        Location::TopLevel => resources.get(id),
        Location::InModule(module_id) => modules
            .get(module_id)?
            .resources()
            .iter()
            .find(|r| &r.id == id),
    }
}
