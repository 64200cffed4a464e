use tracing::info;

use super::helpers::{find_resource, resolve_resource};
use super::{CmdMessage, CmdResult, Confirmation};
use crate::error::{CourseError, Result};
use crate::forms::{FileRules, FileUploadForm, LinkForm, NewResource, ResourceEditForm};
use crate::model::{Location, Resource};
use crate::store::{CourseStore, StorageBackend};

pub fn add_link<B: StorageBackend>(store: &mut CourseStore<B>, form: &LinkForm) -> Result<CmdResult> {
    let new = form.validate()?;
    insert(store, new)
}

pub fn add_file<B: StorageBackend>(
    store: &mut CourseStore<B>,
    form: &FileUploadForm,
    rules: &FileRules,
) -> Result<CmdResult> {
    let new = form.validate(rules)?;
    insert(store, new)
}

/// Stores a validated resource where the form asked for it. Content
/// duplicates are checked against that container only.
fn insert<B: StorageBackend>(store: &mut CourseStore<B>, new: NewResource) -> Result<CmdResult> {
    let NewResource { resource, location } = new;
    let resource = resource.with_location(location.clone());

    let destination = match &location {
        Location::TopLevel => {
            store.resources_mut().add(resource.clone())?;
            "unassigned resources".to_string()
        }
        Location::InModule(module_id) => {
            store
                .modules_mut()
                .add_new_resource_to(module_id, resource.clone())?;
            let name = store
                .modules()
                .get(module_id)
                .map(|m| m.name.as_str())
                .unwrap_or_default();
            format!("module '{}'", name)
        }
    };
    store.commit();
    info!(resource = %resource.id, kind = %resource.resource_type(), %location, "resource added");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Added {} '{}' to {}",
            resource.resource_type(),
            resource.title,
            destination
        )))
        .with_affected_resources(vec![resource]))
}

/// Edits a resource's title and, for links, its url.
pub fn edit<B: StorageBackend>(
    store: &mut CourseStore<B>,
    selector: &str,
    form: &ResourceEditForm,
) -> Result<CmdResult> {
    let (id, location) = resolve_resource(store.resources(), store.modules(), selector)?;
    let resource_type = find_resource(store.resources(), store.modules(), &id, &location)
        .map(Resource::resource_type)
        .ok_or_else(|| CourseError::ResourceNotFound(id.clone()))?;
    let patch = form.validate(resource_type)?;

    let updated = match &location {
        Location::TopLevel => store.resources_mut().update(&id, &patch),
        Location::InModule(module_id) => store.modules_mut().update_resource_in(module_id, &id, &patch),
    };
    if !updated {
        return Err(CourseError::ResourceNotFound(id));
    }
    store.commit();
    info!(resource = %id, "resource updated");

    let resource = find_resource(store.resources(), store.modules(), &id, &location)
        .cloned()
        .into_iter()
        .collect();
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Updated '{}'", patch.title)))
        .with_affected_resources(resource))
}

pub fn delete<B: StorageBackend>(
    store: &mut CourseStore<B>,
    selector: &str,
    confirmation: Confirmation,
) -> Result<CmdResult> {
    let (id, location) = resolve_resource(store.resources(), store.modules(), selector)?;
    if confirmation == Confirmation::Declined {
        return Ok(CmdResult::cancelled());
    }

    let removed = match &location {
        Location::TopLevel => store.resources_mut().remove(&id),
        Location::InModule(module_id) => store.modules_mut().remove_resource_from(module_id, &id),
    }
    .ok_or_else(|| CourseError::ResourceNotFound(id.clone()))?;
    store.commit();
    info!(resource = %id, %location, "resource deleted");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Deleted '{}'", removed.title)))
        .with_affected_resources(vec![removed]))
}
