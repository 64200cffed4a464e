use super::helpers::{find_resource, resolve_destination, resolve_resource, Destination};
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Location;
use crate::placement::{place_resource, PlacementOutcome, PlacementRequest};
use crate::store::{CourseStore, StorageBackend};

/// Moves a resource to the end of a module, or back to the unassigned list.
///
/// Placement guards never fail the command; they come back as messages.
pub fn run<B: StorageBackend>(
    store: &mut CourseStore<B>,
    selector: &str,
    destination: &Destination,
) -> Result<CmdResult> {
    let (id, source) = resolve_resource(store.resources(), store.modules(), selector)?;
    let target = resolve_destination(store.modules(), destination)?;
    let title = find_resource(store.resources(), store.modules(), &id, &source)
        .map(|r| r.title.clone())
        .unwrap_or_else(|| id.to_string());
    let target_name = describe(store, &target);

    let request = PlacementRequest::new(id.clone(), source, target.clone());
    let (resources, modules) = store.parts_mut();
    let outcome = place_resource(resources, modules, &request);

    let result = CmdResult::default();
    let result = match outcome {
        PlacementOutcome::Moved { .. } => {
            store.commit();
            let moved = find_resource(store.resources(), store.modules(), &id, &target)
                .cloned()
                .into_iter()
                .collect();
            result
                .with_message(CmdMessage::success(format!("Moved '{}' to {}", title, target_name)))
                .with_affected_resources(moved)
        }
        PlacementOutcome::AlreadyInPlace => result.with_message(CmdMessage::info(format!(
            "'{}' is already in {}",
            title, target_name
        ))),
        PlacementOutcome::DuplicateInTarget => result.with_message(CmdMessage::warning(format!(
            "{} already contains '{}'",
            target_name, title
        ))),
        PlacementOutcome::SourceNotFound | PlacementOutcome::TargetNotFound => result.with_message(
            CmdMessage::warning(format!("Could not move '{}', the course changed", title)),
        ),
    };
    Ok(result)
}

fn describe<B: StorageBackend>(store: &CourseStore<B>, location: &Location) -> String {
    match location {
        Location::TopLevel => "unassigned resources".to_string(),
        Location::InModule(id) => store
            .modules()
            .get(id)
            .map(|m| format!("module '{}'", m.name))
            .unwrap_or_else(|| format!("module {}", id)),
    }
}
