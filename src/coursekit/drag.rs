//! # Drag-Drop Event Adapter
//!
//! Turns gesture signals into store mutations. The gesture library only has
//! to report four things:
//!
//! - drag started with a [`DragPayload`]: [`DragSession::begin`]
//! - pointer over a [`DropTarget`]: [`DragSession::hover`]
//! - released over a target: [`DragSession::drop`]
//! - released outside any target: [`DragSession::cancel`]
//!
//! Hover never mutates. Only a drop does, and it consumes the payload, so a
//! repeated drop signal without a new `begin` is ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Location, ModuleId, ResourceId};
use crate::ordering::reorder;
use crate::placement::{place_resource, PlacementOutcome, PlacementRequest};
use crate::store::{ModuleStore, ResourceStore};

/// What is being dragged. Serialized with a `kind` tag so a gesture layer
/// can hand it over as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    Module {
        id: ModuleId,
        index: usize,
    },
    Resource {
        id: ResourceId,
        #[serde(rename = "moduleId", default, skip_serializing_if = "Option::is_none")]
        module_id: Option<ModuleId>,
    },
}

impl DragPayload {
    pub fn resource(id: impl Into<ResourceId>, location: &Location) -> Self {
        DragPayload::Resource {
            id: id.into(),
            module_id: location.module_id().cloned(),
        }
    }
}

/// Where the pointer is. Resources dropped on a module land in it; modules
/// dropped on a module take its current position. `index` is what the
/// gesture layer rendered and is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    TopLevel,
    Module { id: ModuleId, index: usize },
}

impl DropTarget {
    fn location(&self) -> Location {
        match self {
            DropTarget::TopLevel => Location::TopLevel,
            DropTarget::Module { id, .. } => Location::InModule(id.clone()),
        }
    }
}

/// The module order a drop would produce, for rendering while hovering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPreview {
    pub from: usize,
    pub to: usize,
    pub order: Vec<ModuleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropEffect {
    Placed(PlacementOutcome),
    Reordered { from: usize, to: usize },
    Ignored,
}

/// At most one drag in flight.
#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<DragPayload>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag, replacing any payload left over from an unfinished one.
    pub fn begin(&mut self, payload: DragPayload) {
        debug!(?payload, "drag started");
        self.active = Some(payload);
    }

    pub fn active(&self) -> Option<&DragPayload> {
        self.active.as_ref()
    }

    pub fn hover(&self, modules: &ModuleStore, target: &DropTarget) -> Option<ReorderPreview> {
        let (DragPayload::Module { id, .. }, DropTarget::Module { id: over, .. }) =
            (self.active.as_ref()?, target)
        else {
            return None;
        };
        let from = modules.position(id)?;
        let to = modules.position(over)?;
        let mut order = modules.ids();
        if from == to || !reorder(&mut order, from, to) {
            return None;
        }
        debug!(from, to, "reorder preview");
        Some(ReorderPreview { from, to, order })
    }

    pub fn drop(
        &mut self,
        resources: &mut ResourceStore,
        modules: &mut ModuleStore,
        target: &DropTarget,
    ) -> DropEffect {
        let Some(payload) = self.active.take() else {
            debug!("drop without an active drag");
            return DropEffect::Ignored;
        };

        match (payload, target) {
            (DragPayload::Resource { id, module_id }, _) => {
                let request =
                    PlacementRequest::new(id, Location::from_module_id(module_id), target.location());
                DropEffect::Placed(place_resource(resources, modules, &request))
            }
            (DragPayload::Module { id, .. }, DropTarget::Module { id: over, .. }) => {
                // Indices on both sides may be stale; current positions of
                // the two ids are authoritative.
                let (Some(from), Some(to)) = (modules.position(&id), modules.position(over))
                else {
                    return DropEffect::Ignored;
                };
                if from != to && modules.reorder(from, to) {
                    DropEffect::Reordered { from, to }
                } else {
                    DropEffect::Ignored
                }
            }
            (DragPayload::Module { .. }, DropTarget::TopLevel) => DropEffect::Ignored,
        }
    }

    /// The drag ended outside any target.
    pub fn cancel(&mut self) -> Option<DragPayload> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Module, Resource};

    fn course() -> (ResourceStore, ModuleStore) {
        let mut modules = ModuleStore::new();
        for id in ["m1", "m2", "m3"] {
            modules.add(Module::new(format!("Week {}", id)).with_id(id)).unwrap();
        }
        let mut resources = ResourceStore::new();
        resources
            .add(Resource::link("Syllabus", "https://x.edu").with_id("r1"))
            .unwrap();
        (resources, modules)
    }

    fn module_target(modules: &ModuleStore, id: &str) -> DropTarget {
        let id = ModuleId::from(id);
        let index = modules.position(&id).unwrap();
        DropTarget::Module { id, index }
    }

    #[test]
    fn resource_drop_places_into_module() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        session.begin(DragPayload::resource("r1", &Location::TopLevel));

        let target = module_target(&modules, "m2");
        let effect = session.drop(&mut resources, &mut modules, &target);

        assert!(matches!(effect, DropEffect::Placed(ref o) if o.is_moved()));
        assert!(resources.is_empty());
        assert_eq!(modules.locate(&"r1".into()).map(|m| m.as_str()), Some("m2"));
        assert!(session.active().is_none());
    }

    #[test]
    fn second_drop_without_begin_is_ignored() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        let target = module_target(&modules, "m1");
        session.begin(DragPayload::resource("r1", &Location::TopLevel));
        session.drop(&mut resources, &mut modules, &target);

        assert_eq!(session.drop(&mut resources, &mut modules, &target), DropEffect::Ignored);
    }

    #[test]
    fn hover_previews_without_mutating() {
        let (_, modules) = course();
        let mut session = DragSession::new();
        session.begin(DragPayload::Module {
            id: "m1".into(),
            index: 0,
        });
        let before = modules.clone();

        let target = DropTarget::Module {
            id: "m3".into(),
            index: 2,
        };
        let preview = session.hover(&modules, &target).unwrap();
        assert_eq!(session.hover(&modules, &target), Some(preview.clone()));
        let order: Vec<_> = preview.order.iter().map(|id| id.as_str()).collect();
        assert_eq!(order, vec!["m2", "m3", "m1"]);
        assert_eq!(modules, before);

        let own = DropTarget::Module {
            id: "m1".into(),
            index: 0,
        };
        assert!(session.hover(&modules, &own).is_none());
    }

    #[test]
    fn module_drop_uses_current_position() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        // stale index in payload
        session.begin(DragPayload::Module {
            id: "m3".into(),
            index: 0,
        });
        let target = DropTarget::Module {
            id: "m1".into(),
            index: 0,
        };

        let effect = session.drop(&mut resources, &mut modules, &target);
        assert_eq!(effect, DropEffect::Reordered { from: 2, to: 0 });
        let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m3", "m1", "m2"]);
    }

    #[test]
    fn module_drop_resolves_target_by_id() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        session.begin(DragPayload::Module {
            id: "m1".into(),
            index: 0,
        });
        // target index points at m2, but the target is m3
        let target = DropTarget::Module {
            id: "m3".into(),
            index: 1,
        };
        assert_eq!(
            session.hover(&modules, &target).map(|p| p.to),
            Some(2)
        );

        let effect = session.drop(&mut resources, &mut modules, &target);
        assert_eq!(effect, DropEffect::Reordered { from: 0, to: 2 });
        let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m3", "m1"]);
    }

    #[test]
    fn module_drop_on_missing_target_is_ignored() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        session.begin(DragPayload::Module {
            id: "m1".into(),
            index: 0,
        });
        let target = DropTarget::Module {
            id: "gone".into(),
            index: 2,
        };
        let before = modules.clone();
        assert_eq!(session.drop(&mut resources, &mut modules, &target), DropEffect::Ignored);
        assert_eq!(modules, before);
    }

    #[test]
    fn module_over_top_level_is_ignored() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        session.begin(DragPayload::Module {
            id: "m1".into(),
            index: 0,
        });
        let before = modules.clone();
        assert_eq!(
            session.drop(&mut resources, &mut modules, &DropTarget::TopLevel),
            DropEffect::Ignored
        );
        assert_eq!(modules, before);
    }

    #[test]
    fn cancel_discards_payload() {
        let (mut resources, mut modules) = course();
        let mut session = DragSession::new();
        session.begin(DragPayload::resource("r1", &Location::TopLevel));
        assert!(session.cancel().is_some());

        let target = module_target(&modules, "m1");
        assert_eq!(session.drop(&mut resources, &mut modules, &target), DropEffect::Ignored);
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn payload_json_is_kind_tagged() {
        let payload: DragPayload =
            serde_json::from_str(r#"{"kind":"resource","id":"r1","moduleId":"m1"}"#).unwrap();
        assert_eq!(payload, DragPayload::resource("r1", &Location::InModule("m1".into())));

        let json = serde_json::to_value(DragPayload::resource("r2", &Location::TopLevel)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "resource", "id": "r2"}));
    }
}
