use std::collections::{BTreeSet, HashSet};

use coursekit::model::{Location, Module, Resource, ResourceId};
use coursekit::placement::{current_location, place_resource, PlacementRequest};
use coursekit::store::{ModuleStore, ResourceStore};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddResource { n: u8, into: Option<usize> },
    AddModule(u8),
    Move { pick: usize, target: Option<usize>, stale: bool },
    Reorder(usize, usize),
    DeleteModule(usize),
    DeleteResource(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), proptest::option::of(0usize..8))
            .prop_map(|(n, into)| Op::AddResource { n, into }),
        any::<u8>().prop_map(Op::AddModule),
        (0usize..64, proptest::option::of(0usize..8), any::<bool>())
            .prop_map(|(pick, target, stale)| Op::Move { pick, target, stale }),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
        (0usize..8).prop_map(Op::DeleteModule),
        (0usize..64).prop_map(Op::DeleteResource),
    ]
}

fn move_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..64, proptest::option::of(0usize..8), any::<bool>())
            .prop_map(|(pick, target, stale)| Op::Move { pick, target, stale }),
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
    ]
}

struct Course {
    resources: ResourceStore,
    modules: ModuleStore,
}

impl Course {
    fn seeded() -> Self {
        let mut modules = ModuleStore::new();
        let mut resources = ResourceStore::new();
        for m in 0..3 {
            modules.add(Module::new(format!("Module {}", m))).unwrap();
        }
        for r in 0..6 {
            let link = Resource::link(format!("R{}", r), format!("https://r{}.example", r));
            match r % 3 {
                0 => resources.add(link).unwrap(),
                i => {
                    let id = modules.get_at(i).unwrap().id.clone();
                    modules.add_resource_to(&id, link).unwrap();
                }
            }
        }
        Self { resources, modules }
    }

    fn all_ids(&self) -> Vec<ResourceId> {
        self.modules
            .iter()
            .flat_map(|m| m.resources().iter())
            .chain(self.resources.iter())
            .map(|r| r.id.clone())
            .collect()
    }

    fn module_at(&self, i: usize) -> Option<Location> {
        if self.modules.is_empty() {
            return None;
        }
        let module = self.modules.get_at(i % self.modules.len())?;
        Some(module.location())
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::AddResource { n, into } => {
                let link = Resource::link(format!("R{}", n), format!("https://r{}.example", n));
                match into.and_then(|i| self.module_at(i)) {
                    Some(Location::InModule(id)) => {
                        let _ = self.modules.add_new_resource_to(&id, link);
                    }
                    _ => {
                        let _ = self.resources.add(link);
                    }
                }
            }
            Op::AddModule(n) => {
                let _ = self.modules.add(Module::new(format!("Module {}", n)));
            }
            Op::Move { pick, target, stale } => {
                let ids = self.all_ids();
                if ids.is_empty() {
                    return;
                }
                let id = ids[pick % ids.len()].clone();
                let Some(actual) = current_location(&self.resources, &self.modules, &id) else {
                    return;
                };
                let source = if *stale { Location::TopLevel } else { actual };
                let target = target
                    .and_then(|i| self.module_at(i))
                    .unwrap_or(Location::TopLevel);
                place_resource(
                    &mut self.resources,
                    &mut self.modules,
                    &PlacementRequest::new(id, source, target),
                );
            }
            Op::Reorder(a, b) => {
                self.modules.reorder(*a, *b);
            }
            Op::DeleteModule(i) => {
                if let Some(Location::InModule(id)) = self.module_at(*i) {
                    self.modules.remove(&id, &mut self.resources);
                }
            }
            Op::DeleteResource(pick) => {
                let ids = self.resources.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
                if !ids.is_empty() {
                    self.resources.remove(&ids[pick % ids.len()]);
                }
            }
        }
    }

    fn assert_invariants(&self) {
        let ids = self.all_ids();
        let distinct: HashSet<_> = ids.iter().collect();
        assert_eq!(distinct.len(), ids.len(), "a resource is held twice: {:?}", ids);

        for module in self.modules.iter() {
            for resource in module.resources() {
                assert_eq!(resource.location, module.location());
            }
        }
        assert!(self.resources.iter().all(|r| r.location.is_top_level()));

        let module_ids: HashSet<_> = self.modules.iter().map(|m| &m.id).collect();
        assert_eq!(module_ids.len(), self.modules.len());
    }
}

proptest! {
    #[test]
    fn random_operations_keep_ids_unique(ops in proptest::collection::vec(op(), 0..60)) {
        let mut course = Course::seeded();
        for op in &ops {
            course.apply(op);
            course.assert_invariants();
        }
    }

    #[test]
    fn moves_conserve_resources(ops in proptest::collection::vec(move_op(), 0..60)) {
        let mut course = Course::seeded();
        let before: BTreeSet<_> = course.all_ids().into_iter().collect();
        let count = course.all_ids().len();

        for op in &ops {
            course.apply(op);
        }

        let after: BTreeSet<_> = course.all_ids().into_iter().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(course.all_ids().len(), count);
    }

    #[test]
    fn moving_to_current_container_changes_nothing(pick in 0usize..64) {
        let mut course = Course::seeded();
        let ids = course.all_ids();
        let id = ids[pick % ids.len()].clone();
        let here = current_location(&course.resources, &course.modules, &id).unwrap();
        let (resources, modules) = (course.resources.clone(), course.modules.clone());

        place_resource(
            &mut course.resources,
            &mut course.modules,
            &PlacementRequest::new(id, here.clone(), here),
        );
        prop_assert_eq!(&course.resources, &resources);
        prop_assert_eq!(&course.modules, &modules);
    }
}
