use tracing::info;

use super::helpers::{resolve_module, ModuleSelector};
use super::{CmdMessage, CmdResult, Confirmation};
use crate::error::{CourseError, Result};
use crate::forms::ModuleForm;
use crate::model::Module;
use crate::store::{CourseStore, StorageBackend};

pub fn create<B: StorageBackend>(store: &mut CourseStore<B>, form: &ModuleForm) -> Result<CmdResult> {
    let module = Module::new(form.validate()?);
    store.modules_mut().add(module.clone())?;
    store.commit();
    info!(module = %module.id, name = %module.name, "module created");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Created module '{}'", module.name)))
        .with_affected_modules(vec![module]))
}

pub fn rename<B: StorageBackend>(
    store: &mut CourseStore<B>,
    selector: &ModuleSelector,
    form: &ModuleForm,
) -> Result<CmdResult> {
    let (_, id) = resolve_module(store.modules(), selector)?;
    let name = form.validate()?;
    let module = store.modules_mut().update(&id, &name)?.clone();
    store.commit();
    info!(module = %id, name = %module.name, "module renamed");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Renamed module to '{}'", module.name)))
        .with_affected_modules(vec![module]))
}

/// Deletes a module. Its resources go back to the unassigned list.
pub fn delete<B: StorageBackend>(
    store: &mut CourseStore<B>,
    selector: &ModuleSelector,
    confirmation: Confirmation,
) -> Result<CmdResult> {
    let (_, id) = resolve_module(store.modules(), selector)?;
    if confirmation == Confirmation::Declined {
        return Ok(CmdResult::cancelled());
    }

    let (resources, modules) = store.parts_mut();
    let removed = modules
        .remove(&id, resources)
        .ok_or_else(|| CourseError::ModuleNotFound(id.clone()))?;
    store.commit();
    info!(module = %id, repatriated = removed.repatriated.len(), "module deleted");

    let mut result = CmdResult::default()
        .with_message(CmdMessage::success(format!("Deleted module '{}'", removed.name)));
    if !removed.repatriated.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} resource(s) moved back to unassigned",
            removed.repatriated.len()
        )));
        let returned = removed
            .repatriated
            .iter()
            .filter_map(|rid| store.resources().get(rid).cloned())
            .collect();
        result = result.with_affected_resources(returned);
    }
    Ok(result)
}

/// Moves a module to a 1-based position.
pub fn reorder<B: StorageBackend>(
    store: &mut CourseStore<B>,
    selector: &ModuleSelector,
    position: usize,
) -> Result<CmdResult> {
    let (from, id) = resolve_module(store.modules(), selector)?;
    let len = store.modules().len();
    if position == 0 || position > len {
        return Err(CourseError::Api(format!(
            "Position {} is out of range (1-{})",
            position, len
        )));
    }

    let to = position - 1;
    let name = store
        .modules()
        .get(&id)
        .map(|m| m.name.clone())
        .unwrap_or_default();
    if from == to {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Module '{}' is already at position {}",
            name, position
        ))));
    }

    store.modules_mut().reorder(from, to);
    store.commit();
    info!(module = %id, from, to, "module reordered");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Moved module '{}' to position {}",
        name, position
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Resource};
    use crate::test_utils::{mem_course, week_one_course};

    fn names<B: StorageBackend>(store: &CourseStore<B>) -> Vec<String> {
        store.modules().iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn create_persists_module() {
        let mut store = mem_course();
        let result = create(&mut store, &ModuleForm::new("  Week 1 ")).unwrap();

        assert_eq!(result.affected_modules[0].name, "Week 1");
        assert_eq!(names(&store), vec!["Week 1"]);
        assert_eq!(store.backend().write_count(), 2);
    }

    #[test]
    fn create_rejects_short_name_without_writing() {
        let mut store = mem_course();
        let err = create(&mut store, &ModuleForm::new(" a ")).unwrap_err();
        match err {
            CourseError::Validation(fields) => {
                assert_eq!(fields.get("name"), Some(crate::forms::MIN_LENGTH))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.modules().is_empty());
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn rename_by_position() {
        let mut store = week_one_course();
        rename(&mut store, &ModuleSelector::Position(1), &ModuleForm::new("Intro")).unwrap();
        assert_eq!(names(&store), vec!["Intro"]);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut store = week_one_course();
        let result = delete(&mut store, &ModuleSelector::Position(1), Confirmation::Declined).unwrap();
        assert!(result.messages[0].content.contains("Cancelled"));
        assert_eq!(store.modules().len(), 1);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn delete_repatriates_resources() {
        let mut store = week_one_course();
        let r1 = store.resources_mut().take_out(&"r1".into()).unwrap();
        store.modules_mut().add_resource_to(&"m1".into(), r1).unwrap();

        let result = delete(&mut store, &ModuleSelector::Id("m1".into()), Confirmation::Confirmed).unwrap();

        assert!(store.modules().is_empty());
        assert_eq!(result.affected_resources.len(), 1);
        let r1 = store.resources().get(&"r1".into()).unwrap();
        assert_eq!(r1.location, Location::TopLevel);
    }

    #[test]
    fn reorder_to_position() {
        let mut store = mem_course();
        for name in ["Aa", "Bb", "Cc"] {
            create(&mut store, &ModuleForm::new(name)).unwrap();
        }
        reorder(&mut store, &ModuleSelector::Position(1), 3).unwrap();
        assert_eq!(names(&store), vec!["Bb", "Cc", "Aa"]);

        assert!(reorder(&mut store, &ModuleSelector::Position(1), 4).is_err());
        let same = reorder(&mut store, &ModuleSelector::Position(2), 2).unwrap();
        assert!(same.messages[0].content.contains("already"));
    }

    #[test]
    fn unknown_module_is_an_error() {
        let mut store = mem_course();
        store
            .resources_mut()
            .add(Resource::link("A", "https://a.com"))
            .unwrap();
        assert!(delete(&mut store, &ModuleSelector::Position(1), Confirmation::Confirmed).is_err());
        assert_eq!(store.resources().len(), 1);
    }
}
