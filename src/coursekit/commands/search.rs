use super::list::outline_of;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::CourseView;
use crate::store::{CourseStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &CourseStore<B>, query: &str) -> Result<CmdResult> {
    let view = CourseView::project(store.modules(), store.resources(), query);
    let outline = outline_of(store, &view);
    let mut result = CmdResult::default();

    if !view.is_searching() {
        // Empty query: same as a plain listing.
        return Ok(result.with_outline(outline));
    }
    if !view.has_results() {
        result.add_message(CmdMessage::info(format!("No results found for '{}'", query)));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} module(s) and {} unassigned resource(s) match '{}'",
            outline.modules.len(),
            outline.resources.len(),
            query
        )));
    }
    Ok(result.with_outline(outline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::move_resource;
    use crate::commands::helpers::{Destination, ModuleSelector};
    use crate::test_utils::week_one_course;

    #[test]
    fn finds_module_through_nested_resource() {
        let mut store = week_one_course();
        move_resource::run(&mut store, "r1", &Destination::Module(ModuleSelector::Position(1))).unwrap();

        let result = run(&store, "x.edu").unwrap();
        let outline = result.outline.unwrap();
        assert_eq!(outline.modules.len(), 1);
        assert_eq!(outline.modules[0].resources.len(), 1);
        assert!(outline.resources.is_empty());
    }

    #[test]
    fn module_found_by_name_lists_no_unmatched_resources() {
        let mut store = week_one_course();
        move_resource::run(&mut store, "r1", &Destination::Module(ModuleSelector::Position(1))).unwrap();

        let result = run(&store, "week").unwrap();
        let outline = result.outline.unwrap();
        assert_eq!(outline.modules.len(), 1);
        assert!(outline.modules[0].resources.is_empty());
        assert_eq!(outline.modules[0].total, 1);
    }

    #[test]
    fn reports_no_results() {
        let store = week_one_course();
        let result = run(&store, "quantum").unwrap();
        assert!(result.outline.unwrap().is_empty());
        assert!(result.messages[0].content.contains("No results"));
    }

    #[test]
    fn empty_query_lists_everything() {
        let store = week_one_course();
        let result = run(&store, "").unwrap();
        let outline = result.outline.unwrap();
        assert_eq!(outline.modules.len(), 1);
        assert_eq!(outline.resources.len(), 1);
        assert!(result.messages.is_empty());
    }
}
