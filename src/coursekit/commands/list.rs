use super::{CmdMessage, CmdResult, Outline, OutlineModule};
use crate::error::Result;
use crate::search::CourseView;
use crate::store::{CourseStore, StorageBackend};

/// Builds the outline shown by `list` and `search`. Module positions are
/// their places in the full course, not in the filtered list.
pub fn outline<B: StorageBackend>(store: &CourseStore<B>, query: Option<&str>) -> Outline {
    let view = CourseView::project(store.modules(), store.resources(), query.unwrap_or(""));
    outline_of(store, &view)
}

/// Outline for an already projected view of `store`.
pub fn outline_of<B: StorageBackend>(store: &CourseStore<B>, view: &CourseView<'_>) -> Outline {
    let modules = view
        .modules
        .iter()
        .copied()
        .map(|module| OutlineModule {
            position: store.modules().position(&module.id).map_or(0, |i| i + 1),
            id: module.id.clone(),
            name: module.name.clone(),
            resources: view.module_resources(module).into_iter().cloned().collect(),
            total: module.resources().len(),
        })
        .collect();

    Outline {
        query: view.is_searching().then(|| view.query().to_string()),
        modules,
        resources: view.resources.iter().map(|r| (*r).clone()).collect(),
    }
}

pub fn run<B: StorageBackend>(store: &CourseStore<B>) -> Result<CmdResult> {
    let outline = outline(store, None);
    let mut result = CmdResult::default();
    if outline.is_empty() {
        result.add_message(CmdMessage::info(
            "Nothing here yet. Create a module or add a resource to get started.",
        ));
    }
    Ok(result.with_outline(outline))
}
