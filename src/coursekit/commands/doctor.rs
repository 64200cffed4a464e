use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CourseStore, StorageBackend};

/// Reports the repairs made while loading and writes them back.
pub fn run<B: StorageBackend>(store: &mut CourseStore<B>) -> Result<CmdResult> {
    let report = store.load_report();
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    store.save()?;
    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    if report.unreadable > 0 {
        result.add_message(CmdMessage::error(format!(
            "  - {} unreadable record(s) dropped from storage",
            report.unreadable
        )));
    }
    let lines = [
        (report.duplicate_modules, "duplicate module(s) removed"),
        (report.duplicate_resources, "duplicate resource(s) removed"),
        (report.relocated, "nested resource(s) re-tagged with their module"),
        (report.adopted, "resource(s) moved into the module they were tagged with"),
        (report.orphans_cleared, "resource(s) tagged with a missing module returned to unassigned"),
    ];
    for (count, what) in lines {
        if count > 0 {
            result.add_message(CmdMessage::info(format!("  - {} {}", count, what)));
        }
    }
    Ok(result)
}
