//! # Identifiers and Ordering
//!
//! Small, pure helpers shared by both stores and the placement engine.
//! Nothing in here knows about resources or modules specifically: anything
//! implementing [`HasId`] can be deduplicated, and any `Vec` can be
//! reordered or spliced.
//!
//! Index-based helpers never panic. A stale index coming from a drag event
//! leaves the sequences untouched and the helper reports `false`.

use std::collections::HashSet;
use std::hash::Hash;
use uuid::Uuid;

/// Items that carry a stable identity within a container.
pub trait HasId {
    type Id: Eq + Hash + Clone;

    fn id(&self) -> &Self::Id;
}

/// Returns a fresh identifier.
///
/// UUIDv7 is time-ordered, so ids sort roughly by creation time the way the
/// older millisecond-timestamp ids did, without the collision window.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Keeps the first occurrence of every id, preserving relative order.
pub fn dedupe_by_id<T: HasId>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect()
}

/// Moves the element at `from` so that it ends up at `to`.
///
/// Elements between the two positions shift by one to close the gap.
/// Returns `false` without touching the sequence when either index is out
/// of range. `from == to` is an allowed no-op and returns `true`.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

/// Splices `source[from]` into `target` at position `to`.
///
/// `to` is clamped to `target.len()`, so `usize::MAX` means "append".
pub fn transfer<T>(source: &mut Vec<T>, from: usize, target: &mut Vec<T>, to: usize) -> bool {
    if from >= source.len() {
        return false;
    }
    let item = source.remove(from);
    let at = to.min(target.len());
    target.insert(at, item);
    true
}
