use crate::error::Result;
use std::path::PathBuf;

/// Raw key-value persistence, in the spirit of browser local storage.
///
/// Backends only move strings around. Parsing, defaults for corrupt data,
/// and deciding *when* to write all live in [`super::CourseStore`].
pub trait StorageBackend {
    /// Returns the stored value, or `Ok(None)` when the key was never written.
    /// Errors are reserved for actual I/O failures.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key`.
    /// MUST be atomic so a crash never leaves a half-written value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Where the value lives, for display. Virtual for in-memory backends.
    fn location(&self, key: &str) -> PathBuf;
}
