//! Stands in for a file picker: resolves a path into the descriptor the
//! library stores. File contents are never read.

use std::fs;
use std::path::Path;

use coursekit::error::{CourseError, Result};
use coursekit::model::FileDescriptor;

const MIME_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
];

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("application/octet-stream")
}

pub fn describe_file(path: &Path) -> Result<FileDescriptor> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(CourseError::Api(format!("{} is not a file", path.display())));
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CourseError::Api(format!("{} has no file name", path.display())))?;

    Ok(FileDescriptor::new(file_name, metadata.len(), mime_for(path)))
}
