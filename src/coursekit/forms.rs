//! # Forms
//!
//! The form collaborators (module, link, upload, and edit dialogs) submit
//! their raw input through these types. Validation collects every failing
//! field before reporting, so a UI can highlight all of them at once, and
//! nothing here touches a store.
//!
//! Validated forms turn into either a trimmed module name, a new
//! [`Resource`] plus its requested [`Location`], or a [`ResourcePatch`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CourseError, Result};
use crate::model::{FileDescriptor, Location, ModuleId, Resource, ResourcePatch, ResourceType};

pub const REQUIRED_FIELD: &str = "This field is required";
pub const MIN_LENGTH: &str = "Must be at least 2 characters long";
pub const INVALID_URL: &str = "Please enter a valid URL";
pub const MISSING_FILE: &str = "Please select a file";
pub const INVALID_FILE_TYPE: &str =
    "File type not supported. Please upload PDF, images, or documents.";
pub const FILE_TOO_LARGE: &str = "File size must be less than 10MB";

pub const MIN_MODULE_NAME_LEN: usize = 2;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub fn default_allowed_file_types() -> Vec<String> {
    [
        "application/pdf",
        "image/jpeg",
        "image/jpg",
        "image/png",
        "image/gif",
        "text/plain",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$")
        .expect("url pattern is valid")
});

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(value)` when no field failed, otherwise a validation error.
    pub fn into_result<T>(self, value: T) -> Result<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(CourseError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Limits applied to uploaded file descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub max_file_size: u64,
    pub allowed_file_types: Vec<String>,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_file_types: default_allowed_file_types(),
        }
    }
}

impl FileRules {
    pub fn check(&self, file: &FileDescriptor) -> std::result::Result<(), &'static str> {
        if !self.allowed_file_types.iter().any(|t| t == &file.file_type) {
            return Err(INVALID_FILE_TYPE);
        }
        if file.file_size > self.max_file_size {
            return Err(FILE_TOO_LARGE);
        }
        Ok(())
    }
}

/// Checks a module name and returns it trimmed.
pub fn validate_module_name(name: &str) -> Result<String> {
    let mut errors = FieldErrors::new();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.add("name", REQUIRED_FIELD);
    } else if trimmed.chars().count() < MIN_MODULE_NAME_LEN {
        errors.add("name", MIN_LENGTH);
    }
    errors.into_result(trimmed.to_string())
}

pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url.trim())
}

/// Prefixes `https://` unless the url already names a scheme starting with
/// `http`.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

fn check_url(errors: &mut FieldErrors, url: &str) {
    if url.trim().is_empty() {
        errors.add("url", REQUIRED_FIELD);
    } else if !is_valid_url(url) {
        errors.add("url", INVALID_URL);
    }
}

fn check_title(errors: &mut FieldErrors, title: &str) {
    if title.trim().is_empty() {
        errors.add("title", REQUIRED_FIELD);
    }
}

/// Renders a byte count the way listings show it: `0 Bytes`, `1.5 KB`,
/// `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}

#[derive(Debug, Clone, Default)]
pub struct ModuleForm {
    pub name: String,
}

impl ModuleForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<String> {
        validate_module_name(&self.name)
    }
}

/// A validated request to create a resource somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub resource: Resource,
    pub location: Location,
}

#[derive(Debug, Clone, Default)]
pub struct LinkForm {
    pub title: String,
    pub url: String,
    pub module_id: Option<ModuleId>,
}

impl LinkForm {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            module_id: None,
        }
    }

    pub fn in_module(mut self, module_id: ModuleId) -> Self {
        self.module_id = Some(module_id);
        self
    }

    pub fn validate(&self) -> Result<NewResource> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, &self.title);
        check_url(&mut errors, &self.url);
        let location = Location::from_module_id(self.module_id.clone());
        errors.into_result(NewResource {
            resource: Resource::link(self.title.trim(), normalize_url(&self.url)),
            location,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileUploadForm {
    pub title: String,
    pub file: Option<FileDescriptor>,
    pub module_id: Option<ModuleId>,
}

impl FileUploadForm {
    pub fn new(title: impl Into<String>, file: FileDescriptor) -> Self {
        Self {
            title: title.into(),
            file: Some(file),
            module_id: None,
        }
    }

    pub fn in_module(mut self, module_id: ModuleId) -> Self {
        self.module_id = Some(module_id);
        self
    }

    /// Title offered when the user has not typed one: the file name minus
    /// its last extension.
    pub fn suggested_title(&self) -> Option<String> {
        let name = &self.file.as_ref()?.file_name;
        let stem = match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name.as_str(),
        };
        Some(stem.to_string())
    }

    pub fn validate(&self, rules: &FileRules) -> Result<NewResource> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, &self.title);
        match &self.file {
            None => errors.add("file", MISSING_FILE),
            Some(file) => {
                if let Err(message) = rules.check(file) {
                    errors.add("file", message);
                }
            }
        }
        if !errors.is_empty() {
            return Err(CourseError::Validation(errors));
        }

        let file = self.file.clone().unwrap_or_else(|| FileDescriptor::new("", 0, ""));
        Ok(NewResource {
            resource: Resource::file(self.title.trim(), file),
            location: Location::from_module_id(self.module_id.clone()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceEditForm {
    pub title: String,
    pub url: Option<String>,
}

impl ResourceEditForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Validates against the type of the resource being edited. Links must
    /// keep a valid url; for files the url field is ignored.
    pub fn validate(&self, resource_type: ResourceType) -> Result<ResourcePatch> {
        let mut errors = FieldErrors::new();
        check_title(&mut errors, &self.title);
        let url = match resource_type {
            ResourceType::Link => {
                let raw = self.url.as_deref().unwrap_or("");
                check_url(&mut errors, raw);
                Some(normalize_url(raw))
            }
            ResourceType::File => None,
        };
        errors.into_result(ResourcePatch {
            title: self.title.trim().to_string(),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_rules() {
        assert_eq!(validate_module_name("  Week 1 ").unwrap(), "Week 1");
        match validate_module_name("   ") {
            Err(CourseError::Validation(errors)) => {
                assert_eq!(errors.get("name"), Some(REQUIRED_FIELD))
            }
            other => panic!("unexpected: {:?}", other),
        }
        match validate_module_name(" a ") {
            Err(CourseError::Validation(errors)) => assert_eq!(errors.get("name"), Some(MIN_LENGTH)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn url_pattern_accepts_common_forms() {
        assert!(is_valid_url("https://x.edu"));
        assert!(is_valid_url("example.com/path/to page"));
        assert!(is_valid_url("HTTP://Docs.Example.org/"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("ftp://x.edu"));
    }

    #[test]
    fn normalize_prefixes_https() {
        assert_eq!(normalize_url(" x.edu "), "https://x.edu");
        assert_eq!(normalize_url("http://x.edu"), "http://x.edu");
    }

    #[test]
    fn link_form_collects_all_errors() {
        let err = LinkForm::new(" ", "nope").validate().unwrap_err();
        match err {
            CourseError::Validation(errors) => {
                let fields: Vec<_> = errors.fields().collect();
                assert_eq!(fields, vec!["title", "url"]);
                assert_eq!(errors.get("url"), Some(INVALID_URL));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn link_form_builds_located_resource() {
        let new = LinkForm::new(" Syllabus ", "x.edu")
            .in_module("m1".into())
            .validate()
            .unwrap();
        assert_eq!(new.resource.title, "Syllabus");
        assert_eq!(new.resource.url(), Some("https://x.edu"));
        assert_eq!(new.location, Location::InModule("m1".into()));
    }

    #[test]
    fn upload_form_checks_type_and_size() {
        let rules = FileRules::default();
        let ok = FileUploadForm::new("Notes", FileDescriptor::new("n.pdf", 100, "application/pdf"));
        assert!(ok.validate(&rules).is_ok());

        let exe = FileUploadForm::new("Tool", FileDescriptor::new("t.exe", 100, "application/x-msdownload"));
        match exe.validate(&rules).unwrap_err() {
            CourseError::Validation(errors) => assert_eq!(errors.get("file"), Some(INVALID_FILE_TYPE)),
            other => panic!("unexpected: {:?}", other),
        }

        let big = FileUploadForm::new(
            "Video",
            FileDescriptor::new("v.png", DEFAULT_MAX_FILE_SIZE + 1, "image/png"),
        );
        match big.validate(&rules).unwrap_err() {
            CourseError::Validation(errors) => assert_eq!(errors.get("file"), Some(FILE_TOO_LARGE)),
            other => panic!("unexpected: {:?}", other),
        }

        let missing = FileUploadForm {
            title: "x".into(),
            ..Default::default()
        };
        match missing.validate(&rules).unwrap_err() {
            CourseError::Validation(errors) => assert_eq!(errors.get("file"), Some(MISSING_FILE)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn suggested_title_strips_last_extension() {
        let form = FileUploadForm::new("", FileDescriptor::new("week.1.notes.pdf", 1, "application/pdf"));
        assert_eq!(form.suggested_title().as_deref(), Some("week.1.notes"));
        let form = FileUploadForm::new("", FileDescriptor::new(".bashrc", 1, "text/plain"));
        assert_eq!(form.suggested_title().as_deref(), Some(".bashrc"));
    }

    #[test]
    fn edit_form_ignores_url_for_files() {
        let patch = ResourceEditForm::new("Renamed")
            .validate(ResourceType::File)
            .unwrap();
        assert_eq!(patch.url, None);

        let err = ResourceEditForm::new("Renamed")
            .validate(ResourceType::Link)
            .unwrap_err();
        assert!(matches!(err, CourseError::Validation(_)));
    }

    #[test]
    fn file_sizes_render_like_listings() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }
}
