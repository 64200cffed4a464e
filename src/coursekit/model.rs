//! # Domain Model
//!
//! A course is two parallel containers: an ordered list of [`Module`]s, each
//! owning its own ordered list of [`Resource`]s, and a flat list of
//! resources that have not been placed in any module yet.
//!
//! ## Placement
//!
//! Where a resource lives is an explicit [`Location`], not the presence or
//! absence of a field. The location always agrees with the container that
//! holds the resource; the stores rewrite it whenever a resource enters a
//! container.
//!
//! ## Persisted Shape
//!
//! Resources are written flat, the way browser clients have always stored
//! them:
//!
//! ```text
//! { "id": "…", "type": "link", "title": "Syllabus", "url": "https://x.edu" }
//! { "id": "…", "type": "file", "title": "Notes", "fileName": "notes.pdf",
//!   "fileSize": 2048, "fileType": "application/pdf", "moduleId": "…" }
//! ```
//!
//! `moduleId` is omitted for top-level resources. [`ResourceRecord`] is the
//! wire shape; conversion into [`Resource`] rejects links without a url and
//! files without a file name.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ordering::{generate_id, HasId};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn generate() -> Self {
                Self(generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identity of a resource. Stable across moves.
    ResourceId
);
string_id!(
    /// Identity of a module.
    ModuleId
);

/// The container a resource currently belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Location {
    #[default]
    TopLevel,
    InModule(ModuleId),
}

impl Location {
    pub fn from_module_id(module_id: Option<ModuleId>) -> Self {
        match module_id {
            Some(id) => Location::InModule(id),
            None => Location::TopLevel,
        }
    }

    pub fn module_id(&self) -> Option<&ModuleId> {
        match self {
            Location::TopLevel => None,
            Location::InModule(id) => Some(id),
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self, Location::TopLevel)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::TopLevel => write!(f, "top level"),
            Location::InModule(id) => write!(f, "module {}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Link,
    File,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Link => write!(f, "link"),
            ResourceType::File => write!(f, "file"),
        }
    }
}

/// What the file picker hands back for a selected file. Bytes are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

impl FileDescriptor {
    pub fn new(file_name: impl Into<String>, file_size: u64, file_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            file_type: file_type.into(),
        }
    }
}

/// Type-specific payload. Fixed at creation: edits never change the kind
/// or the file metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Link { url: String },
    File(FileDescriptor),
}

impl ResourceKind {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceKind::Link { .. } => ResourceType::Link,
            ResourceKind::File(_) => ResourceType::File,
        }
    }
}

/// Fields an edit form may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePatch {
    pub title: String,
    /// Ignored for file resources.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResourceRecord", into = "ResourceRecord")]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub kind: ResourceKind,
    pub location: Location,
}

impl Resource {
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: ResourceId::generate(),
            title: title.into(),
            kind: ResourceKind::Link { url: url.into() },
            location: Location::TopLevel,
        }
    }

    pub fn file(title: impl Into<String>, descriptor: FileDescriptor) -> Self {
        Self {
            id: ResourceId::generate(),
            title: title.into(),
            kind: ResourceKind::File(descriptor),
            location: Location::TopLevel,
        }
    }

    pub fn with_id(mut self, id: impl Into<ResourceId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn resource_type(&self) -> ResourceType {
        self.kind.resource_type()
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            ResourceKind::Link { url } => Some(url),
            ResourceKind::File(_) => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match &self.kind {
            ResourceKind::Link { .. } => None,
            ResourceKind::File(file) => Some(&file.file_name),
        }
    }

    /// Applies an edit. Only the title and a link's url are mutable.
    pub fn apply_patch(&mut self, patch: &ResourcePatch) {
        self.title = patch.title.clone();
        if let (ResourceKind::Link { url }, Some(new_url)) = (&mut self.kind, &patch.url) {
            *url = new_url.clone();
        }
    }

    /// Whether `other` would be a duplicate of this resource when both sit
    /// in the same container: same title, or same url between links, or same
    /// file name between files.
    pub fn conflicts_with(&self, other: &Resource) -> bool {
        if self.title == other.title {
            return true;
        }
        match (&self.kind, &other.kind) {
            (ResourceKind::Link { url: a }, ResourceKind::Link { url: b }) => a == b,
            (ResourceKind::File(a), ResourceKind::File(b)) => a.file_name == b.file_name,
            _ => false,
        }
    }
}

impl HasId for Resource {
    type Id = ResourceId;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Flat wire shape of a [`Resource`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    id: ResourceId,
    #[serde(rename = "type")]
    resource_type: ResourceType,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    module_id: Option<ModuleId>,
}

impl TryFrom<ResourceRecord> for Resource {
    type Error = String;

    fn try_from(record: ResourceRecord) -> std::result::Result<Self, Self::Error> {
        let kind = match record.resource_type {
            ResourceType::Link => ResourceKind::Link {
                url: record
                    .url
                    .ok_or_else(|| format!("link resource {} has no url", record.id))?,
            },
            ResourceType::File => ResourceKind::File(FileDescriptor {
                file_name: record
                    .file_name
                    .ok_or_else(|| format!("file resource {} has no fileName", record.id))?,
                file_size: record.file_size.unwrap_or(0),
                file_type: record.file_type.unwrap_or_default(),
            }),
        };

        Ok(Resource {
            id: record.id,
            title: record.title,
            kind,
            location: Location::from_module_id(record.module_id),
        })
    }
}

impl From<Resource> for ResourceRecord {
    fn from(resource: Resource) -> Self {
        let resource_type = resource.resource_type();
        let module_id = resource.location.module_id().cloned();
        let (url, file_name, file_size, file_type) = match resource.kind {
            ResourceKind::Link { url } => (Some(url), None, None, None),
            ResourceKind::File(file) => (
                None,
                Some(file.file_name),
                Some(file.file_size),
                Some(file.file_type),
            ),
        };

        ResourceRecord {
            id: resource.id,
            resource_type,
            title: resource.title,
            url,
            file_name,
            file_size,
            file_type,
            module_id,
        }
    }
}

/// A named, ordered container of resources. Its position in the course is
/// its index in the module store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    #[serde(default)]
    pub(crate) resources: Vec<Resource>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ModuleId::generate(),
            name: name.into(),
            resources: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ModuleId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn contains_resource(&self, id: &ResourceId) -> bool {
        self.resources.iter().any(|r| &r.id == id)
    }

    pub fn location(&self) -> Location {
        Location::InModule(self.id.clone())
    }
}

impl HasId for Module {
    type Id = ModuleId;

    fn id(&self) -> &ModuleId {
        &self.id
    }
}
