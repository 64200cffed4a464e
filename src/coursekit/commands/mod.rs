//! # Command Layer
//!
//! Every course operation lives here as a plain function over a
//! [`CourseStore`](crate::store::CourseStore). Commands validate input,
//! mutate the stores through their own operations, persist, and describe
//! what happened in a [`CmdResult`].
//!
//! Commands never print, prompt or exit. Destructive commands take a
//! [`Confirmation`] that the UI obtained beforehand; a declined one returns
//! an informational result with nothing changed.
//!
//! Tests for each command sit next to it and run against
//! [`MemBackend`](crate::store::mem_backend::MemBackend).
//!
//! - [`modules`]: create, rename, delete, reorder modules
//! - [`resources`]: add links and files, edit, delete
//! - [`move_resource`]: place a resource in a module or back at top level
//! - [`list`]: the course outline, optionally filtered
//! - [`search`]: outline filtered by a query
//! - [`doctor`]: write repaired data back to storage
//! - [`helpers`]: module and resource selectors

use serde::Serialize;

use crate::model::{Module, ModuleId, Resource};

pub mod doctor;
pub mod helpers;
pub mod list;
pub mod modules;
pub mod move_resource;
pub mod resources;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// The UI's answer to "are you sure?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// One module as shown in an outline, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineModule {
    pub position: usize,
    pub id: ModuleId,
    pub name: String,
    /// Resources to show: all of them, or the matching ones when searching.
    pub resources: Vec<Resource>,
    /// How many resources the module holds in total.
    pub total: usize,
}

/// A snapshot of the course for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub query: Option<String>,
    pub modules: Vec<OutlineModule>,
    pub resources: Vec<Resource>,
}

impl Outline {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.resources.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_modules: Vec<Module>,
    pub affected_resources: Vec<Resource>,
    pub outline: Option<Outline>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_modules(mut self, modules: Vec<Module>) -> Self {
        self.affected_modules = modules;
        self
    }

    pub fn with_affected_resources(mut self, resources: Vec<Resource>) -> Self {
        self.affected_resources = resources;
        self
    }

    pub fn with_outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    pub(crate) fn cancelled() -> Self {
        Self::default().with_message(CmdMessage::info("Cancelled, nothing was changed."))
    }
}
