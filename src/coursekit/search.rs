//! Case-insensitive filtering of the course for a query string.
//!
//! A module matches when its name matches or when any of its resources does;
//! the module is kept whole and [`CourseView::module_resources`] narrows its
//! list for display with the resource predicate alone, so a module found by
//! name can show no resources. Nothing here mutates the stores.

use crate::model::{Module, Resource};
use crate::store::{ModuleStore, ResourceStore};

/// Substring match, ignoring case. `needle` must already be lowercase.
fn contains_lower(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(needle)
}

pub fn matches_text(text: &str, query: &str) -> bool {
    !text.is_empty() && !query.is_empty() && contains_lower(text, &query.to_lowercase())
}

/// Title, url or file name contains the query.
pub fn resource_matches(resource: &Resource, query: &str) -> bool {
    matches_text(&resource.title, query)
        || resource.url().is_some_and(|url| matches_text(url, query))
        || resource.file_name().is_some_and(|name| matches_text(name, query))
}

pub fn module_matches(module: &Module, query: &str) -> bool {
    matches_text(&module.name, query) || module.resources().iter().any(|r| resource_matches(r, query))
}

/// A filtered projection of the course. Borrowed from the stores, so it
/// must be rebuilt after any mutation.
#[derive(Debug, Clone)]
pub struct CourseView<'a> {
    pub modules: Vec<&'a Module>,
    pub resources: Vec<&'a Resource>,
    query: String,
}

impl<'a> CourseView<'a> {
    /// An empty query keeps everything.
    pub fn project(modules: &'a ModuleStore, resources: &'a ResourceStore, query: &str) -> Self {
        let query = query.to_string();
        if query.is_empty() {
            return Self {
                modules: modules.iter().collect(),
                resources: resources.iter().collect(),
                query,
            };
        }

        Self {
            modules: modules.iter().filter(|m| module_matches(m, &query)).collect(),
            resources: resources
                .iter()
                .filter(|r| resource_matches(r, &query))
                .collect(),
            query,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn has_results(&self) -> bool {
        !self.modules.is_empty() || !self.resources.is_empty()
    }

    /// The module's resources that match the query, or all of them when not
    /// searching.
    pub fn module_resources(&self, module: &'a Module) -> Vec<&'a Resource> {
        module
            .resources()
            .iter()
            .filter(|r| !self.is_searching() || resource_matches(r, &self.query))
            .collect()
    }
}
