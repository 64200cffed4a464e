//! # Configuration
//!
//! Course configuration is loaded with [`confique`], layering environment
//! variables over an optional `coursekit.toml` in the data directory over
//! compiled defaults.
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | `modules_key` | `COURSEKIT_MODULES_KEY` | `course-modules` |
//! | `resources_key` | `COURSEKIT_RESOURCES_KEY` | `course-resources` |
//! | `max_file_size` | `COURSEKIT_MAX_FILE_SIZE` | `10485760` |
//! | `allowed_file_types` | | PDF, images, plain text, Word |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CourseError, Result};
use crate::forms::{default_allowed_file_types, FileRules};

pub const CONFIG_FILE_NAME: &str = "coursekit.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CourseConfig {
    /// Storage key holding the module list.
    #[config(default = "course-modules", env = "COURSEKIT_MODULES_KEY")]
    pub modules_key: String,

    /// Storage key holding the unassigned resource list.
    #[config(default = "course-resources", env = "COURSEKIT_RESOURCES_KEY")]
    pub resources_key: String,

    /// Largest accepted upload, in bytes.
    #[config(default = 10485760, env = "COURSEKIT_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// MIME types accepted for uploads. When absent, PDF, common images,
    /// plain text and Word documents are accepted.
    pub allowed_file_types: Option<Vec<String>>,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            modules_key: "course-modules".to_string(),
            resources_key: "course-resources".to_string(),
            max_file_size: crate::forms::DEFAULT_MAX_FILE_SIZE,
            allowed_file_types: None,
        }
    }
}

impl CourseConfig {
    /// Loads env overrides, then `<dir>/coursekit.toml` if present, then
    /// defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        CourseConfig::builder()
            .env()
            .file(dir.join(CONFIG_FILE_NAME))
            .load()
            .map_err(|e| CourseError::Config(e.to_string()))
    }

    pub fn allowed_file_types(&self) -> Vec<String> {
        self.allowed_file_types
            .clone()
            .unwrap_or_else(default_allowed_file_types)
    }

    pub fn file_rules(&self) -> FileRules {
        FileRules {
            max_file_size: self.max_file_size,
            allowed_file_types: self.allowed_file_types(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_config_uses_fixed_keys() {
        let config = CourseConfig::default();
        assert_eq!(config.modules_key, "course-modules");
        assert_eq!(config.resources_key, "course-resources");
        assert_eq!(config.file_rules(), FileRules::default());
    }

    #[test]
    fn custom_file_types_replace_defaults() {
        let config = CourseConfig {
            allowed_file_types: Some(vec!["text/markdown".to_string()]),
            ..Default::default()
        };
        assert_eq!(config.allowed_file_types(), vec!["text/markdown"]);
    }

    #[test]
    fn loads_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "resources_key = \"unsorted\"\nmax_file_size = 2048\n",
        )
        .unwrap();

        let config = CourseConfig::load(dir.path()).unwrap();
        assert_eq!(config.resources_key, "unsorted");
        assert_eq!(config.max_file_size, 2048);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CourseConfig::load(dir.path()).unwrap();
        assert_eq!(config.modules_key, "course-modules");
    }
}
