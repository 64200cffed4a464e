use crate::forms::FieldErrors;
use crate::model::{ModuleId, ResourceId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Duplicate(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(ModuleId),

    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl CourseError {
    /// Conditions the user can fix by changing their input. The CLI renders
    /// these as warnings rather than hard errors.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CourseError::Validation(_) | CourseError::Duplicate(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;
