use alloc::string::String;

use crate::ProjectId;

/// Errors produced while building a catalog or configuring a pager.
#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    /// A size option is out of range.
    #[error("invalid option `{field}`: {reason}")]
    InvalidOptions {
        field: &'static str,
        reason: &'static str,
    },

    /// Project ids must be positive.
    #[error("project at position {index} has invalid id 0")]
    InvalidProjectId { index: usize },

    #[error("duplicate project id {id}")]
    DuplicateProjectId { id: ProjectId },

    /// A detail page was requested without a usable `id` parameter.
    #[error("no project id provided")]
    MissingProjectId,

    #[error("project {id} not found")]
    ProjectNotFound { id: ProjectId },

    #[error("project {id} has no detail data")]
    MissingDetail { id: ProjectId },

    #[error("unknown category '{value}'")]
    UnknownCategory { value: String },

    /// The dataset document could not be decoded.
    #[cfg(feature = "json")]
    #[error("failed to decode project dataset: {0}")]
    Json(#[from] serde_json::Error),
}
