use thiserror::Error;

/// The taxonomy of failures the Manager can raise. Every variant rolls
/// back the transaction in progress; nothing here is retried internally.
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("item '{key}' not found under parent '{parent_key}'")]
    NotFoundUnderParent { key: String, parent_key: String },

    #[error("{entity} '{key}' already exists")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("item '{key}' has subitems and cannot receive a manual status change")]
    HasSubitems { key: String },

    #[error(
        "cannot archive list '{list_key}': incomplete tasks. Incomplete: {incomplete}/{total} tasks. Use force=true to archive anyway"
    )]
    IncompletePrecondition {
        list_key: String,
        incomplete: usize,
        total: usize,
    },

    #[error("list '{key}' is already archived")]
    AlreadyArchived { key: String },

    #[error("dependency '{dependent_key}' -> '{required_key}' would create a cycle")]
    WouldCycle {
        dependent_key: String,
        required_key: String,
    },

    #[error("storage error")]
    Storage(#[from] sea_orm::DbErr),
}

pub type Result<T> = std::result::Result<T, ManagerError>;
