use chrono::NaiveDateTime;

use crate::error::{ManagerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntityType {
    List,
    Item,
}

impl HistoryEntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Item => "item",
        }
    }
}

impl std::fmt::Display for HistoryEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of mutations the Manager records. Every successful
/// mutating operation appends at least one of these in the same
/// transaction as the mutation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Created,
    Updated,
    StatusUpdated,
    ContentUpdated,
    Completed,
    Failed,
    Deleted,
    StatesCleared,
    RenameList,
    DependencyAdded,
    DependencyRemoved,
    Renamed,
    SubitemCreated,
    AutoCompleted,
    MovedToSubitem,
    Exported,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusUpdated => "status_updated",
            Self::ContentUpdated => "content_updated",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Deleted => "deleted",
            Self::StatesCleared => "states_cleared",
            Self::RenameList => "rename_list",
            Self::DependencyAdded => "dependency_added",
            Self::DependencyRemoved => "dependency_removed",
            Self::Renamed => "renamed",
            Self::SubitemCreated => "subitem_created",
            Self::AutoCompleted => "auto_completed",
            Self::MovedToSubitem => "moved_to_subitem",
            Self::Exported => "exported",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "status_updated" => Self::StatusUpdated,
            "content_updated" => Self::ContentUpdated,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "deleted" => Self::Deleted,
            "states_cleared" => Self::StatesCleared,
            "rename_list" => Self::RenameList,
            "dependency_added" => Self::DependencyAdded,
            "dependency_removed" => Self::DependencyRemoved,
            "renamed" => Self::Renamed,
            "subitem_created" => Self::SubitemCreated,
            "auto_completed" => Self::AutoCompleted,
            "moved_to_subitem" => Self::MovedToSubitem,
            "exported" => Self::Exported,
            other => {
                return Err(ManagerError::InvalidArgument(format!(
                    "unknown history action: {other}"
                )));
            }
        })
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An append-only record of a single mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i32,
    pub entity_type: HistoryEntityType,
    pub entity_id: i32,
    pub action: HistoryAction,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub actor: Option<String>,
    pub timestamp: NaiveDateTime,
}
