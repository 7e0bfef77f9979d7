use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::{ManagerError, Result};

use super::validation::validate_key;

/// An item's key is unique only among its siblings — the set of items
/// sharing the same `(list_id, parent_item_id)` — not list-wide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        Ok(Self(validate_key("item_key", value.as_ref())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(ManagerError::InvalidArgument(format!(
                "unknown item status: {other}"
            ))),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task within exactly one list, optionally nested under exactly one
/// other item in the same list (a subitem).
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i32,
    pub list_id: i32,
    pub parent_item_id: Option<i32>,
    pub item_key: ItemKey,
    pub content: String,
    pub status: ItemStatus,
    pub position: i32,
    pub completion_states: HashMap<String, bool>,
    pub started_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Item {
    pub fn is_root(&self) -> bool {
        self.parent_item_id.is_none()
    }
}
