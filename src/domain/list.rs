use chrono::NaiveDateTime;

use crate::error::{ManagerError, Result};

use super::validation::validate_key;

/// The stable external identifier of a list. Unique across all lists
/// (active and archived) within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey(String);

impl ListKey {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        Ok(Self(validate_key("list_key", value.as_ref())?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ListKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A list's lifecycle state. Archiving is a reversible transition,
/// constrained by a completeness precondition on its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Active,
    Archived,
}

impl ListStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(ManagerError::InvalidArgument(format!(
                "unknown list status: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ListStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named collection of items — the unit of tagging and list-scoped
/// properties.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub id: i32,
    pub list_key: ListKey,
    pub title: String,
    pub status: ListStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
