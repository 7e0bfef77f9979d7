//! Embedded task-management engine: hierarchical todo lists, item
//! dependencies, tags and an append-only history log over a local
//! SQLite store.
//!
//! The public surface is [`Manager`], constructed from a live
//! `sea_orm::DatabaseConnection` (see [`infrastructure::ConnectionManager`]
//! for opening one from a path or [`infrastructure::Config`]).

pub mod domain;
pub mod error;
pub mod gateway;
pub mod infrastructure;
pub mod manager;
mod tag_scope;
mod traversal;

pub use domain::{
    Dependency, HistoryAction, HistoryEntityType, HistoryEntry, Item, ItemKey, ItemStatus, List,
    ListKey, ListStatus, Tag, TagName,
};
pub use error::{ManagerError, Result};
pub use infrastructure::{Config, ConnectionManager};
pub use manager::{ItemHierarchy, Manager};
pub use tag_scope::ForcedTagSet;
