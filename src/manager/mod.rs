//! The orchestrator: the only thing callers talk to. Owns the connection
//! pool and the forced-tag filter, opens one transaction per public
//! operation, composes gateway calls inside it, derives state through the
//! traversal engine, and appends history before committing.

mod dependency_ops;
mod history_ops;
mod item_ops;
mod list_ops;
mod property_ops;
mod tag_ops;
mod traversal_ops;

use sea_orm::DatabaseConnection;

use crate::tag_scope::ForcedTagSet;

pub use item_ops::ItemHierarchy;

pub struct Manager {
    db: DatabaseConnection,
    forced_tags: ForcedTagSet,
}

impl Manager {
    /// Captures the forced-tag filter once, from the environment, at
    /// construction time — it is never re-read afterward.
    pub fn new(db: DatabaseConnection) -> Self {
        let forced_tags = std::env::var("TODOIT_FORCE_TAGS")
            .map(|raw| ForcedTagSet::parse(&raw))
            .unwrap_or_else(|_| ForcedTagSet::empty());
        Self { db, forced_tags }
    }

    pub fn with_forced_tags(db: DatabaseConnection, forced_tags: ForcedTagSet) -> Self {
        Self { db, forced_tags }
    }
}
