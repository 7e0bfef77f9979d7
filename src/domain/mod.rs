pub mod dependency;
pub mod history;
pub mod item;
pub mod list;
pub mod tag;
pub mod validation;

pub use dependency::Dependency;
pub use history::{HistoryAction, HistoryEntry, HistoryEntityType};
pub use item::{Item, ItemKey, ItemStatus};
pub use list::{List, ListKey, ListStatus};
pub use tag::{Tag, TagName};
