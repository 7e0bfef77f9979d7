//! Typed CRUD primitives per entity, bulk operations and eager-load
//! helpers. Every function here is a thin, generic-over-`ConnectionTrait`
//! wrapper around a `sea_orm` query so it can run against either a plain
//! connection or a transaction — the Manager decides which.

pub mod cascade;
pub mod dependencies;
pub mod history;
pub mod items;
pub mod lists;
pub mod properties;
pub mod tags;

mod convert;
