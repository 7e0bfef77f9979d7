use crate::error::Result;

use super::validation::validate_key;

/// A tag's name is case-folded at construction so "Dev" and "dev" refer
/// to the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let validated = validate_key("tag_name", value.as_ref())?;
        Ok(Self(validated.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tag shared among lists; a list's relationship to a tag is a
/// many-to-many assignment, not ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i32,
    pub name: TagName,
    pub color: String,
}

pub const DEFAULT_TAG_COLOR: &str = "gray";
