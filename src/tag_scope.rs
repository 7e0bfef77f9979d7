//! The forced-tag filter is captured once at Manager construction time
//! from an environment variable and never re-read afterward — tests rely
//! on constructor-time capture, not live environment polling.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ForcedTagSet {
    tags: HashSet<String>,
}

impl ForcedTagSet {
    /// Parses `TODOIT_FORCE_TAGS`-style input: comma-separated, trimmed,
    /// case-folded, empty segments dropped.
    pub fn parse(raw: &str) -> Self {
        let tags = raw
            .split(',')
            .map(|segment| segment.trim().to_lowercase())
            .filter(|segment| !segment.is_empty())
            .collect();
        Self { tags }
    }

    pub fn empty() -> Self {
        Self { tags: HashSet::new() }
    }

    pub fn is_active(&self) -> bool {
        !self.tags.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Whether a list carrying `list_tag_names` is visible under this
    /// filter. An inactive filter permits everything.
    pub fn permits(&self, list_tag_names: &[String]) -> bool {
        if !self.is_active() {
            return true;
        }
        list_tag_names
            .iter()
            .any(|name| self.tags.contains(&name.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_folds_case() {
        let set = ForcedTagSet::parse(" Dev, ,prod ,dev");
        assert!(set.is_active());
        assert!(set.permits(&["DEV".to_string()]));
        assert!(set.permits(&["prod".to_string()]));
        assert!(!set.permits(&["staging".to_string()]));
    }

    #[test]
    fn empty_filter_permits_everything() {
        let set = ForcedTagSet::empty();
        assert!(!set.is_active());
        assert!(set.permits(&[]));
    }
}
