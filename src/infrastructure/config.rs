use anyhow::{anyhow, Result};

/// The entire configuration surface: two environment variables, captured
/// once at startup. Nothing here is re-read after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub force_tags: String,
}

impl Config {
    /// Loads configuration from the environment. `TODOIT_DB_PATH` is
    /// required and undergoes `$HOME`/`~` expansion; a missing value is a
    /// hard abort, not a silent default, per the storage contract.
    /// `TODOIT_FORCE_TAGS` is optional and defaults to empty (no filter).
    pub fn from_env() -> Result<Self> {
        let raw_path = std::env::var("TODOIT_DB_PATH")
            .map_err(|_| anyhow!("TODOIT_DB_PATH is not set; refusing to guess a database path"))?;
        let database_url = path_to_sqlite_url(&expand_path(&raw_path));
        let force_tags = std::env::var("TODOIT_FORCE_TAGS").unwrap_or_default();
        Ok(Self { database_url, force_tags })
    }

    /// Builds configuration from an explicit path, bypassing the
    /// environment entirely.
    pub fn with_database_path(path: &str) -> Self {
        Self {
            database_url: path_to_sqlite_url(&expand_path(path)),
            force_tags: std::env::var("TODOIT_FORCE_TAGS").unwrap_or_default(),
        }
    }
}

/// Turns an expanded filesystem path into a `sqlite://` connection URL,
/// creating the file on first connect (`mode=rwc`). `:memory:` is passed
/// through unchanged so tests and callers can still request an
/// in-memory store via `TODOIT_DB_PATH`.
fn path_to_sqlite_url(path: &str) -> String {
    if path == ":memory:" || path.starts_with("sqlite:") {
        return path.to_string();
    }
    format!("sqlite://{path}?mode=rwc")
}

/// Expands a leading `~` or an embedded `$HOME` manually — no shell
/// involved, so no other environment variables or globs are expanded.
fn expand_path(raw: &str) -> String {
    let home = std::env::var("HOME").ok();

    let after_tilde = if let Some(rest) = raw.strip_prefix("~/") {
        home.as_ref().map(|home| format!("{home}/{rest}")).unwrap_or_else(|| raw.to_string())
    } else if raw == "~" {
        home.clone().unwrap_or_else(|| raw.to_string())
    } else {
        raw.to_string()
    };

    match home {
        Some(home) => after_tilde.replace("$HOME", &home),
        None => after_tilde,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_prefix() {
        std::env::set_var("HOME", "/home/tester");
        assert_eq!(expand_path("~/todoit.db"), "/home/tester/todoit.db");
    }

    #[test]
    fn expands_dollar_home() {
        std::env::set_var("HOME", "/home/tester");
        assert_eq!(expand_path("$HOME/data/todoit.db"), "/home/tester/data/todoit.db");
    }

    #[test]
    fn leaves_absolute_paths_untouched() {
        assert_eq!(expand_path("/var/lib/todoit.db"), "/var/lib/todoit.db");
    }

    #[test]
    fn wraps_plain_paths_as_sqlite_url_with_rwc() {
        assert_eq!(path_to_sqlite_url("/var/lib/todoit.db"), "sqlite:///var/lib/todoit.db?mode=rwc");
    }

    #[test]
    fn leaves_memory_and_url_forms_untouched() {
        assert_eq!(path_to_sqlite_url(":memory:"), ":memory:");
        assert_eq!(path_to_sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }
}
