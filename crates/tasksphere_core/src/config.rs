//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve the SQLite file path backing persisted state.
//! - Resolve the log level and log directory used by embedding layers.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; defaults always apply.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

/// Overrides the SQLite file path.
pub const DB_PATH_ENV: &str = "TASKSPHERE_DB_PATH";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_ENV: &str = "TASKSPHERE_LOG_LEVEL";
/// Overrides the rolling log directory.
pub const LOG_DIR_ENV: &str = "TASKSPHERE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tasksphere.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "tasksphere-logs";

/// Returns the database path from `TASKSPHERE_DB_PATH`, falling back to
/// `<temp_dir>/tasksphere.sqlite3`.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok())
}

/// Returns the level from `TASKSPHERE_LOG_LEVEL` when it is valid,
/// otherwise the build-mode default.
pub fn resolve_log_level() -> &'static str {
    log_level_from(std::env::var(LOG_LEVEL_ENV).ok())
}

/// Returns the log directory from `TASKSPHERE_LOG_DIR`, falling back to
/// `<temp_dir>/tasksphere-logs`.
pub fn resolve_log_dir() -> PathBuf {
    log_dir_from(std::env::var(LOG_DIR_ENV).ok())
}

fn db_path_from(raw: Option<String>) -> PathBuf {
    non_blank_path(raw).unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn log_dir_from(raw: Option<String>) -> PathBuf {
    non_blank_path(raw).unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME))
}

fn non_blank_path(raw: Option<String>) -> Option<PathBuf> {
    match raw.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

fn log_level_from(raw: Option<String>) -> &'static str {
    raw.as_deref()
        .and_then(|value| normalize_level(value).ok())
        .unwrap_or_else(default_log_level)
}

#[cfg(test)]
mod tests {
    use super::{
        db_path_from, log_dir_from, log_level_from, DEFAULT_DB_FILE_NAME, DEFAULT_LOG_DIR_NAME,
    };
    use crate::logging::default_log_level;
    use std::path::PathBuf;

    #[test]
    fn db_path_prefers_non_blank_override() {
        assert_eq!(
            db_path_from(Some(" /data/tasks.db ".to_string())),
            PathBuf::from("/data/tasks.db")
        );
    }

    #[test]
    fn db_path_falls_back_to_temp_dir() {
        let expected = std::env::temp_dir().join(DEFAULT_DB_FILE_NAME);
        assert_eq!(db_path_from(None), expected);
        assert_eq!(db_path_from(Some("   ".to_string())), expected);
    }

    #[test]
    fn log_level_ignores_unknown_values() {
        assert_eq!(log_level_from(Some("Warning".to_string())), "warn");
        assert_eq!(log_level_from(Some("loud".to_string())), default_log_level());
        assert_eq!(log_level_from(None), default_log_level());
    }

    #[test]
    fn log_dir_defaults_to_absolute_temp_subdir() {
        let fallback = log_dir_from(Some(String::new()));
        assert_eq!(fallback, std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        assert!(fallback.is_absolute());
        assert_eq!(
            log_dir_from(Some("/var/log/tasksphere".to_string())),
            PathBuf::from("/var/log/tasksphere")
        );
    }
}
