//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasksphere_core` linkage.
//! - Report the task summary stored in the configured database.
//!
//! # Invariants
//! - Never mutates stored tasks.
//! - A logging failure is reported but does not stop the summary.

use std::path::PathBuf;
use tasksphere_core::db::open_db;
use tasksphere_core::{
    init_logging, resolve_db_path, resolve_log_dir, resolve_log_level, KvStateRepository,
    SqliteKeyValueStore, TaskStore,
};

fn main() {
    println!("tasksphere_core ping={}", tasksphere_core::ping());
    println!("tasksphere_core version={}", tasksphere_core::core_version());

    match start_logging() {
        Ok(log_dir) => println!("tasksphere_core log_dir={}", log_dir.display()),
        Err(err) => eprintln!("tasksphere_core logging=disabled error={err}"),
    }

    let db_path = resolve_db_path();
    println!("tasksphere_core db_path={}", db_path.display());

    let store = match open_db(&db_path)
        .map_err(|err| err.to_string())
        .and_then(|conn| SqliteKeyValueStore::try_new(conn).map_err(|err| err.to_string()))
    {
        Ok(store) => TaskStore::open(KvStateRepository::new(store)),
        Err(err) => {
            eprintln!("tasksphere_core store=unavailable error={err}");
            std::process::exit(1);
        }
    };

    let stats = store.stats();
    println!(
        "tasksphere_core tasks total={} completed={} remaining={} progress={}%",
        stats.total_count,
        stats.completed_count,
        stats.remaining_count(),
        stats.rounded_percentage()
    );
}

/// Starts rolling file logs from `TASKSPHERE_LOG_LEVEL` and `TASKSPHERE_LOG_DIR`.
fn start_logging() -> Result<PathBuf, String> {
    let log_dir = resolve_log_dir();
    init_logging(resolve_log_level(), &log_dir.to_string_lossy())?;
    Ok(log_dir)
}
