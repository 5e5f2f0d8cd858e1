//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskdeck_core` linkage and that a store file opens and restores.
//! - Keep output deterministic for quick local sanity checks.
//! - Write rolling logs to `logs/` beside the database; a logging failure is
//!   reported and does not stop the run.
//!
//! Usage: `taskdeck_cli [DB_PATH]` (defaults to `./taskdeck.sqlite3`).

use std::path::PathBuf;
use std::process::ExitCode;
use taskdeck_core::{
    flush_logging, init_logging, open_task_store, CoreConfig, LoggingConfig, TaskQuery,
};

fn main() -> ExitCode {
    let config = match std::env::args_os().nth(1) {
        Some(path) => CoreConfig::at_path(path),
        None => CoreConfig::in_dir("."),
    };

    println!("taskdeck_core version={}", taskdeck_core::core_version());

    match std::env::current_dir() {
        Ok(base) => start_logging(config.log_dir_from(base)),
        Err(err) => eprintln!("logging disabled: cannot resolve working directory: {err}"),
    }

    let store = match open_task_store(&config) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", config.db_path.display());
            flush_logging();
            return ExitCode::FAILURE;
        }
    };

    let counts = store.project(&TaskQuery::default()).counts;
    println!(
        "tasks total={} active={} completed={}",
        counts.total, counts.active, counts.completed
    );
    flush_logging();
    ExitCode::SUCCESS
}

fn start_logging(log_dir: PathBuf) {
    if let Err(err) = init_logging(&LoggingConfig::new(log_dir.clone())) {
        eprintln!("logging disabled for `{}`: {err}", log_dir.display());
    }
}
