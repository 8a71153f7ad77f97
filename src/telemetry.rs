//! Tracing initialization for the gateway.
//!
//! The TUI owns the terminal, so logs are written to a file under the data
//! dir rather than stdout. Logging is off unless LOG_LEVEL is set; it
//! accepts the usual filter directives (e.g. "debug" or
//! "info,deepclone=debug").

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("LOG_LEVEL") else {
        return;
    };

    let path = log_path();
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deepclone")
        .join("deepclone.log")
}
