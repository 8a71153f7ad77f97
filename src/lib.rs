// Library target exists solely for the integration tests in tests/.
// The binary entry point is main.rs; this file re-declares the module tree
// so that tests can import types via `deepclone::session::*` and
// `deepclone::gateway::*`. Most code is only exercised through the binary,
// so suppress dead_code warnings.
#![allow(dead_code)]

rust_i18n::i18n!("locales", fallback = "en");

// Public: used directly by integration tests
pub mod app;
pub mod config;
pub mod event;
pub mod gateway;
pub mod session;

// Private: required transitively by app (won't compile without them)
mod telemetry;
mod ui;
