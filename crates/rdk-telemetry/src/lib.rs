//! Logging and tracing setup shared by the recursive-devkit binaries.
//!
//! - **Logging**: human-readable or JSON output via `tracing-subscriber`,
//!   always on stderr so command output on stdout stays pipeable
//! - **Tracing**: per-command spans carrying a generated trace ID

pub mod logging;
pub mod tracing_setup;
