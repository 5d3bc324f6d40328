// Library root: re-exports all modules so integration tests and the CLI
// binary can access the crate's public API.

pub mod config;
pub mod name;
pub mod rankings;
pub mod sleeper;
