//! Library components of the `encounter-qc` CLI.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
