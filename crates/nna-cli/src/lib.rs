//! Library side of the `nna-profiler` command.

pub mod config;
pub mod logging;
pub mod pipeline;
