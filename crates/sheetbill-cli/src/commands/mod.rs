//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod sample;
pub mod words;
