//! Dagschema CLI library.
//!
//! Command-line surface for parsing daily schedules and importing them into
//! a file-backed registry.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
