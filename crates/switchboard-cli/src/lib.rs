//! Switchboard CLI library
//!
//! Argument parsing, configuration resolution and the command
//! implementations behind the `switchboard` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
