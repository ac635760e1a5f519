//! Command-line front end for the authorization engine.
//!
//! Library half of the `abac` binary, exposed so the argument definitions and
//! commands can be tested without spawning a process.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, Exit};
