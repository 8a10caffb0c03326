//! CLI layer for clause-roster.
//!
//! Provides the command-line interface using clap, with commands for
//! planning, analyzing and questioning contracts and serving the HTTP API.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{AgentArgs, Cli, Commands};
