//! CLI module
//!
//! Command-line interface around the bearer strategy.
//!
//! # Commands
//!
//! - `serve` - Start a demo server with a protected `/me` route
//! - `validate` - Check a token configuration file
//! - `challenge` - Print a rendered `WWW-Authenticate` value

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve};
