//! CLI module
//!
//! Command-line interface for walking paginated collections.
//!
//! # Commands
//!
//! - `walk` - Print every item of a collection, one JSON document per item
//! - `count` - Count the items and pages of a collection

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
