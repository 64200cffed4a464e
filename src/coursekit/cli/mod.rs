//! # CLI
//!
//! One possible client of the library: everything that knows about
//! terminals, prompts and exit codes lives here.
//!
//! - `setup`: clap argument definitions
//! - `commands`: context wiring, prompts, per-command handlers
//! - `print`: colored rendering of outlines and messages
//! - `picker`: turns a path into a file descriptor
//!
//! Running `coursekit` with no subcommand lists the course.

mod commands;
mod picker;
mod print;
pub mod setup;

pub use commands::run;
