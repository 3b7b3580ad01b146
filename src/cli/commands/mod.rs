//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod completions;
pub mod diff;
pub mod dispatcher;
pub mod sync;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
