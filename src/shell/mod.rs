//! External command execution.

pub mod command;

pub use command::{
    execute, execute_checked, execute_streaming, CommandLine, CommandOptions, CommandResult,
    OutputCallback, OutputLine,
};
