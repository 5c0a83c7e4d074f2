//! Command-line parsing and dispatch.

mod args;
mod handlers;

pub use args::{Cli, Commands, LogLevel, PredictArgs, ReferenceArgs, ReferenceTarget};
pub use handlers::dispatch_command;
