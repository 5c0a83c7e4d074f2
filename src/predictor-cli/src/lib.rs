//! Startup Predictor CLI library module.
//!
//! - `cli/` - argument parsing and command dispatch
//! - `config` - layered configuration (file, `.env`, environment, flags)
//! - `logging` - tracing subscriber setup
//! - `predict_cmd` / `reference_cmd` - headless commands

pub mod cli;
pub mod config;
pub mod logging;
pub mod predict_cmd;
pub mod reference_cmd;
