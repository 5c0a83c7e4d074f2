//! Integration-style tests for the form orchestrator and reference loader.

mod support;
