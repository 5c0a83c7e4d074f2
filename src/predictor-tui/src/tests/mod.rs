//! Tests for the terminal form.

mod app_tests;
mod event_loop_tests;
mod support;
