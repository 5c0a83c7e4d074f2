//! Startup Predictor terminal form
//!
//! A ratatui screen that collects the company attributes, loads the
//! reference lists in the background and shows the explained prediction.
//!
//! - [`terminal`] - raw mode, alternate screen and restore-on-drop
//! - [`event_loop`] - the `tokio::select!` loop owning all UI state
//! - [`app`] - widget state and input routing
//! - [`views`] - rendering and click zone registration
//! - [`zones`] - mouse hit testing

pub mod app;
pub mod event_loop;
pub mod terminal;
pub mod views;
pub mod zones;

use std::sync::Arc;

use predictor_client::PredictorApi;

pub use app::{App, AppAction, Field};
pub use event_loop::EventLoop;
pub use terminal::{PredictorTerminal, TerminalOptions, is_terminal, restore_terminal};

/// Run the form against `api` until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run(api: Arc<dyn PredictorApi>) -> anyhow::Result<()> {
    let mut terminal = PredictorTerminal::with_options(TerminalOptions::new().title(views::TITLE))?;
    let mut event_loop = EventLoop::new(api);
    event_loop.run(&mut terminal).await
}

#[cfg(test)]
mod tests;
