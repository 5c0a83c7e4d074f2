//! Terminal setup, teardown, and management.
//!
//! [`PredictorTerminal`] enters raw mode and the alternate screen and turns on
//! mouse capture and bracketed paste. A [`TerminalGuard`] undoes exactly what
//! was enabled when it is dropped, and a panic hook does the same before the
//! panic message is printed, so the shell is never left in raw mode.
//!
//! ```rust,ignore
//! use predictor_tui::terminal::{PredictorTerminal, TerminalOptions};
//!
//! let mut terminal = PredictorTerminal::with_options(
//!     TerminalOptions::new().mouse_capture(false).title("Predictor"),
//! )?;
//! terminal.draw(|frame| {
//!     // ... render widgets
//! })?;
//! // Terminal is restored on drop
//! ```

use std::io::{self, IsTerminal, Stdout, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;
use ratatui::{Frame, Terminal};

/// Track whether the panic hook has been installed to avoid installing it multiple times.
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// RAII guard that restores the terminal on drop.
///
/// Only the features that were enabled during initialization are disabled
/// again.
pub struct TerminalGuard {
    alternate_screen: bool,
    mouse_capture: bool,
    bracketed_paste: bool,
}

impl TerminalGuard {
    pub fn new(alternate_screen: bool, mouse_capture: bool, bracketed_paste: bool) -> Self {
        Self {
            alternate_screen,
            mouse_capture,
            bracketed_paste,
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored so every step is attempted.
        let _ = restore_terminal_impl(self.alternate_screen, self.mouse_capture, self.bracketed_paste);
    }
}

/// Options for terminal initialization.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
    pub bracketed_paste: bool,
    /// Window title to set on start.
    pub title: Option<String>,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            title: None,
        }
    }
}

impl TerminalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    pub fn mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    pub fn bracketed_paste(mut self, enabled: bool) -> Self {
        self.bracketed_paste = enabled;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The ratatui terminal used by the form, with its restore guard.
pub struct PredictorTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl PredictorTerminal {
    /// Create a terminal with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails.
    pub fn new() -> Result<Self> {
        Self::with_options(TerminalOptions::default())
    }

    /// Create a terminal with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails.
    pub fn with_options(options: TerminalOptions) -> Result<Self> {
        // The guard exists before any mode is switched, so a failure halfway
        // through still restores what was already enabled.
        let guard = TerminalGuard::new(
            options.alternate_screen,
            options.mouse_capture,
            options.bracketed_paste,
        );
        init_terminal(&options)?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            _guard: guard,
        })
    }

    /// Current terminal size in cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    pub fn size(&self) -> Result<Size> {
        Ok(self.terminal.size()?)
    }

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Clear the screen; the next draw repaints everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the clear fails.
    pub fn clear(&mut self) -> Result<()> {
        self.terminal.clear()?;
        Ok(())
    }
}

fn init_terminal(options: &TerminalOptions) -> Result<()> {
    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = stdout();

    if options.alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    if options.mouse_capture {
        execute!(stdout, EnableMouseCapture)?;
    }
    if options.bracketed_paste {
        execute!(stdout, EnableBracketedPaste)?;
    }
    execute!(stdout, cursor::Hide)?;
    if let Some(ref title) = options.title {
        execute!(stdout, SetTitle(title))?;
    }
    Ok(())
}

fn restore_terminal_impl(
    alternate_screen: bool,
    mouse_capture: bool,
    bracketed_paste: bool,
) -> io::Result<()> {
    let mut stdout = stdout();

    execute!(stdout, cursor::Show)?;
    if bracketed_paste {
        execute!(stdout, DisableBracketedPaste)?;
    }
    if mouse_capture {
        execute!(stdout, DisableMouseCapture)?;
    }
    if alternate_screen {
        execute!(stdout, LeaveAlternateScreen)?;
    }
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal assuming every feature was enabled.
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl(true, true, true)?;
    Ok(())
}

/// Install a panic hook that restores the terminal. Installed once per process.
fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Whether stdout is a terminal. The form needs one; headless commands do not.
pub fn is_terminal() -> bool {
    stdout().is_terminal()
}
