//! Loading spinner component.

use crate::style::ACCENT;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading spinner advanced by the event loop tick.
#[derive(Debug, Clone, Default)]
pub struct LoadingSpinner {
    frame: usize,
    label: Option<String>,
}

impl LoadingSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Advance to the next frame.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }
}

impl Widget for &LoadingSpinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 2 {
            return;
        }

        buf.set_string(area.x, area.y, self.current_frame(), Style::default().fg(ACCENT));

        if let Some(label) = &self.label
            && area.width > 3
        {
            buf.set_stringn(
                area.x + 2,
                area.y,
                label,
                (area.width - 2) as usize,
                Style::default(),
            );
        }
    }
}
