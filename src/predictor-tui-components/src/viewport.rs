//! Scroll window over a list of rows.

use crate::style::{SURFACE_1, TEXT_MUTED};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

/// Which slice of a list is on screen.
///
/// ```rust
/// use predictor_tui_components::viewport::Viewport;
///
/// let mut view = Viewport::new(100, 8);
/// view.ensure_visible(50);
/// assert!(view.visible_range().contains(&50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    total: usize,
    visible: usize,
    offset: usize,
}

impl Viewport {
    pub fn new(total: usize, visible: usize) -> Self {
        Self {
            total,
            visible,
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Set the number of rows, keeping the offset valid.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.clamp_offset();
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible;
        self.clamp_offset();
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Scroll the minimum amount needed to show `index`.
    pub fn ensure_visible(&mut self, index: usize) {
        if self.visible == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.visible {
            self.offset = index + 1 - self.visible;
        }
        self.clamp_offset();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp_offset();
    }

    /// Row indices currently on screen.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.visible).min(self.total);
        self.offset..end
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.visible
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.total.saturating_sub(self.visible));
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 8)
    }
}

/// Render a vertical scrollbar for the viewport.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, view: &Viewport) {
    if !view.needs_scrollbar() || area.width == 0 || area.height == 0 {
        return;
    }

    let scrollable_range = view.total.saturating_sub(view.visible);
    let mut state = ScrollbarState::new(scrollable_range).position(view.offset);

    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some("│"))
        .track_style(Style::default().fg(SURFACE_1))
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(TEXT_MUTED))
        .render(area, buf, &mut state);
}
