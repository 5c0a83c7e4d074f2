//! Multi-select checkbox panel with chips.
//!
//! Selected labels are kept in selection order and rendered as dismissible
//! chips under the trigger. The checkbox panel opens and closes only through
//! its trigger.

use crate::component::{Component, ComponentResult};
use crate::style::{
    ACCENT, ACCENT_DIM, ROUNDED_BORDER, SURFACE_1, SURFACE_2, TEXT, TEXT_DIM, border_style,
    placeholder_style, row_style,
};
use crate::viewport::{Viewport, render_scrollbar};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Widget};
use unicode_width::UnicodeWidthStr;

/// Rows shown in the checkbox panel before it scrolls.
pub const MAX_PANEL_ROWS: usize = 8;

/// Display form of a stored label: `-` becomes a space and every word is
/// capitalised (`e-commerce` → `E Commerce`).
pub fn humanize_label(label: &str) -> String {
    label
        .split(['-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Screen geometry of a multi-select for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSelectLayout {
    pub trigger: Rect,
    /// Chips as (label, area).
    pub chips: Vec<(String, Rect)>,
    /// `+N more` marker for chips that did not fit, as (N, area).
    pub more: Option<(usize, Rect)>,
    pub panel: Option<Rect>,
    /// Checkbox rows as (option index, area).
    pub rows: Vec<(usize, Rect)>,
}

/// State of the category picker.
#[derive(Debug, Clone)]
pub struct MultiSelectState {
    title: String,
    noun: String,
    options: Vec<String>,
    selected: Vec<String>,
    open: bool,
    focused: bool,
    cursor: usize,
    loading: bool,
    view: Viewport,
}

impl MultiSelectState {
    /// `noun` names the options in messages (`Loading categories...`).
    pub fn new(title: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            noun: noun.into(),
            options: Vec::new(),
            selected: Vec::new(),
            open: false,
            focused: false,
            cursor: 0,
            loading: false,
            view: Viewport::new(0, MAX_PANEL_ROWS),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selected labels in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.iter().any(|s| s == label)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.cursor = self.cursor.min(self.options.len().saturating_sub(1));
        self.view.set_total(self.options.len());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Text of the trigger button.
    pub fn trigger_text(&self) -> String {
        if self.selected.is_empty() {
            format!("Select {}...", self.noun)
        } else {
            format!("{} selected", self.selected.len())
        }
    }

    /// Add `label` if absent, remove it if present.
    pub fn toggle(&mut self, label: &str) -> Vec<String> {
        if let Some(pos) = self.selected.iter().position(|s| s == label) {
            self.selected.remove(pos);
        } else {
            self.selected.push(label.to_string());
        }
        self.selected.clone()
    }

    /// Remove `label`; removing an absent label changes nothing.
    pub fn remove(&mut self, label: &str) -> Option<Vec<String>> {
        let before = self.selected.len();
        self.selected.retain(|s| s != label);
        (self.selected.len() != before).then(|| self.selected.clone())
    }

    /// The trigger: open or close the panel.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        if self.open {
            self.view.ensure_visible(self.cursor);
        }
    }

    /// Move the row cursor to `index` (pointer hover).
    pub fn hover(&mut self, index: usize) {
        if self.open && index < self.options.len() {
            self.cursor = index;
        }
    }

    pub fn scroll(&mut self, delta: isize) {
        if self.open {
            self.view.scroll_by(delta);
        }
    }

    fn toggle_cursor_row(&mut self) -> Option<Vec<String>> {
        let label = self.options.get(self.cursor)?.clone();
        Some(self.toggle(&label))
    }

    fn remove_last(&mut self) -> Option<Vec<String>> {
        self.selected.pop()?;
        Some(self.selected.clone())
    }

    /// Geometry for a field at `area` (trigger box plus one chip line).
    pub fn layout(&self, area: Rect, screen: Rect) -> MultiSelectLayout {
        let trigger = Rect {
            height: area.height.min(3),
            ..area
        };
        let mut layout = MultiSelectLayout {
            trigger,
            ..Default::default()
        };

        if area.height > 3 {
            let y = trigger.bottom();
            let right = area.right();
            let mut x = area.x + 1;
            for label in &self.selected {
                let width = chip_text(label).width() as u16;
                if x + width > right {
                    break;
                }
                layout.chips.push((label.clone(), Rect::new(x, y, width, 1)));
                x += width + 1;
            }

            // Drop trailing chips until the marker fits.
            let mut hidden = self.selected.len() - layout.chips.len();
            while hidden > 0 {
                let width = more_text(hidden).width() as u16;
                let x = layout
                    .chips
                    .last()
                    .map_or(area.x + 1, |(_, chip)| chip.right() + 1);
                if x + width <= right || layout.chips.is_empty() {
                    let width = width.min(right.saturating_sub(x));
                    layout.more = Some((hidden, Rect::new(x, y, width, 1)));
                    break;
                }
                layout.chips.pop();
                hidden += 1;
            }
        }

        if !self.open || self.loading {
            return layout;
        }
        let rows = self.options.len().clamp(1, MAX_PANEL_ROWS) as u16;
        let y = trigger.bottom();
        let height = (rows + 2).min(screen.bottom().saturating_sub(y));
        if height < 3 {
            return layout;
        }
        let panel = Rect::new(trigger.x, y, trigger.width, height);
        layout.panel = Some(panel);
        let row_width = panel.width.saturating_sub(3);
        layout.rows = self
            .view
            .visible_range()
            .take((height - 2) as usize)
            .enumerate()
            .map(|(i, idx)| (idx, Rect::new(panel.x + 1, panel.y + 1 + i as u16, row_width, 1)))
            .collect();
        layout
    }

    /// Draw the chips and, when open, the checkbox panel.
    pub fn render_overlay(&self, layout: &MultiSelectLayout, buf: &mut Buffer) {
        for (label, area) in &layout.chips {
            buf.set_stringn(
                area.x,
                area.y,
                chip_text(label),
                area.width as usize,
                Style::default().fg(ACCENT).bg(SURFACE_2),
            );
        }

        if let Some((hidden, area)) = layout.more {
            buf.set_stringn(
                area.x,
                area.y,
                more_text(hidden),
                area.width as usize,
                Style::default().fg(TEXT_DIM),
            );
        }

        let Some(panel) = layout.panel else {
            return;
        };
        Clear.render(panel, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDER)
            .border_style(Style::default().fg(ACCENT))
            .style(Style::default().bg(SURFACE_1));
        let inner = block.inner(panel);
        block.render(panel, buf);

        if self.options.is_empty() {
            buf.set_string(
                inner.x + 1,
                inner.y,
                format!("No {} available", self.noun),
                Style::default().fg(TEXT_DIM).bg(SURFACE_1),
            );
            return;
        }

        for (idx, row) in &layout.rows {
            let Some(label) = self.options.get(*idx) else {
                continue;
            };
            let style = row_style(*idx == self.cursor && self.focused);
            let mark = if self.is_selected(label) { "[x]" } else { "[ ]" };
            buf.set_style(*row, style);
            buf.set_stringn(
                row.x + 1,
                row.y,
                format!("{mark} {}", humanize_label(label)),
                row.width.saturating_sub(1) as usize,
                style,
            );
        }

        let scrollbar = Rect::new(inner.right().saturating_sub(1), inner.y, 1, inner.height);
        render_scrollbar(scrollbar, buf, &self.view);
    }
}

fn chip_text(label: &str) -> String {
    format!(" {} ✕ ", humanize_label(label))
}

fn more_text(hidden: usize) -> String {
    format!("+{hidden} more")
}

impl Component for MultiSelectState {
    type Output = Vec<String>;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 8 {
            return;
        }
        let trigger = Rect {
            height: 3,
            ..area
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDER)
            .border_style(border_style(self.focused))
            .title(format!(" {} ", self.title));
        let inner = block.inner(trigger);
        block.render(trigger, buf);

        let width = inner.width.saturating_sub(3) as usize;
        if self.loading {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                format!("Loading {}...", self.noun),
                width,
                placeholder_style(),
            );
        } else {
            let style = if self.selected.is_empty() {
                placeholder_style()
            } else {
                Style::default().fg(TEXT)
            };
            buf.set_stringn(inner.x + 1, inner.y, self.trigger_text(), width, style);
        }
        let arrow = if self.open { "▴" } else { "▾" };
        buf.set_string(
            inner.right().saturating_sub(1),
            inner.y,
            arrow,
            Style::default().fg(ACCENT_DIM),
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Vec<String>> {
        if self.loading {
            return ComponentResult::NotHandled;
        }
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.toggle_open();
                    ComponentResult::Handled
                }
                KeyCode::Backspace => self.remove_last().into(),
                _ => ComponentResult::NotHandled,
            };
        }
        match key.code {
            KeyCode::Down => {
                if self.cursor + 1 < self.options.len() {
                    self.cursor += 1;
                }
                self.view.ensure_visible(self.cursor);
                ComponentResult::Handled
            }
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                self.view.ensure_visible(self.cursor);
                ComponentResult::Handled
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_cursor_row().into(),
            KeyCode::Esc => {
                self.toggle_open();
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focused: bool) -> Option<Vec<String>> {
        // The panel stays as it is; only the trigger opens or closes it.
        self.focused = focused;
        None
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.open {
            vec![("↑↓", "Move"), ("Space", "Toggle"), ("Esc", "Close")]
        } else {
            vec![("Enter", "Open"), ("⌫", "Remove last")]
        }
    }

    fn height(&self) -> u16 {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn categories() -> MultiSelectState {
        let mut state = MultiSelectState::new("Categories", "categories");
        state.set_options(vec![
            "software".to_string(),
            "fintech".to_string(),
            "ai".to_string(),
            "e-commerce".to_string(),
        ]);
        state
    }

    #[test]
    fn test_humanize_label() {
        assert_eq!(humanize_label("e-commerce"), "E Commerce");
        assert_eq!(humanize_label("software"), "Software");
        assert_eq!(humanize_label("health-care-it"), "Health Care It");
    }

    #[test]
    fn test_toggle_keeps_selection_order() {
        let mut state = categories();
        state.toggle("fintech");
        state.toggle("ai");
        state.toggle("software");
        assert_eq!(state.selected(), &["fintech", "ai", "software"]);

        state.toggle("ai");
        assert_eq!(state.selected(), &["fintech", "software"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut state = categories();
        state.toggle("ai");
        assert_eq!(state.remove("ai"), Some(vec![]));
        assert_eq!(state.remove("ai"), None);
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_trigger_text() {
        let mut state = categories();
        assert_eq!(state.trigger_text(), "Select categories...");
        state.toggle("ai");
        state.toggle("fintech");
        assert_eq!(state.trigger_text(), "2 selected");
    }

    #[test]
    fn test_keyboard_flow() {
        let mut state = categories();
        state.set_focus(true);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), ComponentResult::Handled);
        assert!(state.is_open());

        state.handle_key(key(KeyCode::Down));
        assert_eq!(
            state.handle_key(key(KeyCode::Char(' '))),
            ComponentResult::Changed(vec!["fintech".to_string()])
        );
        state.handle_key(key(KeyCode::Up));
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.cursor(), 0);
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.selected(), &["fintech", "software"]);

        state.handle_key(key(KeyCode::Esc));
        assert!(!state.is_open());
        assert_eq!(
            state.handle_key(key(KeyCode::Backspace)),
            ComponentResult::Changed(vec!["fintech".to_string()])
        );
    }

    #[test]
    fn test_backspace_with_no_chips() {
        let mut state = categories();
        assert_eq!(
            state.handle_key(key(KeyCode::Backspace)),
            ComponentResult::Handled
        );
    }

    #[test]
    fn test_blur_keeps_panel_open() {
        let mut state = categories();
        state.set_focus(true);
        state.toggle_open();
        state.set_focus(false);
        assert!(state.is_open());

        state.toggle_open();
        state.set_focus(true);
        assert!(!state.is_open());
    }

    #[test]
    fn test_loading_ignores_keys() {
        let mut state = categories();
        state.set_loading(true);
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            ComponentResult::NotHandled
        );
        assert!(!state.is_open());
    }

    #[test]
    fn test_layout_chips_and_rows() {
        let mut state = categories();
        state.toggle("ai");
        state.toggle("e-commerce");
        let screen = Rect::new(0, 0, 60, 30);
        let layout = state.layout(Rect::new(0, 10, 50, 4), screen);

        assert_eq!(layout.chips.len(), 2);
        assert_eq!(layout.chips[0].0, "ai");
        assert_eq!(layout.chips[0].1, Rect::new(1, 13, 6, 1));
        assert!(layout.more.is_none());
        assert!(layout.panel.is_none());

        state.toggle_open();
        let layout = state.layout(Rect::new(0, 10, 50, 4), screen);
        assert_eq!(layout.panel, Some(Rect::new(0, 13, 50, 6)));
        assert_eq!(layout.rows.len(), 4);
        assert_eq!(layout.rows[3].0, 3);
    }

    #[test]
    fn test_overflowing_chips_collapse_into_marker() {
        let mut state = categories();
        state.toggle("ai");
        state.toggle("fintech");
        state.toggle("software");
        let area = Rect::new(0, 0, 20, 4);
        let layout = state.layout(area, Rect::new(0, 0, 40, 20));

        let labels: Vec<&str> = layout.chips.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["ai"]);
        assert_eq!(layout.more, Some((2, Rect::new(8, 3, 7, 1))));

        let mut buf = Buffer::empty(area);
        state.render_overlay(&layout, &mut buf);
        let line: String = (0..20).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(line.contains("Ai ✕"));
        assert!(line.contains("+2 more"));
    }

    #[test]
    fn test_render_loading_text() {
        let mut state = categories();
        state.set_loading(true);
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        state.render(area, &mut buf);
        let line: String = (0..40).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(line.contains("Loading categories..."));
    }
}
