//! Text editing primitives.
//!
//! [`TextBuffer`] is a single-line buffer with a grapheme cursor, used as the
//! search box of the combobox. [`YearInput`] is the bounded numeric field for
//! the founding year.

use crate::component::{Component, ComponentResult};
use crate::style::{ROUNDED_BORDER, TEXT, TEXT_MUTED, border_style};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Widget};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line text with a cursor counted in graphemes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content and put the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Length in graphemes.
    pub fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
    }

    /// Insert text at cursor (for paste).
    pub fn insert_str(&mut self, text: &str) {
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value.insert_str(byte_offset, text);
        self.cursor += text.graphemes(true).count();
    }

    /// Delete the grapheme before the cursor. Returns false at the start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.grapheme_to_byte_offset(self.cursor - 1);
        let end = self.grapheme_to_byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    /// Delete the grapheme at the cursor. Returns false at the end.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let start = self.grapheme_to_byte_offset(self.cursor);
        let end = self.grapheme_to_byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns true if the content changed.
    ///
    /// Cursor movement is applied but reported as no change.
    pub fn apply_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }

    /// Display column of the cursor.
    pub fn cursor_column(&self) -> u16 {
        let byte_offset = self.grapheme_to_byte_offset(self.cursor);
        self.value[..byte_offset].width() as u16
    }

    fn grapheme_to_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.value.len())
    }
}

/// Whether `key` edits text (printable character or an editing key).
pub fn is_edit_key(key: &KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    matches!(
        key.code,
        KeyCode::Char(_) | KeyCode::Backspace | KeyCode::Delete
    )
}

/// Bounded year field: digits edit, `↑`/`↓` step, out-of-range input is
/// clamped when the field loses focus.
#[derive(Debug, Clone)]
pub struct YearInput {
    label: String,
    value: i32,
    min: i32,
    max: i32,
    text: TextBuffer,
    focused: bool,
}

impl YearInput {
    pub fn new(label: impl Into<String>, value: i32, min: i32, max: i32) -> Self {
        let value = value.clamp(min, max);
        let mut text = TextBuffer::new();
        text.set(value.to_string());
        Self {
            label: label.into(),
            value,
            min,
            max,
            text,
            focused: false,
        }
    }

    /// Committed (always in range) value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Text as currently typed.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
        self.text.set(self.value.to_string());
    }

    /// Step by `delta`, clamped. Returns the new value if it changed.
    pub fn step(&mut self, delta: i32) -> Option<i32> {
        let base = self.parsed().unwrap_or(self.value);
        let next = base.saturating_add(delta).clamp(self.min, self.max);
        let changed = next != self.value;
        self.set_value(next);
        changed.then_some(next)
    }

    /// Clamp the typed text into range and commit it.
    pub fn commit(&mut self) -> Option<i32> {
        let next = self
            .parsed()
            .map(|v| v.clamp(self.min, self.max))
            .unwrap_or(self.value);
        let changed = next != self.value;
        self.set_value(next);
        changed.then_some(next)
    }

    fn parsed(&self) -> Option<i32> {
        self.text.as_str().trim().parse().ok()
    }
}

impl Component for YearInput {
    type Output = i32;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 8 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDER)
            .border_style(border_style(self.focused))
            .title(format!(" {} ", self.label));
        let inner = block.inner(area);
        block.render(area, buf);

        buf.set_string(inner.x + 1, inner.y, self.text.as_str(), Style::default().fg(TEXT));
        let range = format!("{}-{}", self.min, self.max);
        let hint_x = inner.right().saturating_sub(range.len() as u16 + 1);
        if hint_x > inner.x + 6 {
            buf.set_string(hint_x, inner.y, &range, Style::default().fg(TEXT_MUTED));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<i32> {
        match key.code {
            KeyCode::Up => self.step(1).into(),
            KeyCode::Down => self.step(-1).into(),
            KeyCode::Enter => self.commit().into(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.text.len() < 4 {
                    self.text.insert(c);
                }
                ComponentResult::Handled
            }
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Left | KeyCode::Right => {
                self.text.apply_key(key);
                ComponentResult::Handled
            }
            _ => ComponentResult::NotHandled,
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focused: bool) -> Option<i32> {
        self.focused = focused;
        if focused {
            self.text.move_end();
            None
        } else {
            self.commit()
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("↑↓", "Step"), ("0-9", "Type year")]
    }

    fn handle_paste(&mut self, text: &str) -> ComponentResult<i32> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).take(4).collect();
        if digits.is_empty() {
            return ComponentResult::NotHandled;
        }
        self.text.set(digits);
        ComponentResult::Handled
    }
}
