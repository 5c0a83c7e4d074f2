//! Searchable single-select combobox.
//!
//! The field has two states. Closed, it shows the committed value. Open, it
//! shows the search buffer and a panel of the options containing the search
//! text. Keyboard navigation moves a highlight through the filtered rows and
//! wraps at both ends.
//!
//! Invariants kept by every transition:
//! - `highlighted` is `None` or a valid position in `filtered`;
//! - the highlight is reset whenever the filter is recomputed or the panel
//!   closes;
//! - while the option list is loading, every operation is ignored.

use crate::component::{Component, ComponentResult};
use crate::filter::matching_indices;
use crate::input::{TextBuffer, is_edit_key};
use crate::style::{
    ACCENT, ROUNDED_BORDER, SURFACE_1, TEXT, TEXT_DIM, border_style, placeholder_style,
    row_style,
};
use crate::subscription::{PointerHub, Subscription, SubscriptionId};
use crate::viewport::{Viewport, render_scrollbar};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Widget};

/// Rows shown in the panel before it scrolls.
pub const MAX_VISIBLE_ROWS: usize = 8;

/// Change of the committed value, reported so the owner can mirror it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboboxChange {
    Committed(String),
    Cleared,
}

/// Screen geometry of a combobox for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboboxLayout {
    /// The bordered input box.
    pub input: Rect,
    /// The clear affordance, when visible.
    pub clear: Option<Rect>,
    /// The option panel, when open.
    pub panel: Option<Rect>,
    /// On-screen option rows as (filtered position, row area).
    pub rows: Vec<(usize, Rect)>,
}

/// State of a searchable single-select field.
#[derive(Debug)]
pub struct ComboboxState {
    title: String,
    placeholder: String,
    options: Vec<String>,
    committed: String,
    search: TextBuffer,
    open: bool,
    focused: bool,
    highlighted: Option<usize>,
    filtered: Vec<usize>,
    loading: bool,
    view: Viewport,
    subscription: Option<Subscription>,
}

impl ComboboxState {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            placeholder: placeholder.into(),
            options: Vec::new(),
            committed: String::new(),
            search: TextBuffer::new(),
            open: false,
            focused: false,
            highlighted: None,
            filtered: Vec::new(),
            loading: false,
            view: Viewport::new(0, MAX_VISIBLE_ROWS),
            subscription: None,
        }
    }

    /// Register for outside-press dismissal with `hub`.
    pub fn with_outside_press(mut self, hub: &PointerHub) -> Self {
        self.subscription = Some(hub.subscribe_outside_press());
        self.sync_subscription();
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.set_options(options);
        self
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(Subscription::id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Committed value; empty when nothing is selected.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn search_text(&self) -> &str {
        self.search.as_str()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Indices into `options` of the rows currently listed.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Labels of the rows currently listed.
    pub fn filtered_labels(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .map(|&i| self.options[i].as_str())
            .collect()
    }

    /// Text shown in the input box.
    pub fn display_text(&self) -> &str {
        if self.open {
            self.search.as_str()
        } else {
            &self.committed
        }
    }

    /// The clear affordance shows when a value is committed and the list is
    /// not loading.
    pub fn has_clear_affordance(&self) -> bool {
        !self.committed.is_empty() && !self.loading
    }

    /// Text shown in place of the rows when nothing matches.
    pub fn empty_message(&self) -> String {
        if self.search.is_empty() {
            "No options available".to_string()
        } else {
            format!("No results for \"{}\"", self.search.as_str())
        }
    }

    /// Replace the option list.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.refilter();
    }

    /// Mark the option list as loading. Loading closes the panel.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading && self.open {
            self.close();
        }
    }

    /// Set the committed value without going through the panel.
    pub fn set_committed(&mut self, value: impl Into<String>) {
        self.committed = value.into();
    }

    /// Take editing focus and open the panel.
    ///
    /// With an empty search buffer and a committed value, the buffer is seeded
    /// with the committed text.
    pub fn focus(&mut self) {
        if self.loading {
            return;
        }
        self.focused = true;
        if !self.open {
            if self.search.is_empty() && !self.committed.is_empty() {
                self.search.set(self.committed.clone());
            }
            self.open = true;
            self.refilter();
            self.sync_subscription();
        }
    }

    /// Close the panel and give up focus (outside press, focus moved away).
    pub fn dismiss(&mut self) {
        if self.loading {
            return;
        }
        self.close();
        self.focused = false;
    }

    /// Commit the row at `position` in the filtered list and close.
    pub fn select(&mut self, position: usize) -> Option<ComboboxChange> {
        if self.loading {
            return None;
        }
        let label = self.options.get(*self.filtered.get(position)?)?.clone();
        let changed = label != self.committed;
        self.committed = label.clone();
        self.close();
        changed.then_some(ComboboxChange::Committed(label))
    }

    /// Highlight the row under the pointer.
    pub fn hover(&mut self, position: usize) {
        if self.loading || !self.open || position >= self.filtered.len() {
            return;
        }
        self.highlighted = Some(position);
    }

    /// The clear affordance: drop value and search text, keep focus and the
    /// open/closed state.
    pub fn clear(&mut self) -> Option<ComboboxChange> {
        if self.loading {
            return None;
        }
        let had_value = !self.committed.is_empty();
        self.committed.clear();
        self.search.clear();
        self.refilter();
        self.focused = true;
        had_value.then_some(ComboboxChange::Cleared)
    }

    /// Scroll the panel without moving the highlight.
    pub fn scroll(&mut self, delta: isize) {
        if self.open && !self.loading {
            self.view.scroll_by(delta);
        }
    }

    fn open_with_highlight(&mut self) {
        self.open = true;
        self.refilter();
        self.highlighted = if self.filtered.is_empty() {
            None
        } else {
            Some(0)
        };
        self.sync_subscription();
    }

    fn close(&mut self) {
        self.open = false;
        self.search.clear();
        self.refilter();
        self.sync_subscription();
    }

    fn refilter(&mut self) {
        self.filtered = matching_indices(&self.options, self.search.as_str());
        self.highlighted = None;
        self.view.set_total(self.filtered.len());
        self.view.reset();
    }

    fn move_highlight(&mut self, forward: bool) {
        let len = self.filtered.len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        let next = match (self.highlighted, forward) {
            (Some(i), true) if i + 1 < len => i + 1,
            (_, true) => 0,
            (Some(i), false) if i > 0 => i - 1,
            (_, false) => len - 1,
        };
        self.highlighted = Some(next);
        self.view.ensure_visible(next);
    }

    /// Apply a text edit, opening the panel on the displayed text if closed.
    fn edit(&mut self, apply: impl FnOnce(&mut TextBuffer) -> bool) -> Option<ComboboxChange> {
        if !self.open {
            self.search.set(self.committed.clone());
            self.open = true;
            self.sync_subscription();
        }
        if apply(&mut self.search) {
            self.refilter();
        }
        if !self.committed.is_empty() && self.search.as_str() != self.committed {
            self.committed.clear();
            return Some(ComboboxChange::Cleared);
        }
        None
    }

    fn sync_subscription(&self) {
        if let Some(sub) = &self.subscription {
            sub.set_active(self.open);
        }
    }

    /// Tell the pointer hub which screen regions count as inside.
    pub fn update_pointer_regions(&self, layout: &ComboboxLayout) {
        if let Some(sub) = &self.subscription {
            let mut regions = vec![layout.input];
            regions.extend(layout.panel);
            sub.set_regions(regions);
        }
    }

    /// Geometry for a field placed at `area` on a screen of size `screen`.
    pub fn layout(&self, area: Rect, screen: Rect) -> ComboboxLayout {
        let input = Rect {
            height: area.height.min(3),
            ..area
        };

        let clear = (self.has_clear_affordance() && input.width >= 12 && input.height >= 3)
            .then(|| Rect::new(input.right().saturating_sub(5), input.y + 1, 3, 1));

        let mut layout = ComboboxLayout {
            input,
            clear,
            panel: None,
            rows: Vec::new(),
        };
        if !self.open || self.loading {
            return layout;
        }

        let row_count = if self.filtered.is_empty() {
            1
        } else {
            self.filtered.len().min(MAX_VISIBLE_ROWS)
        } as u16;
        let y = input.bottom();
        let height = (row_count + 2).min(screen.bottom().saturating_sub(y));
        if height < 3 {
            return layout;
        }
        let panel = Rect::new(input.x, y, input.width, height);
        layout.panel = Some(panel);

        if !self.filtered.is_empty() {
            let inner_height = (height - 2) as usize;
            let row_width = if self.view.needs_scrollbar() {
                panel.width.saturating_sub(3)
            } else {
                panel.width.saturating_sub(2)
            };
            layout.rows = self
                .view
                .visible_range()
                .take(inner_height)
                .enumerate()
                .map(|(i, pos)| (pos, Rect::new(panel.x + 1, panel.y + 1 + i as u16, row_width, 1)))
                .collect();
        }
        layout
    }

    /// Draw the open panel. Call after every other field so it overlays them.
    pub fn render_panel(&self, layout: &ComboboxLayout, buf: &mut Buffer) {
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

        if self.filtered.is_empty() {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                self.empty_message(),
                inner.width.saturating_sub(1) as usize,
                Style::default().fg(TEXT_DIM).bg(SURFACE_1),
            );
            return;
        }

        for (pos, row) in &layout.rows {
            let Some(label) = self.filtered.get(*pos).map(|&i| self.options[i].as_str()) else {
                continue;
            };
            let style = row_style(self.highlighted == Some(*pos));
            buf.set_style(*row, style);
            buf.set_stringn(row.x + 1, row.y, label, row.width.saturating_sub(3) as usize, style);
            if label == self.committed {
                buf.set_string(row.right().saturating_sub(1), row.y, "✓", style.fg(ACCENT));
            }
        }

        let scrollbar = Rect::new(inner.right().saturating_sub(1), inner.y, 1, inner.height);
        render_scrollbar(scrollbar, buf, &self.view);
    }
}

impl Component for ComboboxState {
    type Output = ComboboxChange;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 8 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDER)
            .border_style(border_style(self.focused))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let text_width = inner.width.saturating_sub(6) as usize;
        let x = inner.x + 1;
        if self.loading {
            buf.set_stringn(x, inner.y, "Loading...", text_width, placeholder_style());
        } else if self.display_text().is_empty() {
            if !self.open {
                buf.set_stringn(x, inner.y, &self.placeholder, text_width, placeholder_style());
            }
        } else {
            buf.set_stringn(x, inner.y, self.display_text(), text_width, Style::default().fg(TEXT));
        }

        if self.focused && self.open {
            let cx = x + self.search.cursor_column();
            if cx < inner.right().saturating_sub(5)
                && let Some(cell) = buf.cell_mut((cx, inner.y))
            {
                cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }

        let layout = self.layout(area, area);
        if let Some(clear) = layout.clear {
            buf.set_string(clear.x + 1, clear.y, "✕", Style::default().fg(TEXT_DIM));
        }
        let arrow = if self.open { "▴" } else { "▾" };
        buf.set_string(inner.right().saturating_sub(1), inner.y, arrow, Style::default().fg(TEXT_DIM));
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<ComboboxChange> {
        if self.loading {
            return ComponentResult::NotHandled;
        }
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            return ComponentResult::NotHandled;
        }
        self.focused = true;

        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Down => {
                    self.open_with_highlight();
                    ComponentResult::Handled
                }
                KeyCode::Esc => {
                    self.dismiss();
                    ComponentResult::Cancelled
                }
                _ if is_edit_key(&key) => self.edit(|buf| buf.apply_key(key)).into(),
                _ => ComponentResult::NotHandled,
            };
        }

        match key.code {
            KeyCode::Down => {
                self.move_highlight(true);
                ComponentResult::Handled
            }
            KeyCode::Up => {
                self.move_highlight(false);
                ComponentResult::Handled
            }
            KeyCode::Enter => match self.highlighted {
                Some(pos) => self.select(pos).into(),
                None => ComponentResult::Handled,
            },
            KeyCode::Esc => {
                self.dismiss();
                ComponentResult::Cancelled
            }
            KeyCode::Backspace if self.search.is_empty() && !self.committed.is_empty() => {
                self.committed.clear();
                ComponentResult::Changed(ComboboxChange::Cleared)
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
                self.search.apply_key(key);
                ComponentResult::Handled
            }
            _ if is_edit_key(&key) => self.edit(|buf| buf.apply_key(key)).into(),
            _ => ComponentResult::NotHandled,
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focused: bool) -> Option<ComboboxChange> {
        if focused {
            self.focus();
        } else {
            self.dismiss();
            self.focused = false;
        }
        None
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.open {
            vec![("↑↓", "Navigate"), ("Enter", "Select"), ("Esc", "Close")]
        } else {
            vec![("Type", "Search"), ("↓", "Open")]
        }
    }

    fn handle_paste(&mut self, text: &str) -> ComponentResult<ComboboxChange> {
        if self.loading {
            return ComponentResult::NotHandled;
        }
        self.focused = true;
        let line = text.lines().next().unwrap_or_default().to_string();
        self.edit(|buf| {
            buf.insert_str(&line);
            !line.is_empty()
        })
        .into()
    }
}
