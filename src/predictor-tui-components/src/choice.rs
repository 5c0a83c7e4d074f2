//! Single-choice field cycled with the arrow keys.

use crate::component::{Component, ComponentResult};
use crate::style::{ACCENT, ROUNDED_BORDER, TEXT, TEXT_MUTED, border_style};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Widget};

/// A labelled option of a [`ChoiceField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Field showing one choice at a time; `←`/`→` cycle through the list.
#[derive(Debug, Clone)]
pub struct ChoiceField {
    title: String,
    choices: Vec<Choice>,
    selected: usize,
    focused: bool,
}

impl ChoiceField {
    pub fn new(title: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            title: title.into(),
            choices,
            selected: 0,
            focused: false,
        }
    }

    /// Preselect the choice with `value`, if present.
    pub fn with_value(mut self, value: &str) -> Self {
        self.select_value(value);
        self
    }

    pub fn selected(&self) -> Option<&Choice> {
        self.choices.get(self.selected)
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected().map(|c| c.value.as_str())
    }

    /// Returns false if no choice has `value`.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.choices.iter().position(|c| c.value == value) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) -> Option<String> {
        if self.choices.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.choices.len();
        self.selected_value().map(str::to_string)
    }

    pub fn select_prev(&mut self) -> Option<String> {
        if self.choices.is_empty() {
            return None;
        }
        self.selected = if self.selected == 0 {
            self.choices.len() - 1
        } else {
            self.selected - 1
        };
        self.selected_value().map(str::to_string)
    }
}

impl Component for ChoiceField {
    type Output = String;

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

        let arrow_style = if self.focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        buf.set_string(inner.x, inner.y, "◀", arrow_style);
        if let Some(choice) = self.selected() {
            let text = format!("{} ({})", choice.label, choice.value);
            buf.set_stringn(
                inner.x + 2,
                inner.y,
                text,
                inner.width.saturating_sub(4) as usize,
                Style::default().fg(TEXT),
            );
        }
        buf.set_string(inner.right().saturating_sub(1), inner.y, "▶", arrow_style);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<String> {
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') => self.select_next().into(),
            KeyCode::Left => self.select_prev().into(),
            _ => ComponentResult::NotHandled,
        }
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focused: bool) -> Option<String> {
        self.focused = focused;
        None
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("←→", "Change")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn field() -> ChoiceField {
        ChoiceField::new(
            "Country",
            vec![
                Choice::new("USA", "United States"),
                Choice::new("CAN", "Canada"),
                Choice::new("GBR", "United Kingdom"),
            ],
        )
    }

    #[test]
    fn test_cycles_both_ways() {
        let mut field = field();
        assert_eq!(field.selected_value(), Some("USA"));
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(field.handle_key(left), ComponentResult::Changed("GBR".into()));
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(field.handle_key(right), ComponentResult::Changed("USA".into()));
    }

    #[test]
    fn test_with_value() {
        let field = field().with_value("CAN");
        assert_eq!(field.selected().map(|c| c.label.as_str()), Some("Canada"));
        let unknown = self::field().with_value("XXX");
        assert_eq!(unknown.selected_value(), Some("USA"));
    }
}
