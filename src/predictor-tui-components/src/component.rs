//! Core Component trait and types.
//!
//! Every interactive form field implements [`Component`], so the application
//! can route keys and focus without knowing which kind of field it talks to.

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Result of handling a key event in a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentResult<T = ()> {
    /// Component handled the event, its value is unchanged
    Handled,
    /// Component did not handle the event, propagate to parent
    NotHandled,
    /// Component handled the event and its value changed
    Changed(T),
    /// Component gave up focus (e.g., Escape pressed)
    Cancelled,
}

impl<T> ComponentResult<T> {
    /// Returns true if the component consumed the event.
    pub fn is_handled(&self) -> bool {
        !matches!(self, ComponentResult::NotHandled)
    }

    /// Returns the new value, if the event changed it.
    pub fn changed(self) -> Option<T> {
        match self {
            ComponentResult::Changed(v) => Some(v),
            _ => None,
        }
    }

    /// Maps the inner value if Changed.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ComponentResult<U> {
        match self {
            ComponentResult::Handled => ComponentResult::Handled,
            ComponentResult::NotHandled => ComponentResult::NotHandled,
            ComponentResult::Changed(v) => ComponentResult::Changed(f(v)),
            ComponentResult::Cancelled => ComponentResult::Cancelled,
        }
    }
}

impl<T> From<Option<T>> for ComponentResult<T> {
    fn from(change: Option<T>) -> Self {
        match change {
            Some(v) => ComponentResult::Changed(v),
            None => ComponentResult::Handled,
        }
    }
}

/// Core trait for all form fields.
pub trait Component {
    /// The value reported when the field changes.
    type Output;

    /// Render the field (not its popup panel) into `area`.
    fn render(&self, area: Rect, buf: &mut Buffer);

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output>;

    /// Whether the field currently owns keyboard input.
    fn is_focused(&self) -> bool;

    /// Give or take keyboard focus.
    ///
    /// Taking focus away must leave the field closed.
    fn set_focus(&mut self, focused: bool) -> Option<Self::Output>;

    /// Key hints shown in the footer while focused.
    ///
    /// Each tuple is (key_label, description).
    fn key_hints(&self) -> Vec<(&'static str, &'static str)>;

    /// Handle pasted text. Default implementation ignores it.
    fn handle_paste(&mut self, _text: &str) -> ComponentResult<Self::Output> {
        ComponentResult::NotHandled
    }

    /// Number of terminal rows the field occupies in the form layout.
    fn height(&self) -> u16 {
        3
    }
}
