//! Focus cycling over the fields of a form.

/// Direction of focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Tab
    Forward,
    /// Shift+Tab
    Backward,
}

/// Ordered ring of focusable targets, wrapping at both ends.
///
/// ```rust
/// use predictor_tui_components::focus::FocusRing;
///
/// let mut ring = FocusRing::new(vec!['a', 'b', 'c']);
/// assert_eq!(ring.current(), Some('a'));
/// ring.next();
/// ring.next();
/// ring.next();
/// assert_eq!(ring.current(), Some('a'));
/// ```
#[derive(Debug, Clone)]
pub struct FocusRing<F> {
    order: Vec<F>,
    current: usize,
}

impl<F: Copy + PartialEq> FocusRing<F> {
    pub fn new(order: Vec<F>) -> Self {
        Self { order, current: 0 }
    }

    /// Currently focused target.
    pub fn current(&self) -> Option<F> {
        self.order.get(self.current).copied()
    }

    pub fn is_focused(&self, target: F) -> bool {
        self.current() == Some(target)
    }

    /// Focus `target`. Returns false if it is not part of the ring.
    pub fn focus(&mut self, target: F) -> bool {
        match self.order.iter().position(|t| *t == target) {
            Some(i) => {
                self.current = i;
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) -> Option<F> {
        self.move_focus(FocusDirection::Forward)
    }

    pub fn prev(&mut self) -> Option<F> {
        self.move_focus(FocusDirection::Backward)
    }

    /// Move focus and return the newly focused target.
    pub fn move_focus(&mut self, direction: FocusDirection) -> Option<F> {
        let count = self.order.len();
        if count == 0 {
            return None;
        }
        self.current = match direction {
            FocusDirection::Forward => (self.current + 1) % count,
            FocusDirection::Backward => (self.current + count - 1) % count,
        };
        self.current()
    }

    pub fn order(&self) -> &[F] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Year,
        Submit,
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut ring = FocusRing::new(vec![Field::Name, Field::Year, Field::Submit]);
        assert_eq!(ring.prev(), Some(Field::Submit));
        assert_eq!(ring.next(), Some(Field::Name));
        assert_eq!(ring.next(), Some(Field::Year));
    }

    #[test]
    fn test_focus_by_target() {
        let mut ring = FocusRing::new(vec![Field::Name, Field::Year]);
        assert!(ring.focus(Field::Year));
        assert!(ring.is_focused(Field::Year));
        assert!(!ring.focus(Field::Submit));
        assert!(ring.is_focused(Field::Year));
    }

    #[test]
    fn test_empty_ring() {
        let mut ring: FocusRing<Field> = FocusRing::new(Vec::new());
        assert_eq!(ring.current(), None);
        assert_eq!(ring.next(), None);
    }
}
