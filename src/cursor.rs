//! 1-based wrapping position within a deck.

/// Max position used before any deck has been loaded.
pub const DEFAULT_MAX_POSITION: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub position: usize,
    pub max_position: usize,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POSITION)
    }
}

impl CursorState {
    /// Cursor at position 1. `max_position` is clamped to at least 1.
    pub fn new(max_position: usize) -> Self {
        Self {
            position: 1,
            max_position: max_position.max(1),
        }
    }

    /// Cursor sized to a freshly loaded deck of `len` cards.
    pub fn for_deck(len: usize) -> Self {
        Self::new(len)
    }

    /// Next position, wrapping past `max_position` back to 1.
    pub fn advance(self) -> Self {
        let position = if self.position < self.max_position {
            self.position + 1
        } else {
            1
        };
        Self { position, ..self }
    }

    /// Cursor at `position`, or `None` if outside `1..=max_position`.
    pub fn at(self, position: usize) -> Option<Self> {
        (1..=self.max_position)
            .contains(&position)
            .then_some(Self { position, ..self })
    }

    /// 0-based index into the deck.
    pub fn index(&self) -> usize {
        self.position.saturating_sub(1)
    }

    /// `position/max` label.
    pub fn label(&self) -> String {
        format!("{}/{}", self.position, self.max_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_forward() {
        let c = CursorState {
            position: 3,
            max_position: 10,
        };
        assert_eq!(c.advance().position, 4);
        assert_eq!(c.advance().max_position, 10);
    }

    #[test]
    fn advance_wraps_after_max() {
        let c = CursorState {
            position: 10,
            max_position: 10,
        };
        assert_eq!(
            c.advance(),
            CursorState {
                position: 1,
                max_position: 10
            }
        );
    }

    #[test]
    fn single_card_deck_stays_put() {
        assert_eq!(CursorState::for_deck(1).advance().position, 1);
        assert_eq!(CursorState::for_deck(0).max_position, 1);
    }

    #[test]
    fn default_before_first_load() {
        let c = CursorState::default();
        assert_eq!(c.label(), "1/10");
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn jump_is_bounds_checked() {
        let c = CursorState::new(3);
        assert_eq!(c.at(3).map(|c| c.index()), Some(2));
        assert_eq!(c.at(0), None);
        assert_eq!(c.at(4), None);
    }
}
