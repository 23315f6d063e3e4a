//! Input-event mapping for hints.
//!
//! Hosts forward raw window input here; the deck only understands
//! [`CycleEvent`]s. Scrolling up or pressing the down arrow shows the next
//! hint, scrolling down or pressing the up arrow shows the previous one.

use std::cmp::Ordering;

/// A key the overlay window cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The up arrow key.
    UpArrow,
    /// The down arrow key.
    DownArrow,
    /// Any other key.
    Other,
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The key was pressed.
    Press,
    /// The key was released.
    Release,
    /// The key is auto-repeating.
    Repeat,
}

/// A raw input event forwarded by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Scroll wheel movement. Positive `y` is away from the user.
    Scroll {
        /// Horizontal scroll delta (unused).
        x: i32,
        /// Vertical scroll delta.
        y: i32,
    },
    /// A key event.
    Key {
        /// Which key.
        key: Key,
        /// What happened to it.
        action: KeyAction,
    },
}

/// A movement through the hint deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// Show the next hint, wrapping to the first after the last.
    Next,
    /// Show the previous hint, wrapping to the last before the first.
    Previous,
}

impl CycleEvent {
    /// Map a raw input event to a deck movement, if it is one.
    #[must_use]
    pub fn from_input(event: &InputEvent) -> Option<Self> {
        match *event {
            InputEvent::Scroll { y, .. } => match y.cmp(&0) {
                Ordering::Less => Some(Self::Previous),
                Ordering::Equal => None,
                Ordering::Greater => Some(Self::Next),
            },
            InputEvent::Key { key, action } => {
                if action == KeyAction::Press {
                    match key {
                        Key::UpArrow => Some(Self::Previous),
                        Key::DownArrow => Some(Self::Next),
                        Key::Other => None,
                    }
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_up_is_next() {
        let event = InputEvent::Scroll { x: 0, y: 1 };
        assert_eq!(CycleEvent::from_input(&event), Some(CycleEvent::Next));
    }

    #[test]
    fn test_scroll_down_is_previous() {
        let event = InputEvent::Scroll { x: 0, y: -2 };
        assert_eq!(CycleEvent::from_input(&event), Some(CycleEvent::Previous));
    }

    #[test]
    fn test_zero_scroll_ignored() {
        let event = InputEvent::Scroll { x: 3, y: 0 };
        assert_eq!(CycleEvent::from_input(&event), None);
    }

    #[test]
    fn test_horizontal_scroll_ignored() {
        // Only the vertical delta matters
        let event = InputEvent::Scroll { x: -5, y: 0 };
        assert_eq!(CycleEvent::from_input(&event), None);
    }

    #[test]
    fn test_down_arrow_press_is_next() {
        let event = InputEvent::Key {
            key: Key::DownArrow,
            action: KeyAction::Press,
        };
        assert_eq!(CycleEvent::from_input(&event), Some(CycleEvent::Next));
    }

    #[test]
    fn test_up_arrow_press_is_previous() {
        let event = InputEvent::Key {
            key: Key::UpArrow,
            action: KeyAction::Press,
        };
        assert_eq!(CycleEvent::from_input(&event), Some(CycleEvent::Previous));
    }

    #[test]
    fn test_key_release_ignored() {
        let event = InputEvent::Key {
            key: Key::DownArrow,
            action: KeyAction::Release,
        };
        assert_eq!(CycleEvent::from_input(&event), None);
    }

    #[test]
    fn test_key_repeat_ignored() {
        let event = InputEvent::Key {
            key: Key::UpArrow,
            action: KeyAction::Repeat,
        };
        assert_eq!(CycleEvent::from_input(&event), None);
    }

    #[test]
    fn test_other_key_ignored() {
        let event = InputEvent::Key {
            key: Key::Other,
            action: KeyAction::Press,
        };
        assert_eq!(CycleEvent::from_input(&event), None);
    }
}
