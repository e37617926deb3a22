//! Input events delivered through the tree.

/// Keyboard primitives.
pub mod key;
/// Pointer primitives.
pub mod mouse;

use crate::geom::Vec2;

/// An input event in engine terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The pointer moved.
    PointerMove {
        /// Pointer position in screen space.
        pos: Vec2,
    },
    /// A pointer button went down.
    PointerDown {
        /// Pointer position in screen space.
        pos: Vec2,
        /// Button pressed.
        button: mouse::Button,
    },
    /// A pointer button came up.
    PointerUp {
        /// Pointer position in screen space.
        pos: Vec2,
        /// Button released.
        button: mouse::Button,
    },
    /// A key went down.
    KeyDown(key::Key),
    /// A key came up.
    KeyUp(key::Key),
    /// A printable character was entered.
    Text(char),
}

impl Event {
    /// Pointer position, for pointer events only.
    pub fn pos(&self) -> Option<Vec2> {
        match self {
            Self::PointerMove { pos } | Self::PointerDown { pos, .. } | Self::PointerUp { pos, .. } => {
                Some(*pos)
            }
            _ => None,
        }
    }

    /// Build a text event if `c` is printable ASCII (32 through 126).
    pub fn text(c: char) -> Option<Self> {
        is_printable(c).then_some(Self::Text(c))
    }
}

/// Is `c` in the printable ASCII range accepted as text input?
pub fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_range() {
        assert!(is_printable(' '));
        assert!(is_printable('~'));
        assert!(is_printable('a'));
        assert!(!is_printable('\u{7f}'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('é'));
        assert_eq!(Event::text('x'), Some(Event::Text('x')));
        assert_eq!(Event::text('\t'), None);
    }

    #[test]
    fn positions() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(Event::PointerMove { pos: p }.pos(), Some(p));
        assert_eq!(
            Event::PointerUp {
                pos: p,
                button: mouse::Button::Left
            }
            .pos(),
            Some(p)
        );
        assert_eq!(Event::Text('a').pos(), None);
    }
}
