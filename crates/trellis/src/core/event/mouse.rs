//! Pointer button primitives.

/// A pointer button.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Button {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
    /// Any other button, by index.
    Other(u8),
}

impl Button {
    /// The button index. The primary button is 0.
    pub fn index(&self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
            Self::Other(n) => *n,
        }
    }

    /// Is this the primary button?
    pub fn is_primary(&self) -> bool {
        self.index() == 0
    }
}

impl From<u8> for Button {
    fn from(index: u8) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Middle,
            n => Self::Other(n),
        }
    }
}
