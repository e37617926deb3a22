//! Keyboard input primitives.
use std::ops::Add;

/// Modifier keys held during a key event.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Alt held.
    pub alt: bool,
}

impl Mods {
    /// Is ctrl or alt held? Text input is suppressed under these.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

impl Add<char> for Mods {
    type Output = Key;

    fn add(self, other: char) -> Self::Output {
        Key {
            mods: self,
            key: other.into(),
        }
    }
}

/// No modifiers.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Shift only.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods {
    shift: true,
    ctrl: false,
    alt: false,
};

/// Control only.
#[allow(non_upper_case_globals)]
pub const Ctrl: Mods = Mods {
    shift: false,
    ctrl: true,
    alt: false,
};

/// Alt only.
#[allow(non_upper_case_globals)]
pub const Alt: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: true,
};

/// A key code.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum KeyCode {
    /// Backspace.
    Backspace,
    /// Enter or return.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Tab.
    Tab,
    /// Shift-tab.
    BackTab,
    /// Delete.
    Delete,
    /// Insert.
    Insert,
    /// Escape.
    Esc,
    /// Function key.
    F(u8),
    /// A character key.
    Char(char),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// A key code plus the modifiers held with it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Key {
    /// Modifiers.
    pub mods: Mods,
    /// Key code.
    pub key: KeyCode,
}

impl Key {
    /// Construct a key from modifiers and a code.
    pub fn new(mods: Mods, key: KeyCode) -> Self {
        Self { mods, key }
    }
}

impl From<KeyCode> for Key {
    fn from(key: KeyCode) -> Self {
        Self { mods: Empty, key }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self {
            mods: Empty,
            key: KeyCode::Char(c),
        }
    }
}

impl PartialEq<KeyCode> for Key {
    fn eq(&self, other: &KeyCode) -> bool {
        self.key == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose() {
        assert_eq!(Ctrl + 'c', Key::new(Ctrl, KeyCode::Char('c')));
        assert_eq!(Key::from(KeyCode::Enter), KeyCode::Enter);
        assert!((Ctrl + 'x').mods.is_command());
        assert!(!(Shift + 'X').mods.is_command());
    }
}
