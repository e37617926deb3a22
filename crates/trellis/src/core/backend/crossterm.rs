//! Translation from crossterm's native events into engine events.

use crossterm::event as cevent;

use crate::{
    event::{Event, key, mouse},
    geom::Vec2,
};

/// Translate crossterm key modifiers.
fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

/// Translate a crossterm mouse button.
fn translate_button(b: cevent::MouseButton) -> mouse::Button {
    match b {
        cevent::MouseButton::Left => mouse::Button::Left,
        cevent::MouseButton::Right => mouse::Button::Right,
        cevent::MouseButton::Middle => mouse::Button::Middle,
    }
}

/// Translate a crossterm key code. Codes with no engine equivalent map to
/// `None`.
fn translate_key_code(code: cevent::KeyCode) -> Option<key::KeyCode> {
    Some(match code {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        _ => return None,
    })
}

/// Terminal cells are addressed by column and row.
fn cell_position(m: &cevent::MouseEvent) -> Vec2 {
    Vec2::new(f32::from(m.column), f32::from(m.row))
}

/// Translate one crossterm event into zero or more engine events.
///
/// Pointer motion and drags become pointer moves, button presses carry the
/// button index, and key presses and repeats also produce a text event for
/// printable ASCII typed without ctrl or alt. Pastes become one text event
/// per printable character. Everything else is dropped.
pub fn translate(e: &cevent::Event) -> Vec<Event> {
    match e {
        cevent::Event::Key(k) => {
            let Some(code) = translate_key_code(k.code) else {
                return Vec::new();
            };
            let key = key::Key::new(translate_key_modifiers(k.modifiers), code);
            match k.kind {
                cevent::KeyEventKind::Release => vec![Event::KeyUp(key)],
                cevent::KeyEventKind::Press | cevent::KeyEventKind::Repeat => {
                    let mut out = vec![Event::KeyDown(key)];
                    if let key::KeyCode::Char(c) = code
                        && !key.mods.is_command()
                        && let Some(text) = Event::text(c)
                    {
                        out.push(text);
                    }
                    out
                }
            }
        }
        cevent::Event::Mouse(m) => {
            let pos = cell_position(m);
            match m.kind {
                cevent::MouseEventKind::Moved | cevent::MouseEventKind::Drag(_) => {
                    vec![Event::PointerMove { pos }]
                }
                cevent::MouseEventKind::Down(b) => vec![Event::PointerDown {
                    pos,
                    button: translate_button(b),
                }],
                cevent::MouseEventKind::Up(b) => vec![Event::PointerUp {
                    pos,
                    button: translate_button(b),
                }],
                _ => Vec::new(),
            }
        }
        cevent::Event::Paste(s) => s.chars().filter_map(Event::text).collect(),
        _ => Vec::new(),
    }
}
