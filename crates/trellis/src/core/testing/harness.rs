use super::backend::RecordingSurface;
use crate::{
    Gui, Options,
    error::Result,
    event::{Event, key::Key, mouse::Button},
    geom::Vec2,
};

/// A [`Gui`] wired to a [`RecordingSurface`]. Tests drive the UI with
/// pointer and keyboard helpers, run frames, and inspect the recorded draw
/// calls.
pub struct Harness {
    /// The registry under test.
    pub gui: Gui,
    /// The surface frames are drawn to.
    pub surface: RecordingSurface,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// A harness with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// A harness whose registry is configured by `options`.
    pub fn with_options(options: Options) -> Self {
        Self {
            gui: Gui::with_options(options),
            surface: RecordingSurface::default(),
        }
    }

    /// Run one frame: update by `dt`, then render to a cleared surface.
    pub fn frame(&mut self, dt: f32) -> Result<()> {
        self.gui.update(dt)?;
        self.surface.clear();
        self.gui.render(&mut self.surface)
    }

    /// Deliver an event.
    pub fn event(&mut self, event: Event) -> Result<()> {
        self.gui.handle_event(&event)?;
        Ok(())
    }

    /// Move the pointer.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<()> {
        self.event(Event::PointerMove {
            pos: Vec2::new(x, y),
        })
    }

    /// Press the primary button.
    pub fn press(&mut self, x: f32, y: f32) -> Result<()> {
        self.event(Event::PointerDown {
            pos: Vec2::new(x, y),
            button: Button::Left,
        })
    }

    /// Release the primary button.
    pub fn release(&mut self, x: f32, y: f32) -> Result<()> {
        self.event(Event::PointerUp {
            pos: Vec2::new(x, y),
            button: Button::Left,
        })
    }

    /// Press and release the primary button at one point.
    pub fn click(&mut self, x: f32, y: f32) -> Result<()> {
        self.press(x, y)?;
        self.release(x, y)
    }

    /// Press and release a key.
    pub fn key(&mut self, key: impl Into<Key>) -> Result<()> {
        let key = key.into();
        self.event(Event::KeyDown(key))?;
        self.event(Event::KeyUp(key))
    }

    /// Type each printable character of `text`.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        for e in text.chars().filter_map(Event::text) {
            self.event(e)?;
        }
        Ok(())
    }
}
