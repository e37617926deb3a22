//! Built-in widgets.

/// Button widget.
pub mod button;
/// Label widget.
pub mod label;
/// Stacking list container.
pub mod list;
/// Draggable root window.
pub mod root;
/// Slider widget.
pub mod slider;
/// Single-line text input.
pub mod text_field;

pub use button::Button;
pub use label::Label;
pub use list::List;
pub use root::Root;
pub use slider::Slider;
pub use text_field::TextField;

use crate::{
    Context,
    error::Result,
    geom::{Rect, Vec2},
    render::{Render, TextStyle},
    style::{Color, Paint},
    text::TextMetrics,
};

/// A callback fired on a widget state transition.
pub type Callback = Box<dyn FnMut(&mut dyn Context) -> Result<()>>;

/// A per-frame callback. Receives the widget, a context for its node and
/// the frame delta in seconds.
pub type Tick<W> = Box<dyn FnMut(&mut W, &mut dyn Context, f32) -> Result<()>>;

/// Run the tick callback held in `slot`, if any. The callback is taken out
/// for the call so it can borrow the widget, and put back unless the
/// callback installed a replacement.
pub(crate) fn run_tick<W>(
    widget: &mut W,
    ctx: &mut dyn Context,
    dt: f32,
    slot: fn(&mut W) -> &mut Option<Tick<W>>,
) -> Result<()> {
    let Some(mut tick) = slot(widget).take() else {
        return Ok(());
    };
    let out = tick(widget, ctx, dt);
    let held = slot(widget);
    if held.is_none() {
        *held = Some(tick);
    }
    out
}

/// Fire an optional callback.
pub(crate) fn fire(cb: &mut Option<Callback>, ctx: &mut dyn Context) -> Result<()> {
    match cb {
        Some(cb) => cb(ctx),
        None => Ok(()),
    }
}

/// Top-left corner that centers text of `size` inside `rect`.
pub(crate) fn centered(rect: Rect, size: Vec2) -> Vec2 {
    rect.tl + (rect.size() - size) * 0.5
}

/// Panel chrome shared by the container widgets: a body and an optional
/// header bar drawn directly above it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chrome {
    /// Body fill.
    pub fill: Color,
    /// Header bar base color. Drawn darkened.
    pub header_color: Color,
    /// Header height. Zero disables the header.
    pub header_height: f32,
    /// Header title.
    pub title: String,
}

impl Chrome {
    /// Default chrome with a header of `header_height`.
    pub fn new(header_height: f32) -> Self {
        Self {
            fill: Color::rgb(200, 200, 200),
            header_color: Color::rgb(60, 60, 60),
            header_height,
            title: String::new(),
        }
    }

    /// The header bar rectangle for a body at `body`.
    pub fn header(&self, body: Rect) -> Option<Rect> {
        (self.header_height > 0.0).then(|| {
            Rect::new(
                body.tl.x,
                body.tl.y - self.header_height,
                body.w,
                self.header_height,
            )
        })
    }

    /// Draw the body and header.
    pub fn draw(&self, r: &mut Render<'_>, body: Rect, metrics: &dyn TextMetrics) -> Result<()> {
        r.rect(body, Paint::fill(self.fill).outline(Color::BLACK, 2.0))?;
        if let Some(header) = self.header(body) {
            r.rect(
                header,
                Paint::fill(self.header_color.scale_brightness(0.7)).outline(Color::BLACK, 2.0),
            )?;
            if !self.title.is_empty() {
                let style = TextStyle::new(24.0, Color::WHITE);
                let size = metrics.measure(&self.title, style.size);
                let at = Vec2::new(header.tl.x + 10.0, centered(header, size).y);
                r.text(&self.title, at, &style)?;
            }
        }
        Ok(())
    }
}
