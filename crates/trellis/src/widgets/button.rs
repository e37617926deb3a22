//! Button widget.

use super::{Callback, Tick, centered, fire, run_tick};
use crate::{
    Context, ViewContext,
    error::Result,
    event::Event,
    render::{Render, TextStyle},
    style::{Color, Paint},
    widget::{EventOutcome, Widget},
};

/// A pressable button with a centered label.
///
/// The button tracks hover and press state from pointer events. A press
/// inside the button followed by a release inside fires `on_press`,
/// `on_click` and `on_release` in that order; releasing outside skips the
/// click. Hover and leave fire only on transitions.
pub struct Button {
    /// Label text.
    label: String,
    /// Label size.
    text_size: f32,
    /// Label color.
    text_color: Color,
    /// Logical font filename for the label.
    font: Option<String>,
    /// Body fill.
    fill: Color,
    /// Outline color.
    outline: Color,
    /// Outline thickness.
    outline_thickness: f32,
    /// Fraction the fill darkens by while hovered.
    hover_darken: f32,
    /// Pointer is over the button.
    hovered: bool,
    /// Primary button went down inside and has not come up yet.
    pressed: bool,
    /// Fired when a press starts.
    on_press: Option<Callback>,
    /// Fired when a press is released inside.
    on_click: Option<Callback>,
    /// Fired when a press ends, inside or not.
    on_release: Option<Callback>,
    /// Fired when the pointer enters.
    on_hover: Option<Callback>,
    /// Fired when the pointer leaves.
    on_leave: Option<Callback>,
    /// Per-frame callback.
    on_tick: Option<Tick<Self>>,
}

impl Button {
    /// Construct a button with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text_size: 24.0,
            text_color: Color::BLACK,
            font: None,
            fill: Color::rgb(220, 220, 220),
            outline: Color::BLACK,
            outline_thickness: 2.0,
            hover_darken: 0.15,
            hovered: false,
            pressed: false,
            on_press: None,
            on_click: None,
            on_release: None,
            on_hover: None,
            on_leave: None,
            on_tick: None,
        }
    }

    /// Set the label size.
    pub fn text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    /// Set the label color.
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Draw the label with a named font.
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }

    /// Set the body fill.
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// Set the outline.
    pub fn outline(mut self, color: Color, thickness: f32) -> Self {
        self.outline = color;
        self.outline_thickness = thickness;
        self
    }

    /// Set how much the fill darkens on hover.
    pub fn hover_darken(mut self, amount: f32) -> Self {
        self.hover_darken = amount;
        self
    }

    /// Callback for the start of a press.
    pub fn on_press(mut self, f: impl FnMut(&mut dyn Context) -> Result<()> + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Callback for a completed click.
    pub fn on_click(mut self, f: impl FnMut(&mut dyn Context) -> Result<()> + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Callback for the end of a press.
    pub fn on_release(mut self, f: impl FnMut(&mut dyn Context) -> Result<()> + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    /// Callback for the pointer entering.
    pub fn on_hover(mut self, f: impl FnMut(&mut dyn Context) -> Result<()> + 'static) -> Self {
        self.on_hover = Some(Box::new(f));
        self
    }

    /// Callback for the pointer leaving.
    pub fn on_leave(mut self, f: impl FnMut(&mut dyn Context) -> Result<()> + 'static) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    /// Per-frame callback.
    pub fn on_tick(
        mut self,
        f: impl FnMut(&mut Self, &mut dyn Context, f32) -> Result<()> + 'static,
    ) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    /// The label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Is the pointer over the button?
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Is a press in progress?
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Fill for the current state.
    fn current_fill(&self) -> Color {
        if self.pressed {
            self.fill.darken(self.hover_darken * 1.8)
        } else if self.hovered {
            self.fill.darken(self.hover_darken)
        } else {
            self.fill
        }
    }
}

impl Widget for Button {
    fn render(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        let rect = ctx.rect();
        r.rect(
            rect,
            Paint::fill(self.current_fill()).outline(self.outline, self.outline_thickness),
        )?;
        let mut style = TextStyle::new(self.text_size, self.text_color);
        if let Some(font) = &self.font {
            style = style.font(font.clone());
        }
        let size = ctx.metrics().measure(&self.label, self.text_size);
        r.text(&self.label, centered(rect, size), &style)
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        let rect = ctx.rect();
        match *event {
            Event::PointerMove { pos } => {
                let inside = rect.contains_point(pos);
                if inside == self.hovered {
                    return Ok(EventOutcome::Ignore);
                }
                self.hovered = inside;
                if inside {
                    fire(&mut self.on_hover, ctx)?;
                } else {
                    fire(&mut self.on_leave, ctx)?;
                }
                Ok(EventOutcome::Handle)
            }
            Event::PointerDown { pos, button } if button.is_primary() && rect.contains_point(pos) => {
                if !self.pressed {
                    self.pressed = true;
                    fire(&mut self.on_press, ctx)?;
                }
                Ok(EventOutcome::Handle)
            }
            Event::PointerUp { pos, button } if button.is_primary() && self.pressed => {
                self.pressed = false;
                if rect.contains_point(pos) {
                    fire(&mut self.on_click, ctx)?;
                }
                fire(&mut self.on_release, ctx)?;
                Ok(EventOutcome::Handle)
            }
            _ => Ok(EventOutcome::Ignore),
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut dyn Context) -> Result<()> {
        run_tick(self, ctx, dt, |b| &mut b.on_tick)
    }
}
