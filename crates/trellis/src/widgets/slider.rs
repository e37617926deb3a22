//! Slider widget.

use std::{cell::Cell, rc::Rc};

use super::{Tick, run_tick};
use crate::{
    Context, ViewContext,
    error::Result,
    event::Event,
    geom::{Rect, Vec2},
    render::{Render, TextStyle},
    style::{Color, Paint},
    widget::{EventOutcome, Widget},
};

/// Callback receiving the slider's new value.
pub type ChangeCallback = Box<dyn FnMut(f32, &mut dyn Context) -> Result<()>>;

/// A horizontal slider over a numeric range. Pressing the track with the
/// primary button starts a drag, and the value follows the pointer's x
/// position, snapped to the step and clamped to the range.
pub struct Slider {
    /// Lower bound.
    min: f32,
    /// Upper bound.
    max: f32,
    /// Snap increment. Zero or less disables snapping.
    step: f32,
    /// Current value.
    value: f32,
    /// Shared binding kept in sync with the value.
    binding: Option<Rc<Cell<f32>>>,
    /// Draw the value beside the track.
    show_value: bool,
    /// A drag is in progress.
    dragging: bool,
    /// Pointer is over the slider.
    hovered: bool,
    /// Track fill.
    fill: Color,
    /// Outline color.
    border: Color,
    /// Outline thickness.
    border_thickness: f32,
    /// Value text size.
    text_size: f32,
    /// Value text color.
    text_color: Color,
    /// Fired when the value changes.
    on_change: Option<ChangeCallback>,
    /// Per-frame callback.
    on_tick: Option<Tick<Self>>,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl Slider {
    /// A slider over 0 to 100 with a step of 1.
    pub fn new() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            value: 0.0,
            binding: None,
            show_value: true,
            dragging: false,
            hovered: false,
            fill: Color::rgb(180, 180, 180),
            border: Color::BLACK,
            border_thickness: 2.0,
            text_size: 18.0,
            text_color: Color::BLACK,
            on_change: None,
            on_tick: None,
        }
    }

    /// Set the range. The current value is clamped into it.
    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self.value = self.clamp(self.value);
        self.push_binding();
        self
    }

    /// Set the snap increment.
    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set the initial value, clamped to the range.
    pub fn value(mut self, value: f32) -> Self {
        self.value = self.clamp(value);
        self.push_binding();
        self
    }

    /// Share the value through `binding`. The slider takes the binding's
    /// current value.
    pub fn bind(mut self, binding: Rc<Cell<f32>>) -> Self {
        self.value = self.clamp(binding.get());
        binding.set(self.value);
        self.binding = Some(binding);
        self
    }

    /// Draw or hide the value text.
    pub fn show_value(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    /// Set the track fill.
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    /// Set the outline.
    pub fn border(mut self, thickness: f32, color: Color) -> Self {
        self.border_thickness = thickness;
        self.border = color;
        self
    }

    /// Set the value text style.
    pub fn text(mut self, size: f32, color: Color) -> Self {
        self.text_size = size;
        self.text_color = color;
        self
    }

    /// Callback fired with the new value.
    pub fn on_change(mut self, f: impl FnMut(f32, &mut dyn Context) -> Result<()> + 'static) -> Self {
        self.on_change = Some(Box::new(f));
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

    /// The current value.
    pub fn get(&self) -> f32 {
        match &self.binding {
            Some(b) => self.clamp(b.get()),
            None => self.value,
        }
    }

    /// Set the value, clamped to the range, and fire `on_change`.
    pub fn set_value(&mut self, value: f32, ctx: &mut dyn Context) -> Result<()> {
        self.value = self.clamp(value);
        self.push_binding();
        match self.on_change.as_mut() {
            Some(cb) => cb(self.value, ctx),
            None => Ok(()),
        }
    }

    /// Is a drag in progress?
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Clamp into the range.
    fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min.min(self.max), self.max.max(self.min))
    }

    /// Fraction of the range the value sits at.
    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    /// The value under pointer x coordinate `x`.
    fn value_at(&self, rect: Rect, x: f32) -> f32 {
        let t = if rect.w > 0.0 {
            ((x - rect.tl.x) / rect.w).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let span = self.max - self.min;
        if self.step > 0.0 {
            // Round to the nearest step that still lies inside the range.
            let last = (span / self.step).trunc();
            let steps = (t * span / self.step).round();
            self.min + steps.clamp(last.min(0.0), last.max(0.0)) * self.step
        } else {
            self.min + t * span
        }
    }

    /// Take the binding's value if it was changed elsewhere.
    fn pull_binding(&mut self) {
        if let Some(b) = &self.binding {
            self.value = self.clamp(b.get());
        }
    }

    /// Publish the value to the binding.
    fn push_binding(&self) {
        if let Some(b) = &self.binding {
            b.set(self.value);
        }
    }
}

impl Widget for Slider {
    fn render(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        self.pull_binding();
        let rect = ctx.rect();
        let mid = rect.tl.y + rect.h / 2.0;
        let track_h = rect.h / 6.0;
        r.rect(
            Rect::new(rect.tl.x, mid - track_h / 2.0, rect.w, track_h),
            Paint::fill(self.fill).outline(self.border, self.border_thickness),
        )?;

        // Knob: a diamond centered on the value.
        let x = rect.tl.x + self.fraction() * rect.w;
        let (hw, hh) = (rect.h * 0.2, rect.h * 0.45);
        let knob = if self.dragging {
            Color::rgb(100, 200, 255)
        } else if self.hovered {
            Color::rgb(60, 160, 255)
        } else {
            Color::rgb(200, 200, 200)
        };
        r.polygon(
            &[
                Vec2::new(x, mid - hh),
                Vec2::new(x + hw, mid),
                Vec2::new(x, mid + hh),
                Vec2::new(x - hw, mid),
            ],
            Paint::fill(knob).outline(self.border, self.border_thickness),
        )?;

        if self.show_value {
            let text = format!("{:.2}", self.value);
            let height = ctx.metrics().measure(&text, self.text_size).y;
            let at = Vec2::new(rect.tl.x + rect.w + 10.0, mid - height / 2.0);
            r.text(&text, at, &TextStyle::new(self.text_size, self.text_color))?;
        }
        Ok(())
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        self.pull_binding();
        let rect = ctx.rect();
        match *event {
            Event::PointerMove { pos } => {
                self.hovered = rect.contains_point(pos);
                if !self.dragging {
                    return Ok(EventOutcome::Ignore);
                }
                self.set_value(self.value_at(rect, pos.x), ctx)?;
                Ok(EventOutcome::Handle)
            }
            Event::PointerDown { pos, button } if button.is_primary() && rect.contains_point(pos) => {
                self.dragging = true;
                self.set_value(self.value_at(rect, pos.x), ctx)?;
                Ok(EventOutcome::Handle)
            }
            Event::PointerUp { button, .. } if button.is_primary() && self.dragging => {
                self.dragging = false;
                Ok(EventOutcome::Handle)
            }
            _ => Ok(EventOutcome::Ignore),
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut dyn Context) -> Result<()> {
        run_tick(self, ctx, dt, |s| &mut s.on_tick)
    }
}
