//! The drawing contract between widgets and a concrete backend.

use std::mem;

use crate::{
    assets::{Assets, Font},
    error::Result,
    geom::{Rect, Vec2},
    style::{Color, Paint},
};

/// The region of world space a surface maps onto its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Visible world rectangle.
    pub rect: Rect,
}

impl View {
    /// A view over `rect`.
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// How a run of text is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text size in points.
    pub size: f32,
    /// Fill color.
    pub color: Color,
    /// Logical font filename. `None` uses the surface's default font.
    pub font: Option<String>,
}

impl TextStyle {
    /// Text of a given size and color in the default font.
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            font: None,
        }
    }

    /// Use a named font.
    pub fn font(mut self, name: impl Into<String>) -> Self {
        self.font = Some(name.into());
        self
    }
}

/// A render target. Implementations draw primitives in call order.
pub trait Surface {
    /// Draw a rectangle.
    fn rect(&mut self, rect: Rect, paint: &Paint) -> Result<()>;

    /// Draw text with its top-left corner at `at`. `font` is the loaded font
    /// named by the style, if any.
    fn text(&mut self, text: &str, at: Vec2, style: &TextStyle, font: Option<&Font>) -> Result<()>;

    /// Draw a convex polygon.
    fn polygon(&mut self, points: &[Vec2], paint: &Paint) -> Result<()>;

    /// The current view.
    fn view(&self) -> View;

    /// The screen-space view the surface started with.
    fn default_view(&self) -> View;

    /// Replace the current view.
    fn set_view(&mut self, view: View);
}

/// Render state threaded through a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderState {
    /// Offset added to every coordinate drawn.
    pub translation: Vec2,
}

impl RenderState {
    /// A state shifted further by `by`.
    pub fn translated(self, by: Vec2) -> Self {
        Self {
            translation: self.translation + by,
        }
    }

    /// Map a point into surface coordinates.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        p + self.translation
    }
}

/// Drawing handle given to widgets.
pub struct Render<'a> {
    /// Target surface.
    surface: &'a mut dyn Surface,
    /// Font and texture cache.
    assets: &'a mut Assets,
    /// Current state.
    state: RenderState,
}

impl<'a> Render<'a> {
    /// Wrap a surface.
    pub fn new(surface: &'a mut dyn Surface, assets: &'a mut Assets, state: RenderState) -> Self {
        Self {
            surface,
            assets,
            state,
        }
    }

    /// The current render state.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Replace the render state, returning the previous one.
    pub fn set_state(&mut self, state: RenderState) -> RenderState {
        mem::replace(&mut self.state, state)
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, rect: Rect, paint: Paint) -> Result<()> {
        let rect = rect.shift(self.state.translation);
        self.surface.rect(rect, &paint)
    }

    /// Draw text. A named font is loaded through the asset cache, and a
    /// failed load aborts the draw with a resource error.
    pub fn text(&mut self, text: &str, at: Vec2, style: &TextStyle) -> Result<()> {
        let font = match &style.font {
            Some(name) => Some(self.assets.font(name)?),
            None => None,
        };
        self.surface
            .text(text, self.state.apply(at), style, font.as_deref())
    }

    /// Draw a convex polygon.
    pub fn polygon(&mut self, points: &[Vec2], paint: Paint) -> Result<()> {
        let points: Vec<Vec2> = points.iter().map(|p| self.state.apply(*p)).collect();
        self.surface.polygon(&points, &paint)
    }
}
