//! Stacking list container.

use super::{Chrome, Tick, run_tick};
use crate::{
    Context, ViewContext,
    core::node::NodeKind,
    error::Result,
    layout::{Arrangement, Layout, SizeMode},
    render::Render,
    style::Color,
    widget::Widget,
};

/// A container that stacks its children top to bottom, separated by the
/// node's spacing. Sizes itself to its children by default.
pub struct List {
    /// Panel chrome.
    chrome: Chrome,
    /// Per-frame callback.
    on_tick: Option<Tick<Self>>,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    /// Construct an empty list without a header.
    pub fn new() -> Self {
        Self {
            chrome: Chrome::new(0.0),
            on_tick: None,
        }
    }

    /// Set the body fill.
    pub fn fill(mut self, color: Color) -> Self {
        self.chrome.fill = color;
        self
    }

    /// Show a header bar above the list.
    pub fn header(mut self, title: impl Into<String>, height: f32) -> Self {
        self.chrome.title = title.into();
        self.chrome.header_height = height;
        self
    }

    /// Set the header base color.
    pub fn header_color(mut self, color: Color) -> Self {
        self.chrome.header_color = color;
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

    /// The header title.
    pub fn title(&self) -> &str {
        &self.chrome.title
    }
}

impl Widget for List {
    fn layout(&self) -> Layout {
        Layout::new().size_mode(SizeMode::FitContent)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Container
    }

    fn arrangement(&self) -> Arrangement {
        Arrangement::Stack
    }

    fn render(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        self.chrome.draw(r, ctx.rect(), ctx.metrics())
    }

    fn update(&mut self, dt: f32, ctx: &mut dyn Context) -> Result<()> {
        run_tick(self, ctx, dt, |l| &mut l.on_tick)
    }
}
