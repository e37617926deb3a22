//! Root window widget.

use tracing::debug;

use super::{Chrome, Tick, run_tick};
use crate::{
    Context, ViewContext,
    core::node::NodeKind,
    error::Result,
    event::Event,
    geom::Vec2,
    layout::Layout,
    render::Render,
    style::Color,
    widget::{EventOutcome, Widget},
};

/// Where a header drag started.
#[derive(Debug, Clone, Copy)]
struct Drag {
    /// Pointer position at the press.
    pointer: Vec2,
    /// Layout offset at the press.
    offset: Vec2,
}

/// A top-level window: a body with a header bar drawn above it. Dragging
/// the header with the primary button moves the window. Children are
/// placed freely.
pub struct Root {
    /// Panel chrome.
    chrome: Chrome,
    /// Drag in progress.
    drag: Option<Drag>,
    /// Per-frame callback.
    on_tick: Option<Tick<Self>>,
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

impl Root {
    /// Construct a root with a 30 unit untitled header.
    pub fn new() -> Self {
        Self {
            chrome: Chrome::new(30.0),
            drag: None,
            on_tick: None,
        }
    }

    /// Set the header title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.chrome.title = title.into();
        self
    }

    /// Set the header height. Zero removes the header and disables dragging.
    pub fn header_height(mut self, height: f32) -> Self {
        self.chrome.header_height = height;
        self
    }

    /// Set the header base color.
    pub fn header_color(mut self, color: Color) -> Self {
        self.chrome.header_color = color;
        self
    }

    /// Set the body fill.
    pub fn fill(mut self, color: Color) -> Self {
        self.chrome.fill = color;
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

    /// Is a header drag in progress?
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl Widget for Root {
    fn layout(&self) -> Layout {
        Layout::new().size(400.0, 300.0)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Container
    }

    fn render(&mut self, r: &mut Render<'_>, ctx: &dyn ViewContext) -> Result<()> {
        self.chrome.draw(r, ctx.rect(), ctx.metrics())
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        let Some(header) = self.chrome.header(ctx.rect()) else {
            return Ok(EventOutcome::Ignore);
        };
        match *event {
            Event::PointerDown { pos, button } if button.is_primary() && header.contains_point(pos) => {
                self.drag = Some(Drag {
                    pointer: pos,
                    offset: ctx.layout().offset,
                });
                debug!(node = ?ctx.name(), "drag started");
                Ok(EventOutcome::Consume)
            }
            Event::PointerMove { pos } => match self.drag {
                Some(drag) => {
                    // Offsets move one to one with the pointer in every mode
                    // except Percent.
                    let offset = drag.offset + (pos - drag.pointer);
                    ctx.with_layout(&mut |l| l.offset = offset)?;
                    ctx.mark_subtree_dirty();
                    Ok(EventOutcome::Consume)
                }
                None => Ok(EventOutcome::Ignore),
            },
            Event::PointerUp { button, .. } if button.is_primary() => {
                if self.drag.take().is_some() {
                    debug!(node = ?ctx.name(), "drag stopped");
                }
                Ok(EventOutcome::Ignore)
            }
            _ => Ok(EventOutcome::Ignore),
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut dyn Context) -> Result<()> {
        run_tick(self, ctx, dt, |r| &mut r.on_tick)
    }
}
