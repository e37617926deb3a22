//! Widget trait and event outcome types.

use std::any::{Any, type_name};

use crate::{
    Context, ViewContext,
    core::node::NodeKind,
    error::Result,
    event::Event,
    geom::Vec2,
    layout::{Arrangement, Layout},
    render::Render,
    state::NodeName,
    text::TextMetrics,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was not relevant to this widget.
    Ignore,
    /// The event was processed. Children still receive it.
    Handle,
    /// The event was processed and is not forwarded to this node's children.
    /// Siblings are unaffected.
    Consume,
}

impl EventOutcome {
    /// The stronger of two outcomes: `Consume` over `Handle` over `Ignore`.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Consume, _) | (_, Self::Consume) => Self::Consume,
            (Self::Handle, _) | (_, Self::Handle) => Self::Handle,
            _ => Self::Ignore,
        }
    }
}

/// Widgets are the behavior attached to nodes in the Core arena.
///
/// Callbacks receive a context that can mutate the tree, including the
/// widget's own node. While a callback runs the widget is held outside the
/// arena.
pub trait Widget: Any {
    /// Initial layout inputs for this widget.
    fn layout(&self) -> Layout {
        Layout::default()
    }

    /// Child capability. Fixed for the lifetime of the node.
    fn kind(&self) -> NodeKind {
        NodeKind::Leaf
    }

    /// Child placement for containers.
    fn arrangement(&self) -> Arrangement {
        Arrangement::Free
    }

    /// Intrinsic content size, excluding padding. Leaves returning `None`
    /// cannot be sized with `SizeMode::FitContent`.
    fn measure(&self, _metrics: &dyn TextMetrics) -> Option<Vec2> {
        None
    }

    /// Called after this node's position and size have resolved.
    fn on_layout(&mut self, _ctx: &dyn ViewContext) {}

    /// Draw this widget. Does not draw children.
    fn render(&mut self, _r: &mut Render<'_>, _ctx: &dyn ViewContext) -> Result<()> {
        Ok(())
    }

    /// Handle an input event.
    fn on_event(&mut self, _event: &Event, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Advance per-frame state. Runs after the node's children have updated.
    fn update(&mut self, _dt: f32, _ctx: &mut dyn Context) -> Result<()> {
        Ok(())
    }

    /// Kind name, used to generate default node names.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
