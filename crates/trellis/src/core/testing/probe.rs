use std::{cell::Cell, rc::Rc};

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
    widget::{EventOutcome, Widget},
};

/// Call counters shared between a [`Probe`] and the test observing it.
#[derive(Debug, Default)]
pub struct ProbeCounts {
    /// Layout resolutions.
    pub layouts: Cell<usize>,
    /// Events received.
    pub events: Cell<usize>,
    /// Updates received.
    pub updates: Cell<usize>,
    /// Renders.
    pub renders: Cell<usize>,
}

impl ProbeCounts {
    /// Bump a counter.
    fn bump(c: &Cell<usize>) {
        c.set(c.get() + 1);
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.layouts.set(0);
        self.events.set(0);
        self.updates.set(0);
        self.renders.set(0);
    }
}

/// A widget that counts the calls it receives. Useful for checking which
/// nodes a traversal visits.
pub struct Probe {
    /// Child capability.
    kind: NodeKind,
    /// Child placement.
    arrangement: Arrangement,
    /// Initial layout inputs.
    layout: Layout,
    /// Intrinsic size reported to layout.
    intrinsic: Option<Vec2>,
    /// Outcome returned from every event.
    outcome: EventOutcome,
    /// Shared counters.
    counts: Rc<ProbeCounts>,
}

impl Probe {
    /// A leaf probe with default layout.
    pub fn leaf() -> Self {
        Self {
            kind: NodeKind::Leaf,
            arrangement: Arrangement::Free,
            layout: Layout::default(),
            intrinsic: None,
            outcome: EventOutcome::Ignore,
            counts: Rc::default(),
        }
    }

    /// A container probe with free placement.
    pub fn container() -> Self {
        Self {
            kind: NodeKind::Container,
            ..Self::leaf()
        }
    }

    /// A container probe that stacks its children.
    pub fn stack() -> Self {
        Self {
            arrangement: Arrangement::Stack,
            ..Self::container()
        }
    }

    /// Use `layout` as the initial layout inputs.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Report an intrinsic size, making FitContent usable on a leaf.
    pub fn intrinsic(mut self, size: Vec2) -> Self {
        self.intrinsic = Some(size);
        self
    }

    /// Return `outcome` from every event.
    pub fn outcome(mut self, outcome: EventOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// The shared counters.
    pub fn counts(&self) -> Rc<ProbeCounts> {
        self.counts.clone()
    }
}

impl Widget for Probe {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    fn measure(&self, _metrics: &dyn TextMetrics) -> Option<Vec2> {
        self.intrinsic
    }

    fn on_layout(&mut self, _ctx: &dyn ViewContext) {
        ProbeCounts::bump(&self.counts.layouts);
    }

    fn render(&mut self, _r: &mut Render<'_>, _ctx: &dyn ViewContext) -> Result<()> {
        ProbeCounts::bump(&self.counts.renders);
        Ok(())
    }

    fn on_event(&mut self, _event: &Event, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        ProbeCounts::bump(&self.counts.events);
        Ok(self.outcome)
    }

    fn update(&mut self, _dt: f32, _ctx: &mut dyn Context) -> Result<()> {
        ProbeCounts::bump(&self.counts.updates);
        Ok(())
    }

    fn name(&self) -> NodeName {
        NodeName::convert("probe")
    }
}
