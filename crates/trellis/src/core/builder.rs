use super::{id::NodeId, world::Core};
use crate::{
    error::{Error, Result},
    geom::Vec2,
    layout::{Anchor, Layout, LayoutMode, SizeMode},
};

/// Fluent builder for node layout and hierarchy.
///
/// Setters never fail on the spot. The first error is kept and returned by
/// [`NodeBuilder::done`].
#[must_use = "call done() to observe configuration errors"]
pub struct NodeBuilder<'a> {
    /// Core the changes are applied to.
    core: &'a mut Core,
    /// Node being configured.
    id: NodeId,
    /// First error encountered.
    error: Option<Error>,
}

impl<'a> NodeBuilder<'a> {
    /// Start configuring a node.
    pub(crate) fn new(core: &'a mut Core, id: NodeId) -> Self {
        let error = (!core.contains(id)).then_some(Error::NodeNotFound(id));
        Self { core, id, error }
    }

    /// Record the outcome of a step, keeping the first failure.
    fn step(mut self, f: impl FnOnce(&mut Core, NodeId) -> Result<()>) -> Self {
        if self.error.is_none()
            && let Err(e) = f(self.core, self.id)
        {
            self.error = Some(e);
        }
        self
    }

    /// Modify the layout inputs for this node.
    pub fn layout(self, f: impl FnOnce(&mut Layout)) -> Self {
        self.step(|core, id| core.with_layout_of(id, f))
    }

    /// Set the offset.
    pub fn offset(self, x: f32, y: f32) -> Self {
        self.layout(|l| l.offset = Vec2::new(x, y))
    }

    /// Set the size input.
    pub fn size(self, w: f32, h: f32) -> Self {
        self.layout(|l| l.size = Vec2::new(w, h))
    }

    /// Set the padding.
    pub fn padding(self, x: f32, y: f32) -> Self {
        self.layout(|l| l.padding = Vec2::new(x, y))
    }

    /// Set the stacking gap.
    pub fn spacing(self, spacing: f32) -> Self {
        self.layout(|l| l.spacing = spacing)
    }

    /// Set the anchor.
    pub fn anchor(self, anchor: Anchor) -> Self {
        self.layout(|l| l.anchor = anchor)
    }

    /// Set the position policy.
    pub fn layout_mode(self, mode: LayoutMode) -> Self {
        self.layout(|l| l.layout_mode = mode)
    }

    /// Set the size policy.
    pub fn size_mode(self, mode: SizeMode) -> Self {
        self.layout(|l| l.size_mode = mode)
    }

    /// Rename the node.
    pub fn name(self, name: &str) -> Self {
        self.step(|core, id| core.set_name(id, name))
    }

    /// Show or hide the node.
    pub fn visible(self, visible: bool) -> Self {
        self.step(|core, id| core.set_visible(id, visible))
    }

    /// Enable or disable the node.
    pub fn enabled(self, enabled: bool) -> Self {
        self.step(|core, id| core.set_enabled(id, enabled))
    }

    /// Add a child and return the parent builder.
    pub fn child(self, child: impl Into<NodeId>) -> Self {
        let child = child.into();
        self.step(|core, id| core.add_child(id, child))
    }

    /// Finish, returning the node id or the first error.
    pub fn done(self) -> Result<NodeId> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.id),
        }
    }
}
