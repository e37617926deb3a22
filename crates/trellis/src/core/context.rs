use std::any::{Any, type_name};

use super::{
    id::{NodeId, TypedId},
    node::Node,
    world::Core,
};
use crate::{
    error::{Error, Result},
    geom::{Rect, Vec2},
    layout::Layout,
    state::NodeName,
    text::TextMetrics,
    widget::Widget,
};

/// Read-only context available to widgets during layout and render.
pub trait ViewContext {
    /// The node the widget is attached to.
    fn node_id(&self) -> NodeId;

    /// Look up any node.
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Find a node by name across all roots, pre-order.
    fn find(&self, name: &str) -> Option<NodeId>;

    /// Text metrics used for measurement.
    fn metrics(&self) -> &dyn TextMetrics;

    /// Resolved position of the current node.
    fn position(&self) -> Vec2 {
        self.node(self.node_id())
            .map(Node::position)
            .unwrap_or_default()
    }

    /// Resolved size of the current node.
    fn size(&self) -> Vec2 {
        self.node(self.node_id()).map(Node::size).unwrap_or_default()
    }

    /// Resolved rectangle of the current node.
    fn rect(&self) -> Rect {
        self.node(self.node_id()).map(Node::rect).unwrap_or_default()
    }

    /// Layout inputs of the current node.
    fn layout(&self) -> Layout {
        self.node(self.node_id()).map(Node::layout).unwrap_or_default()
    }

    /// Name of the current node.
    fn name(&self) -> Option<NodeName> {
        self.node(self.node_id()).map(|n| n.name().clone())
    }

    /// Children of the current node in insertion order.
    fn children(&self) -> Vec<NodeId> {
        self.node(self.node_id())
            .map(|n| n.children().to_vec())
            .unwrap_or_default()
    }

    /// Parent of the current node.
    fn parent(&self) -> Option<NodeId> {
        self.node(self.node_id()).and_then(Node::parent)
    }
}

/// Mutable context available to widgets during event handling and update.
pub trait Context: ViewContext {
    /// Apply `f` to a node's layout inputs, invalidating layout if anything
    /// changed.
    fn with_layout_of(&mut self, node: NodeId, f: &mut dyn FnMut(&mut Layout)) -> Result<()>;

    /// Mark the current node and its ancestors dirty.
    fn mark_dirty(&mut self);

    /// Mark the current node and its descendants dirty.
    fn mark_subtree_dirty(&mut self);

    /// Add a detached node for a widget.
    fn add_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId;

    /// Attach `child` to `parent`.
    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Detach a node from its parent, keeping it alive.
    fn detach(&mut self, node: NodeId) -> Result<()>;

    /// Remove a node and its subtree from the arena.
    fn remove_subtree(&mut self, node: NodeId) -> Result<()>;

    /// Show or hide a node and its subtree.
    fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<()>;

    /// Enable or disable event delivery and updates for a node and its
    /// subtree.
    fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<()>;

    /// Borrow another node's widget along with a context for that node.
    fn with_widget_mut(
        &mut self,
        node: NodeId,
        f: &mut dyn FnMut(&mut dyn Widget, &mut dyn Context) -> Result<()>,
    ) -> Result<()>;

    /// Apply `f` to the current node's layout inputs.
    fn with_layout(&mut self, f: &mut dyn FnMut(&mut Layout)) -> Result<()> {
        self.with_layout_of(self.node_id(), f)
    }
}

impl dyn Context + '_ {
    /// Add a detached node for a widget.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> TypedId<W> {
        TypedId::new(self.add_boxed(Box::new(widget)))
    }

    /// Execute a closure with mutable access to a widget of type `W`.
    pub fn with_widget<W, R>(
        &mut self,
        node: impl Into<NodeId>,
        mut f: impl FnMut(&mut W, &mut dyn Context) -> R,
    ) -> Result<R>
    where
        W: Widget + 'static,
    {
        let node = node.into();
        let mut output = None;
        self.with_widget_mut(node, &mut |widget, ctx| {
            let any = widget as &mut dyn Any;
            let widget = any.downcast_mut::<W>().ok_or_else(|| {
                Error::Invalid(format!("expected widget type {}", type_name::<W>()))
            })?;
            output = Some(f(widget, ctx));
            Ok(())
        })?;
        output.ok_or(Error::ReentrantWidgetBorrow(node))
    }
}

/// Read-only context over a borrowed [`Core`].
pub struct CoreViewContext<'a> {
    /// Core being read.
    core: &'a Core,
    /// Current node.
    node_id: NodeId,
}

impl<'a> CoreViewContext<'a> {
    /// Create a new context for a node.
    pub fn new(core: &'a Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

impl ViewContext for CoreViewContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.core.node(id)
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.core.find(name)
    }

    fn metrics(&self) -> &dyn TextMetrics {
        &self.core.metrics
    }
}

/// Mutable context over a borrowed [`Core`].
pub struct CoreContext<'a> {
    /// Core being mutated.
    core: &'a mut Core,
    /// Current node.
    node_id: NodeId,
}

impl<'a> CoreContext<'a> {
    /// Create a new context for a node.
    pub fn new(core: &'a mut Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

impl ViewContext for CoreContext<'_> {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.core.node(id)
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.core.find(name)
    }

    fn metrics(&self) -> &dyn TextMetrics {
        &self.core.metrics
    }
}

impl Context for CoreContext<'_> {
    fn with_layout_of(&mut self, node: NodeId, f: &mut dyn FnMut(&mut Layout)) -> Result<()> {
        self.core.with_layout_of(node, f)
    }

    fn mark_dirty(&mut self) {
        self.core.mark_dirty(self.node_id);
    }

    fn mark_subtree_dirty(&mut self) {
        self.core.mark_subtree_dirty(self.node_id);
    }

    fn add_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        self.core.add_boxed(widget)
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.core.add_child(parent, child)
    }

    fn detach(&mut self, node: NodeId) -> Result<()> {
        self.core.detach(node)
    }

    fn remove_subtree(&mut self, node: NodeId) -> Result<()> {
        self.core.remove_subtree(node)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<()> {
        self.core.set_visible(node, visible)
    }

    fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<()> {
        self.core.set_enabled(node, enabled)
    }

    fn with_widget_mut(
        &mut self,
        node: NodeId,
        f: &mut dyn FnMut(&mut dyn Widget, &mut dyn Context) -> Result<()>,
    ) -> Result<()> {
        self.core.with_widget_mut(node, |widget, core| {
            let mut ctx = CoreContext::new(core, node);
            f(widget, &mut ctx)
        })?
    }
}
