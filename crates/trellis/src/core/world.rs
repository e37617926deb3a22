use std::{
    any::{Any, type_name},
    mem,
};

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::{
    Context,
    core::{
        builder::NodeBuilder,
        context::{CoreContext, CoreViewContext},
        id::{NodeId, TypedId},
        node::{Node, NodeKind},
    },
    error::{Error, Result},
    event::Event,
    geom::{Rect, Vec2},
    layout::{
        Arrangement, Layout, ParentFrame, StackCursor, fit_content, resolve_position, resolve_size,
    },
    render::Render,
    state::NodeName,
    text::Monospace,
    widget::{EventOutcome, Widget},
};

/// Core state: the node arena, the ordered root list, and layout.
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root nodes in registration order.
    pub(crate) roots: Vec<NodeId>,
    /// Counter for generated node names.
    name_counter: u64,
    /// Text metrics used for intrinsic measurement.
    pub(crate) metrics: Monospace,
    /// Configuration errors collected during layout.
    layout_errors: Vec<Error>,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// Create an empty Core.
    pub fn new() -> Self {
        Self::with_metrics(Monospace::default())
    }

    /// Create an empty Core measuring text with `metrics`.
    pub fn with_metrics(metrics: Monospace) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            name_counter: 0,
            metrics,
            layout_errors: Vec::new(),
        }
    }

    /// Return a reference to a node by id.
    pub fn node(&self, node_id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(node_id.into())
    }

    /// Does the id name a live node?
    pub fn contains(&self, node_id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(node_id.into())
    }

    /// Root nodes in registration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Generate the next default name for a widget kind.
    pub fn next_name(&mut self, kind: &NodeName) -> NodeName {
        let name = kind.numbered(self.name_counter);
        self.name_counter += 1;
        name
    }

    /// Add a detached node for a widget, with a generated name.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> TypedId<W> {
        TypedId::new(self.add_boxed(Box::new(widget)))
    }

    /// Add a detached node for a widget with an explicit name.
    pub fn add_named<W: Widget + 'static>(&mut self, name: &str, widget: W) -> Result<TypedId<W>> {
        let name = NodeName::try_from(name)?;
        let id = self.nodes.insert(Node::new(Box::new(widget), name));
        Ok(TypedId::new(id))
    }

    /// Add a boxed widget to the arena and return its node ID.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let name = self.next_name(&widget.name());
        self.nodes.insert(Node::new(widget, name))
    }

    /// Rename a node.
    pub fn set_name(&mut self, node_id: impl Into<NodeId>, name: &str) -> Result<()> {
        let node_id = node_id.into();
        let name = NodeName::try_from(name)?;
        self.nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))?
            .name = name;
        Ok(())
    }

    /// Start a fluent builder for a node's layout and hierarchy.
    pub fn build(&mut self, node_id: impl Into<NodeId>) -> NodeBuilder<'_> {
        NodeBuilder::new(self, node_id.into())
    }

    /// Register a node as a root, detaching it from any parent first.
    pub fn add_root(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        let node_id = node_id.into();
        self.detach(node_id)?;
        self.roots.push(node_id);
        self.mark_subtree_dirty(node_id);
        debug!(node = %self.nodes[node_id].name, "root added");
        Ok(())
    }

    /// Is `ancestor` on the parent chain of `node` (or `node` itself)?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent or the root list.
    ///
    /// Attaching to a leaf is a no-op. Attaching a node beneath itself is an
    /// error.
    pub fn add_child(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        let kind = self
            .nodes
            .get(parent)
            .ok_or(Error::NodeNotFound(parent))?
            .kind;
        if !self.nodes.contains_key(child) {
            return Err(Error::NodeNotFound(child));
        }
        if self.is_ancestor(child, parent) {
            return Err(Error::Invalid(format!(
                "attaching {} under {} would create a cycle",
                self.nodes[child].name, self.nodes[parent].name
            )));
        }
        if kind == NodeKind::Leaf {
            debug!(
                parent = %self.nodes[parent].name,
                child = %self.nodes[child].name,
                "ignoring add_child on a leaf"
            );
            return Ok(());
        }

        self.detach(child)?;
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.mark_subtree_dirty(child);
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove a node from its parent's children (or from the root list) and
    /// clear its parent link. The node stays alive as a standalone node.
    pub fn detach(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        let node_id = node_id.into();
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))?;
        let parent = node.parent.take();
        node.stack_slot = None;

        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|c| *c != node_id);
                }
                self.mark_dirty(parent);
            }
            None => self.roots.retain(|r| *r != node_id),
        }
        self.mark_subtree_dirty(node_id);
        Ok(())
    }

    /// Remove a node and all of its descendants from the arena.
    pub fn remove_subtree(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        let node_id = node_id.into();
        self.detach(node_id)?;

        let mut stack = vec![node_id];
        let mut removed = 0usize;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        trace!(removed, "subtree removed");
        Ok(())
    }

    /// Mark a node and every ancestor dirty. Descendants are untouched.
    pub fn mark_dirty(&mut self, node_id: impl Into<NodeId>) {
        let mut cursor = Some(node_id.into());
        while let Some(id) = cursor {
            cursor = self.nodes.get_mut(id).and_then(|n| {
                n.dirty = true;
                n.parent
            });
        }
    }

    /// Mark a node and every descendant dirty. Ancestors are untouched.
    pub fn mark_subtree_dirty(&mut self, node_id: impl Into<NodeId>) {
        let mut stack = vec![node_id.into()];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(id) {
                node.dirty = true;
                stack.extend_from_slice(&node.children);
            }
        }
    }

    /// Update the layout inputs for a node.
    ///
    /// If anything changed the node and its ancestors are marked dirty, and
    /// for containers the whole subtree as well.
    pub fn with_layout_of(
        &mut self,
        node_id: impl Into<NodeId>,
        f: impl FnOnce(&mut Layout),
    ) -> Result<()> {
        let node_id = node_id.into();
        let node = self
            .nodes
            .get(node_id)
            .ok_or(Error::NodeNotFound(node_id))?;
        let mut layout = node.layout;
        f(&mut layout);
        if !layout.is_finite() {
            return Err(Error::Geometry(format!(
                "non-finite layout input for {}",
                node.name
            )));
        }
        if layout == node.layout {
            return Ok(());
        }
        let container = node.is_container();
        self.nodes[node_id].layout = layout;
        self.mark_dirty(node_id);
        if container {
            self.mark_subtree_dirty(node_id);
        }
        Ok(())
    }

    /// Replace the layout inputs for a node.
    pub fn set_layout_of(&mut self, node_id: impl Into<NodeId>, layout: Layout) -> Result<()> {
        self.with_layout_of(node_id, |l| *l = layout)
    }

    /// Show or hide a node and its subtree. Layout is unaffected.
    pub fn set_visible(&mut self, node_id: impl Into<NodeId>, visible: bool) -> Result<()> {
        let node_id = node_id.into();
        self.nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))?
            .visible = visible;
        Ok(())
    }

    /// Enable or disable events and updates for a node and its subtree.
    /// Layout is unaffected.
    pub fn set_enabled(&mut self, node_id: impl Into<NodeId>, enabled: bool) -> Result<()> {
        let node_id = node_id.into();
        self.nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))?
            .enabled = enabled;
        Ok(())
    }

    /// Find a node by name: roots in order, each searched pre-order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.roots.iter().find_map(|root| self.find_in(*root, name))
    }

    /// Find a node by name within the subtree at `root`, pre-order.
    pub fn find_in(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Take ownership of a node's widget for the duration of `f`. The
    /// widget is restored afterwards unless `f` removed the node.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        node_id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut widget = self
            .nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))?
            .widget
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(node_id))?;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Execute a closure with mutable access to a widget of type `W` and a
    /// context for its node.
    pub fn with_widget<W, R>(
        &mut self,
        node_id: impl Into<NodeId>,
        f: impl FnOnce(&mut W, &mut dyn Context) -> R,
    ) -> Result<R>
    where
        W: Widget + 'static,
    {
        let node_id = node_id.into();
        self.with_widget_mut(node_id, |widget, core| {
            let any = widget as &mut dyn Any;
            let widget = any.downcast_mut::<W>().ok_or_else(|| {
                Error::Invalid(format!("expected widget type {}", type_name::<W>()))
            })?;
            let mut ctx = CoreContext::new(core, node_id);
            Ok(f(widget, &mut ctx))
        })?
    }

    /// Borrow a widget of type `W` for inspection.
    pub fn widget<W: Widget + 'static>(&self, node_id: impl Into<NodeId>) -> Option<&W> {
        let widget = self.nodes.get(node_id.into())?.widget.as_deref()?;
        (widget as &dyn Any).downcast_ref::<W>()
    }

    /// Drain the configuration errors reported by layout since the last
    /// call.
    pub fn take_layout_errors(&mut self) -> Vec<Error> {
        mem::take(&mut self.layout_errors)
    }

    /// Resolve layout for the subtree at `node_id`. A clean node is left
    /// untouched. Configuration errors are logged and collected rather than
    /// returned, see [`Core::take_layout_errors`].
    pub fn compute_layout(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        let node_id = node_id.into();
        if !self.nodes.contains_key(node_id) {
            return Err(Error::NodeNotFound(node_id));
        }
        self.layout_node(node_id);
        Ok(())
    }

    /// The frame a node's children resolve against.
    fn parent_frame(&self, node_id: NodeId) -> Option<ParentFrame> {
        let parent = self.nodes.get(node_id)?.parent?;
        let p = self.nodes.get(parent)?;
        Some(ParentFrame {
            position: p.position,
            size: p.size,
            padding: p.layout.padding,
        })
    }

    /// Lay out a single node and, recursively, its children.
    fn layout_node(&mut self, node_id: NodeId) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        if !node.dirty {
            return;
        }
        node.dirty = false;

        let layout = node.layout;
        let kind = node.kind;
        let slot = node.stack_slot;
        // Geometry the children last resolved against.
        let mut seen = (node.position, node.size);
        let parent = self.parent_frame(node_id);

        let mut position = resolve_position(&layout, parent.as_ref());
        if let Some(y) = slot {
            position.y = y;
        }
        self.nodes[node_id].position = position;

        let size = match resolve_size(&layout, parent.as_ref()) {
            Some(size) => Some(size),
            None if kind == NodeKind::Container => {
                self.invalidate_followers(node_id, seen, (position, seen.1));
                seen.0 = position;
                self.layout_children(node_id);
                Some(fit_content(position, layout.padding, self.child_rects(node_id)))
            }
            None => self.measure_leaf(node_id, layout.padding),
        };
        if let Some(size) = size {
            self.nodes[node_id].size = size;
        }
        let size = self.nodes[node_id].size;

        self.invalidate_followers(node_id, seen, (position, size));
        self.layout_children(node_id);

        trace!(
            node = %self.nodes[node_id].name,
            x = position.x,
            y = position.y,
            w = size.x,
            h = size.y,
            "layout resolved"
        );

        if let Err(e) = self.with_widget_mut(node_id, |widget, core| {
            widget.on_layout(&CoreViewContext::new(core, node_id));
        }) {
            warn!(error = %e, "on_layout skipped");
        }
    }

    /// Invalidate the children whose placement reads geometry that moved
    /// from `before` to `after`.
    fn invalidate_followers(&mut self, node_id: NodeId, before: (Vec2, Vec2), after: (Vec2, Vec2)) {
        let moved = before.0 != after.0;
        let resized = before.1 != after.1;
        if !moved && !resized {
            return;
        }
        let children = self.nodes[node_id].children.clone();
        for child in children {
            let follows = self.nodes.get(child).is_some_and(|c| {
                (moved && c.layout.follows_parent_position()) || (resized && c.layout.follows_parent_size())
            });
            if follows {
                self.mark_subtree_dirty(child);
            }
        }
    }

    /// Lay out every child of a node in order. Stacking containers assign
    /// each child its slot first.
    fn layout_children(&mut self, node_id: NodeId) {
        let Some(node) = self.nodes.get(node_id) else {
            return;
        };
        let children = node.children.clone();
        let mut stack = (node.arrangement == Arrangement::Stack)
            .then(|| StackCursor::new(node.position, node.layout.padding, node.layout.spacing));

        for child in children {
            let Some(c) = self.nodes.get_mut(child) else {
                continue;
            };
            if let Some(cursor) = &stack {
                let y = cursor.slot();
                if c.stack_slot != Some(y) {
                    c.stack_slot = Some(y);
                    self.mark_subtree_dirty(child);
                }
            }
            self.layout_node(child);
            if let (Some(cursor), Some(c)) = (stack.as_mut(), self.nodes.get(child)) {
                cursor.advance(c.size.y);
            }
        }
    }

    /// Resolved rectangles of a node's children.
    fn child_rects(&self, node_id: NodeId) -> Vec<Rect> {
        self.nodes[node_id]
            .children
            .iter()
            .filter_map(|c| self.nodes.get(*c))
            .map(Node::rect)
            .collect()
    }

    /// Intrinsic size of a leaf plus padding. Leaves without an intrinsic
    /// size report a configuration error and keep their previous size.
    fn measure_leaf(&mut self, node_id: NodeId, padding: Vec2) -> Option<Vec2> {
        let node = &self.nodes[node_id];
        let measured = node
            .widget
            .as_deref()
            .and_then(|w| w.measure(&self.metrics));
        match measured {
            Some(size) => Some(size + padding * 2.0),
            None => {
                let err = Error::UnsupportedSizeMode {
                    node: node.name.clone(),
                    mode: node.layout.size_mode,
                };
                warn!(error = %err, "size left unchanged");
                self.layout_errors.push(err);
                None
            }
        }
    }

    /// Deliver an event to a node, then fan it out to each of its children
    /// in order. Disabled nodes and their subtrees see nothing. A widget
    /// returning [`EventOutcome::Consume`] keeps the event from its children.
    ///
    /// Returns the strongest outcome reported anywhere in the subtree. A
    /// failing handler does not stop delivery to the rest of the subtree;
    /// the first error is returned once the fan-out is complete.
    pub fn dispatch(&mut self, node_id: impl Into<NodeId>, event: &Event) -> Result<EventOutcome> {
        let node_id = node_id.into();
        match self.nodes.get(node_id) {
            Some(node) if node.enabled => {}
            _ => return Ok(EventOutcome::Ignore),
        }

        let mut first_err = None;
        let r = self
            .with_widget_mut(node_id, |widget, core| {
                let mut ctx = CoreContext::new(core, node_id);
                widget.on_event(event, &mut ctx)
            })
            .and_then(|r| r)
            .inspect_err(|e| warn!(node = ?node_id, error = %e, "event handler failed"));
        let mut outcome = keep_first(&mut first_err, r).unwrap_or(EventOutcome::Ignore);

        if outcome != EventOutcome::Consume {
            for child in self.children_snapshot(node_id) {
                if self.is_child_of(child, node_id) {
                    let r = self.dispatch(child, event);
                    if let Some(o) = keep_first(&mut first_err, r) {
                        outcome = outcome.merge(o);
                    }
                }
            }
        }
        first_err.map_or(Ok(outcome), Err)
    }

    /// Advance a node's subtree by `dt` seconds: children first, then the
    /// node itself. Disabled nodes and their subtrees are skipped. A failing
    /// tick does not stop the rest of the subtree; the first error is
    /// returned at the end.
    pub fn update(&mut self, node_id: impl Into<NodeId>, dt: f32) -> Result<()> {
        let node_id = node_id.into();
        match self.nodes.get(node_id) {
            Some(node) if node.enabled => {}
            _ => return Ok(()),
        }

        let mut first_err = None;
        for child in self.children_snapshot(node_id) {
            if self.is_child_of(child, node_id) {
                let r = self.update(child, dt);
                keep_first(&mut first_err, r);
            }
        }

        if self.nodes.contains_key(node_id) {
            let r = self
                .with_widget_mut(node_id, |widget, core| {
                    let mut ctx = CoreContext::new(core, node_id);
                    widget.update(dt, &mut ctx)
                })
                .and_then(|r| r)
                .inspect_err(|e| warn!(node = ?node_id, error = %e, "tick failed"));
            keep_first(&mut first_err, r);
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Draw a node, then its children in order. A hidden node skips only its
    /// own drawing; its children are still rendered.
    pub fn render(&mut self, node_id: impl Into<NodeId>, r: &mut Render<'_>) -> Result<()> {
        let node_id = node_id.into();
        let Some(visible) = self.nodes.get(node_id).map(|n| n.visible) else {
            return Ok(());
        };

        if visible {
            self.with_widget_mut(node_id, |widget, core| {
                widget.render(r, &CoreViewContext::new(core, node_id))
            })??;
        }

        for child in self.children_snapshot(node_id) {
            if self.is_child_of(child, node_id) {
                self.render(child, r)?;
            }
        }
        Ok(())
    }

    /// Copy of a node's child sequence, taken before traversal.
    fn children_snapshot(&self, node_id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node_id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Is `child` still a live child of `parent`?
    fn is_child_of(&self, child: NodeId, parent: NodeId) -> bool {
        self.nodes
            .get(child)
            .is_some_and(|c| c.parent == Some(parent))
    }
}


/// Keep the first error seen during a fan-out. Later errors are dropped.
pub(crate) fn keep_first<T>(first: &mut Option<Error>, r: Result<T>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(e) => {
            first.get_or_insert(e);
            None
        }
    }
}
