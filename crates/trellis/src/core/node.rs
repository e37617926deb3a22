use crate::{
    core::id::NodeId,
    geom::{Rect, Vec2},
    layout::{Arrangement, Layout},
    state::NodeName,
    widget::Widget,
};

/// Child capability of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal node. Never owns children.
    Leaf,
    /// Owns an ordered child sequence.
    Container,
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while the widget is borrowed out for
    /// a callback.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Child capability, fixed at creation.
    pub(crate) kind: NodeKind,
    /// Child placement, fixed at creation.
    pub(crate) arrangement: Arrangement,

    /// Parent in the arena tree. Lookup only.
    pub(crate) parent: Option<NodeId>,
    /// Children in insertion order.
    pub(crate) children: Vec<NodeId>,
    /// Node name for lookup.
    pub(crate) name: NodeName,

    /// Layout inputs.
    pub(crate) layout: Layout,
    /// Resolved position in screen space.
    pub(crate) position: Vec2,
    /// Resolved size.
    pub(crate) size: Vec2,
    /// Vertical slot assigned by a stacking parent.
    pub(crate) stack_slot: Option<f32>,

    /// Draw this node and its subtree.
    pub(crate) visible: bool,
    /// Deliver events and updates to this node and its subtree.
    pub(crate) enabled: bool,
    /// Layout is stale.
    pub(crate) dirty: bool,
}

impl Node {
    /// Construct a detached, dirty node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>, name: NodeName) -> Self {
        let layout = widget.layout();
        Self {
            kind: widget.kind(),
            arrangement: widget.arrangement(),
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            name,
            position: Vec2::ZERO,
            size: layout.size,
            layout,
            stack_slot: None,
            visible: true,
            enabled: true,
            dirty: true,
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Return the node's child arrangement.
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout inputs.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Return the resolved position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Return the resolved size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Return the resolved rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Return true if the node is drawn.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Return true if the node receives events and updates.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Return true if layout is stale.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Can this node own children?
    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }
}
