use std::marker::PhantomData;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a node in the arena. Handles of removed nodes go stale and
    /// resolve to nothing.
    pub struct NodeId;
}

/// A [`NodeId`] that remembers which widget type lives at the node, so typed
/// access does not need a turbofish at every call site.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TypedId<W> {
    /// Untyped handle.
    id: NodeId,
    /// Widget type marker.
    widget: PhantomData<fn() -> W>,
}

impl<W> TypedId<W> {
    /// Tag an untyped handle with a widget type. The tag is not checked until
    /// the widget is accessed.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            widget: PhantomData,
        }
    }

    /// The untyped handle.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<W> Clone for TypedId<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for TypedId<W> {}

impl<W> From<TypedId<W>> for NodeId {
    fn from(value: TypedId<W>) -> Self {
        value.id
    }
}

impl<W> PartialEq<NodeId> for TypedId<W> {
    fn eq(&self, other: &NodeId) -> bool {
        self.id == *other
    }
}
