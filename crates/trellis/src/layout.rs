//! Layout inputs and the pure resolution rules applied to them.
//!
//! A node's [`Layout`] holds what the user asked for. The arena keeps what
//! layout resolved (position and size) separately on the node, so resolution
//! is always a function of the inputs and the parent's resolved frame.

use crate::geom::{Rect, Vec2};

/// Anchor point of a node. Anchor placement resolves like `Static` for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
    /// Center point.
    Center,
}

/// How a node's position is derived from its offset and parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Position is the offset.
    Static,
    /// Offset from the parent's padded origin.
    #[default]
    Relative,
    /// Offset is a percentage (0-100) of the parent's padded area.
    Percent,
    /// Anchor-relative placement.
    Anchor,
}

/// How a node's size is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Size is the configured size.
    #[default]
    Absolute,
    /// Size wraps the content plus padding.
    FitContent,
    /// Size fills the parent's padded area, less the node's offset.
    FillParent,
    /// Size is a percentage (0-100) of the parent's padded area.
    Percent,
}

/// How a container places its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Children position themselves.
    #[default]
    Free,
    /// Children are stacked top to bottom, separated by the container's
    /// spacing.
    Stack,
}

/// Layout inputs for a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Position input. A percentage per axis under [`LayoutMode::Percent`].
    pub offset: Vec2,
    /// Size input. A percentage per axis under [`SizeMode::Percent`].
    pub size: Vec2,
    /// Inset reserved around children, applied on both sides of each axis.
    pub padding: Vec2,
    /// Gap between stacked children. May be negative.
    pub spacing: f32,
    /// Anchor point.
    pub anchor: Anchor,
    /// Position policy.
    pub layout_mode: LayoutMode,
    /// Size policy.
    pub size_mode: SizeMode,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::new(150.0, 50.0),
            padding: Vec2::ZERO,
            spacing: 0.0,
            anchor: Anchor::TopLeft,
            layout_mode: LayoutMode::Relative,
            size_mode: SizeMode::Absolute,
        }
    }
}

impl Layout {
    /// Default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset.
    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Set the size input.
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Vec2::new(w, h);
        self
    }

    /// Set the padding.
    pub fn padding(mut self, x: f32, y: f32) -> Self {
        self.padding = Vec2::new(x, y);
        self
    }

    /// Set the stacking gap.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the position policy.
    pub fn layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = mode;
        self
    }

    /// Set the size policy.
    pub fn size_mode(mut self, mode: SizeMode) -> Self {
        self.size_mode = mode;
        self
    }

    /// Does the resolved position read the parent's position or padding?
    pub fn follows_parent_position(&self) -> bool {
        matches!(self.layout_mode, LayoutMode::Relative | LayoutMode::Percent)
    }

    /// Does the resolved frame read the parent's size?
    pub fn follows_parent_size(&self) -> bool {
        self.layout_mode == LayoutMode::Percent
            || matches!(self.size_mode, SizeMode::FillParent | SizeMode::Percent)
    }

    /// True if every vector and scalar input is finite.
    pub fn is_finite(&self) -> bool {
        self.offset.is_finite()
            && self.size.is_finite()
            && self.padding.is_finite()
            && self.spacing.is_finite()
    }
}

/// The resolved frame of a parent, as seen by its children during layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentFrame {
    /// Resolved position.
    pub position: Vec2,
    /// Resolved size.
    pub size: Vec2,
    /// Padding input.
    pub padding: Vec2,
}

impl ParentFrame {
    /// The padded origin children are placed relative to.
    pub fn origin(&self) -> Vec2 {
        self.position + self.padding
    }

    /// The area inside the padding. Not clamped, so it may be negative.
    pub fn area(&self) -> Vec2 {
        self.size - self.padding * 2.0
    }
}

/// Resolve a node's position. Without a parent every mode resolves to the
/// offset.
pub fn resolve_position(layout: &Layout, parent: Option<&ParentFrame>) -> Vec2 {
    match (layout.layout_mode, parent) {
        (LayoutMode::Relative, Some(p)) => p.origin() + layout.offset,
        (LayoutMode::Percent, Some(p)) => p.origin() + p.area().hadamard(layout.offset / 100.0),
        _ => layout.offset,
    }
}

/// Resolve a node's size for every mode except [`SizeMode::FitContent`],
/// which depends on content and is resolved by the arena. Returns `None` for
/// `FitContent`.
///
/// Without a parent, `FillParent` and `Percent` resolve like `Absolute`.
pub fn resolve_size(layout: &Layout, parent: Option<&ParentFrame>) -> Option<Vec2> {
    match (layout.size_mode, parent) {
        (SizeMode::FitContent, _) => None,
        (SizeMode::FillParent, Some(p)) => Some(p.area() - layout.offset),
        (SizeMode::Percent, Some(p)) => Some(p.area().hadamard(layout.size / 100.0)),
        _ => Some(layout.size),
    }
}

/// Size of a container wrapping `children`: the furthest child extent
/// measured from `position`, plus padding on both sides. Extents start at
/// zero, so no children resolves to exactly `padding * 2`.
pub fn fit_content(position: Vec2, padding: Vec2, children: impl IntoIterator<Item = Rect>) -> Vec2 {
    let extent = children
        .into_iter()
        .fold(Vec2::ZERO, |acc, r| acc.max(r.br() - position));
    extent + padding * 2.0
}

/// Running cursor for stacking children top to bottom.
#[derive(Debug, Clone, Copy)]
pub struct StackCursor {
    /// Next slot.
    y: f32,
    /// Gap after each child.
    spacing: f32,
}

impl StackCursor {
    /// Start a stack inside a container's padded origin.
    pub fn new(position: Vec2, padding: Vec2, spacing: f32) -> Self {
        Self {
            y: position.y + padding.y,
            spacing,
        }
    }

    /// The y position for the next child.
    pub fn slot(&self) -> f32 {
        self.y
    }

    /// Advance past a child of the given height.
    pub fn advance(&mut self, height: f32) {
        self.y += height + self.spacing;
    }
}
