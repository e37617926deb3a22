//! Trellis: a retained-mode UI layout and event engine.
//!
//! Widgets live in an arena of nodes. Each node carries layout inputs
//! (offset, size, padding, and position and size policies), resolves its
//! position and size lazily when marked dirty, receives input events fanned
//! out from its parent, and draws itself through a [`render::Surface`].
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Gui`] - The registry of root nodes that drives each frame
//! - [`Core`] - The arena and layout engine
//! - [`Widget`] - The trait implemented by all widgets
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Vec2, Rect)
//! - [`layout`] - Layout inputs and resolution rules
//! - [`widgets`] - Built-in widget implementations

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod layout;
pub mod widget;
pub mod widgets;

pub use geom;

#[cfg(any(test, feature = "testing"))]
pub use core::testing;
// Re-export core types
pub use core::{Context, Core, Gui, NodeId, Options, TypedId, ViewContext};
pub use core::{
    assets, backend, builder, dump, error, event, node, render, state, style, text,
};
// Re-export widget trait and event outcome
pub use widget::{EventOutcome, Widget};
