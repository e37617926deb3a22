//! Core types and traits for the trellis UI engine.

// Core modules - public
/// Font and texture loading.
pub mod assets;
/// Native input integrations.
pub mod backend;
/// Fluent node configuration.
pub mod builder;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Node data.
pub mod node;
/// Rendering interfaces.
pub mod render;
/// Shared node name types.
pub mod state;
/// Colors and paint.
pub mod style;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// Text measurement.
pub mod text;

// Core modules - internal
/// Core context traits and implementations.
pub mod context;
/// The tree registry.
pub mod gui;
/// Node ID types.
pub mod id;
/// Registry configuration.
pub mod options;
/// World state and layout integration.
pub mod world;

// Public exports from internal modules
pub use context::{Context, ViewContext};
pub use gui::Gui;
pub use id::{NodeId, TypedId};
pub use options::Options;
pub use world::Core;
