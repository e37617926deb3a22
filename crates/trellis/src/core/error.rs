use std::result::Result as StdResult;

use thiserror::Error;

use super::{id::NodeId, state::NodeName};
use crate::layout::SizeMode;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// A handle that no longer names a live node.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// A widget was asked for a sizing mode it cannot resolve.
    #[error("unsupported size mode {mode:?} for node {node}")]
    UnsupportedSizeMode {
        /// Name of the offending node.
        node: NodeName,
        /// The requested mode.
        mode: SizeMode,
    },

    /// A widget slot was borrowed while already in use.
    #[error("widget already borrowed: {0:?}")]
    ReentrantWidgetBorrow(NodeId),

    #[error("resource: {0}")]
    /// Asset loading failure.
    Resource(String),

    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),

    #[error("render: {0}")]
    /// Rendering failure.
    Render(String),

    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
}
