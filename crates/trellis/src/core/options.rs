use std::path::PathBuf;

use crate::text::Monospace;

/// Configuration for a [`Gui`](crate::Gui).
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Asset root. When `None`, the first asset load walks upward from the
    /// executable's directory looking for an `assets` directory.
    pub asset_dir: Option<PathBuf>,
    /// Maximum layout passes per root per frame when resolving until clean.
    pub max_layout_passes: usize,
    /// Text metrics for intrinsic measurement.
    pub metrics: Monospace,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            asset_dir: None,
            max_layout_passes: 4,
            metrics: Monospace::default(),
        }
    }
}

impl Options {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load assets from `dir`.
    pub fn asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// Bound the layout passes per frame. At least one pass always runs.
    pub fn max_layout_passes(mut self, passes: usize) -> Self {
        self.max_layout_passes = passes.max(1);
        self
    }

    /// Measure text with `metrics`.
    pub fn metrics(mut self, metrics: Monospace) -> Self {
        self.metrics = metrics;
        self
    }
}
