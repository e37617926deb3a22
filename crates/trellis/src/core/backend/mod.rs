//! Native input integrations.

/// Crossterm event translation.
pub mod crossterm;
