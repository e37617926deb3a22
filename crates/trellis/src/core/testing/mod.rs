/// A recording render surface.
pub mod backend;
/// Harness for driving a [`Gui`](crate::Gui) in tests.
pub mod harness;
/// Instrumented widget.
pub mod probe;

pub use backend::{DrawOp, RecordingSurface};
pub use harness::Harness;
pub use probe::{Probe, ProbeCounts};
