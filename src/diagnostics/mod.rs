//! Serializable run reports and stage timings.
//!
//! Reports are built from pipeline results by the binaries and written as
//! JSON on request; verbose runs also print a short key=value summary on the
//! diagnostic stream.

pub mod report;
pub mod timing;

pub use report::{InputDescriptor, SaliencyReport, SpatialInfoReport};
pub use timing::{StageClock, StageTiming, TimingBreakdown};
