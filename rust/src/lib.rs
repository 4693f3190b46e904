//! Production line balancing engine.
//!
//! Models a chain of workstations with predecessor links, runs the Critical
//! Path Method over it, and derives line metrics (bottleneck, cycle time,
//! throughput, efficiency, idle time) plus a proportional workforce
//! allocation. Every stage is a pure function of its input:
//!
//! raw stations -> [`registry::build`] -> [`cpm::schedule`] ->
//! {[`metrics::analyze`], [`workforce::allocate`]} -> [`LineAnalysis`]
//!
//! [`analyze_line`] runs the whole pipeline.

pub mod logging;

pub mod analysis;
mod config;
pub mod cpm;
mod error;
pub mod interner;
pub mod metrics;
mod models;
pub mod registry;
pub mod workforce;

#[cfg(feature = "python")]
mod python;

pub use analysis::analyze_line;
pub use config::AnalysisConfig;
pub use cpm::{ScheduleResult, StationTiming};
pub use error::{LineError, Result, ValidationError};
pub use metrics::LineMetrics;
pub use models::{Bottleneck, LineAnalysis, ProductionLine, StationReport, StationSpec};
pub use registry::StationGraph;
