//! Configuration for the line analysis pipeline.

use serde::{Deserialize, Serialize};

/// Tunables shared by every pipeline stage.
///
/// The defaults reproduce the standard CPM and line-balancing formulas; only
/// hosts with unusual time units should need to change them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Stations whose |slack| is below this are critical.
    pub slack_tolerance: f64,
    /// Scale for the production rate (processing times are in minutes).
    pub minutes_per_hour: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            slack_tolerance: 1e-6,
            minutes_per_hour: 60.0,
            verbosity: 0,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with the given verbosity.
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }
}
