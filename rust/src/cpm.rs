//! Critical path calculation using forward and backward passes.

use crate::config::AnalysisConfig;
use crate::interner::StationId;
use crate::registry::StationGraph;
use crate::{log_changes, log_checks};

/// Per-station timing information from the CPM passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
    /// Zero slack, within the configured tolerance.
    pub is_critical: bool,
}

/// Result of scheduling a station graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleResult {
    /// Timing for each station, indexed by station ID.
    pub timings: Vec<StationTiming>,
    /// Largest earliest finish over all stations.
    pub critical_path_length: f64,
    /// Critical station names, sorted alphabetically.
    pub critical_station_names: Vec<String>,
    /// Critical station names in topological order.
    pub critical_path: Vec<String>,
}

impl ScheduleResult {
    pub fn timing(&self, id: StationId) -> &StationTiming {
        &self.timings[id as usize]
    }
}

/// Run the forward and backward passes over a validated graph.
///
/// Stations are visited in the graph's own topological order, never in the
/// caller's input order. Branching lines are supported: every station without
/// successors finishes no later than the critical path length.
pub fn schedule(graph: &StationGraph, config: &AnalysisConfig) -> ScheduleResult {
    let order = graph.topological_order();
    let mut timings: Vec<StationTiming> = vec![StationTiming::default(); graph.len()];

    // Forward pass: earliest start/finish
    for &id in order {
        let earliest_start = graph
            .predecessor(id)
            .map(|pred| timings[pred as usize].earliest_finish)
            .unwrap_or(0.0);

        let timing = &mut timings[id as usize];
        timing.earliest_start = earliest_start;
        timing.earliest_finish = earliest_start + graph.processing_time(id);
    }

    let critical_path_length = timings
        .iter()
        .map(|t| t.earliest_finish)
        .fold(0.0, f64::max);

    // Backward pass: latest start/finish, in reverse topological order
    for &id in order.iter().rev() {
        let mut latest_finish = f64::MAX;
        for &succ in graph.successors(id) {
            let required_finish = timings[succ as usize].latest_start;
            if required_finish < latest_finish {
                latest_finish = required_finish;
            }
        }

        if latest_finish == f64::MAX {
            // No successors, must finish by the end of the line
            latest_finish = critical_path_length;
        }

        let timing = &mut timings[id as usize];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish - graph.processing_time(id);
        timing.slack = timing.latest_start - timing.earliest_start;
        timing.is_critical = timing.slack.abs() < config.slack_tolerance;

        log_checks!(
            config.verbosity,
            "Station {}: ES={} EF={} LS={} LF={} slack={}",
            graph.name(id),
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.slack
        );
    }

    let critical_path: Vec<String> = order
        .iter()
        .filter(|&&id| timings[id as usize].is_critical)
        .map(|&id| graph.name(id).to_string())
        .collect();

    let mut critical_station_names = critical_path.clone();
    critical_station_names.sort();

    log_changes!(
        config.verbosity,
        "Critical path length {} through {} critical stations",
        critical_path_length,
        critical_station_names.len()
    );

    ScheduleResult {
        timings,
        critical_path_length,
        critical_station_names,
        critical_path,
    }
}
