//! Workforce allocation by largest-remainder (Hamilton) apportionment.
//!
//! Workers are split proportionally to processing time. Each station first
//! gets the integer part of its ideal share; the leftover workers go one at
//! a time to the largest fractional remainders. The result always sums to
//! exactly the available headcount.

use std::cmp::Ordering;

use crate::config::AnalysisConfig;
use crate::interner::StationId;
use crate::registry::StationGraph;
use crate::{log_changes, log_debug};

/// Compare f64 values for sorting, treating NaN as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Allocate `available_workers` across stations, indexed by station ID.
///
/// Returns all zeros when there are no workers or no processing time. Ties
/// between equal remainders go to the station listed first in the input.
pub fn allocate(graph: &StationGraph, available_workers: u32, config: &AnalysisConfig) -> Vec<u32> {
    let mut allocation = vec![0u32; graph.len()];
    let total_time = graph.total_processing_time();

    if available_workers == 0 || total_time <= 0.0 {
        return allocation;
    }

    let workers = f64::from(available_workers);
    let mut remainders: Vec<(StationId, f64)> = Vec::with_capacity(graph.len());
    let mut assigned: u32 = 0;

    for id in graph.ids() {
        let ideal = graph.processing_time(id) * workers / total_time;
        let whole = ideal.floor();
        // Floors of proportional shares never sum past the total
        let share = (whole as u32).min(available_workers - assigned);
        allocation[id as usize] = share;
        assigned += share;
        remainders.push((id, ideal - whole));
    }

    // Stable sort keeps input order among equal remainders
    remainders.sort_by(|a, b| cmp_f64(b.1, a.1));

    let remaining = available_workers - assigned;
    log_debug!(
        config.verbosity,
        "Assigned {} workers by floor, {} by remainder",
        assigned,
        remaining
    );

    for &(id, remainder) in remainders.iter().cycle().take(remaining as usize) {
        allocation[id as usize] += 1;
        log_debug!(
            config.verbosity,
            "Extra worker to {} (remainder {:.4})",
            graph.name(id),
            remainder
        );
    }

    log_changes!(
        config.verbosity,
        "Allocated {} workers across {} stations",
        available_workers,
        graph.len()
    );

    allocation
}
