//! Station registry: validates raw station definitions and builds the graph.
//!
//! Every station has at most one predecessor, so the graph is a forest of
//! out-trees rooted at the line-start stations. The topological order is
//! computed here once (Kahn's algorithm) and doubles as the cycle check.

use std::collections::VecDeque;

use crate::config::AnalysisConfig;
use crate::error::{LineError, Result, ValidationError};
use crate::interner::{StationId, StationInterner};
use crate::models::StationSpec;
use crate::{log_checks, log_debug};

/// Validated, indexed station graph.
///
/// Station IDs equal the station's position in the caller's input, so
/// "first occurrence" tie-breaks can compare IDs directly.
#[derive(Debug, Clone)]
pub struct StationGraph {
    /// Station name <-> integer mapping.
    index: StationInterner,
    /// Processing times indexed by station ID.
    processing_times: Vec<f64>,
    /// Direct predecessor of each station.
    predecessors: Vec<Option<StationId>>,
    /// Direct successors of each station, in input order.
    successors: Vec<Vec<StationId>>,
    /// Every station, predecessors before successors.
    topo_order: Vec<StationId>,
}

impl StationGraph {
    /// Number of stations.
    pub fn len(&self) -> usize {
        self.processing_times.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.processing_times.is_empty()
    }

    /// Station IDs in input order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.len()).map(|i| i as StationId)
    }

    /// Station name as supplied (trimmed).
    pub fn name(&self, id: StationId) -> &str {
        self.index.resolve(id).unwrap_or_default()
    }

    /// Look up a station by name, ignoring case.
    pub fn get_id(&self, name: &str) -> Option<StationId> {
        self.index.get(name)
    }

    pub fn processing_time(&self, id: StationId) -> f64 {
        self.processing_times[id as usize]
    }

    pub fn predecessor(&self, id: StationId) -> Option<StationId> {
        self.predecessors[id as usize]
    }

    pub fn successors(&self, id: StationId) -> &[StationId] {
        &self.successors[id as usize]
    }

    /// Stations ordered so every predecessor precedes its successors.
    pub fn topological_order(&self) -> &[StationId] {
        &self.topo_order
    }

    /// Sum of all processing times.
    pub fn total_processing_time(&self) -> f64 {
        self.processing_times.iter().fold(0.0, |acc, t| acc + t)
    }
}

/// Check a station's own fields and intern its name.
fn register_station(
    interner: &mut StationInterner,
    position: usize,
    spec: &StationSpec,
) -> std::result::Result<StationId, ValidationError> {
    let name = spec.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName { index: position });
    }
    if !spec.processing_time.is_finite() || spec.processing_time <= 0.0 {
        return Err(ValidationError::InvalidProcessingTime {
            name: name.to_string(),
            value: spec.processing_time,
        });
    }
    match interner.intern(name) {
        (id, true) => Ok(id),
        (_, false) => Err(ValidationError::DuplicateName {
            name: name.to_string(),
        }),
    }
}

/// Perform topological sort using Kahn's algorithm.
///
/// Line-start stations seed the queue in input order, which keeps the result
/// deterministic. Returns the stations left unprocessed on a cycle.
fn topological_sort(
    predecessors: &[Option<StationId>],
    successors: &[Vec<StationId>],
) -> std::result::Result<Vec<StationId>, Vec<StationId>> {
    let n = predecessors.len();
    let mut in_degree: Vec<usize> = predecessors.iter().map(|p| p.is_some() as usize).collect();

    let mut queue: VecDeque<StationId> = (0..n)
        .filter(|&i| in_degree[i] == 0)
        .map(|i| i as StationId)
        .collect();

    let mut order: Vec<StationId> = Vec::with_capacity(n);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for &succ in &successors[id as usize] {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != n {
        let stuck = (0..n)
            .filter(|&i| in_degree[i] > 0)
            .map(|i| i as StationId)
            .collect();
        return Err(stuck);
    }

    Ok(order)
}

/// Validate raw stations and build the indexed graph.
///
/// # Errors
/// * `LineError::Validation` for an empty name, a non-positive or non-finite
///   processing time, a duplicate name, or an unknown predecessor
/// * `LineError::CycleDetected` if predecessor links loop back on themselves
pub fn build(stations: &[StationSpec], config: &AnalysisConfig) -> Result<StationGraph> {
    let n = stations.len();
    let mut index = StationInterner::with_capacity(n);
    let mut processing_times = Vec::with_capacity(n);

    for (position, spec) in stations.iter().enumerate() {
        register_station(&mut index, position, spec)?;
        processing_times.push(spec.processing_time);
    }

    // Names are all known now, so forward references resolve too
    let mut predecessors: Vec<Option<StationId>> = vec![None; n];
    let mut successors: Vec<Vec<StationId>> = vec![Vec::new(); n];

    for (position, spec) in stations.iter().enumerate() {
        let Some(pred_name) = spec.predecessor() else {
            continue;
        };
        let pred = index
            .get(pred_name)
            .ok_or_else(|| ValidationError::UnknownPredecessor {
                station: spec.name.trim().to_string(),
                predecessor: pred_name.to_string(),
            })?;
        predecessors[position] = Some(pred);
        successors[pred as usize].push(position as StationId);
    }

    let topo_order = topological_sort(&predecessors, &successors).map_err(|stuck| {
        LineError::CycleDetected {
            stations: stuck
                .iter()
                .filter_map(|&id| index.resolve(id))
                .map(str::to_string)
                .collect(),
        }
    })?;

    log_checks!(config.verbosity, "Registered {} stations", n);
    log_debug!(
        config.verbosity,
        "Topological order: {:?}",
        topo_order
            .iter()
            .filter_map(|&id| index.resolve(id))
            .collect::<Vec<_>>()
    );

    Ok(StationGraph {
        index,
        processing_times,
        predecessors,
        successors,
        topo_order,
    })
}
