//! Core data types: raw line input and the analysis snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One workstation as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    pub name: String,
    /// Minutes per unit.
    pub processing_time: f64,
    /// Upstream station; absent or blank means the station starts the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predecessor_name: Option<String>,
}

impl StationSpec {
    pub fn new(name: impl Into<String>, processing_time: f64, predecessor: Option<&str>) -> Self {
        Self {
            name: name.into(),
            processing_time,
            predecessor_name: predecessor.map(str::to_string),
        }
    }

    /// Predecessor name, treating blank strings as absent.
    pub fn predecessor(&self) -> Option<&str> {
        self.predecessor_name
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// A production line to analyze.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub stations: Vec<StationSpec>,
    pub units_to_produce: u32,
    pub available_workers: u32,
}

impl ProductionLine {
    pub fn new(stations: Vec<StationSpec>, units_to_produce: u32, available_workers: u32) -> Self {
        Self {
            stations,
            units_to_produce,
            available_workers,
        }
    }
}

/// Station with the largest processing time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub name: String,
    pub processing_time: f64,
}

/// Per-station scheduling figures in the snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationReport {
    pub processing_time: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub slack: f64,
    pub is_critical: bool,
    /// Share of the cycle time this station is busy.
    pub utilization_percent: f64,
}

/// Immutable result of one analysis run.
///
/// Maps are ordered by station name so the serialized form is stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineAnalysis {
    pub critical_path_length: f64,
    /// Critical stations, alphabetically.
    pub critical_station_names: Vec<String>,
    /// Critical stations in dependency order.
    pub critical_path: Vec<String>,
    pub per_station: BTreeMap<String, StationReport>,
    /// None only for a line without stations.
    pub bottleneck: Option<Bottleneck>,
    pub cycle_time: f64,
    /// Units per hour.
    pub production_rate: f64,
    pub estimated_total_time: f64,
    pub efficiency_percent: f64,
    pub balance_delay_percent: f64,
    pub idle_time_total: f64,
    pub total_work_content: f64,
    pub station_count: usize,
    pub workforce_allocation: BTreeMap<String, u32>,
}
