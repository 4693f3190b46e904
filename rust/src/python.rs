//! Python bindings (feature `python`).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

use crate::analysis::analyze_line;
use crate::config::AnalysisConfig;
use crate::models::{LineAnalysis, ProductionLine, StationReport, StationSpec};

/// A workstation definition (PyO3 wrapper).
#[pyclass(name = "Station")]
#[derive(Clone, Debug)]
pub struct PyStation {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub processing_time: f64,
    #[pyo3(get, set)]
    pub predecessor_name: Option<String>,
}

#[pymethods]
impl PyStation {
    #[new]
    #[pyo3(signature = (name, processing_time, predecessor_name=None))]
    fn new(name: String, processing_time: f64, predecessor_name: Option<String>) -> Self {
        Self {
            name,
            processing_time,
            predecessor_name,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Station(name={:?}, processing_time={}, predecessor={:?})",
            self.name, self.processing_time, self.predecessor_name
        )
    }
}

impl From<PyStation> for StationSpec {
    fn from(s: PyStation) -> Self {
        StationSpec {
            name: s.name,
            processing_time: s.processing_time,
            predecessor_name: s.predecessor_name,
        }
    }
}

/// Per-station timing figures (read-only).
#[pyclass(name = "StationReport", frozen)]
#[derive(Clone, Debug)]
pub struct PyStationReport {
    #[pyo3(get)]
    pub processing_time: f64,
    #[pyo3(get)]
    pub earliest_start: f64,
    #[pyo3(get)]
    pub earliest_finish: f64,
    #[pyo3(get)]
    pub latest_start: f64,
    #[pyo3(get)]
    pub latest_finish: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub is_critical: bool,
    #[pyo3(get)]
    pub utilization_percent: f64,
}

impl From<&StationReport> for PyStationReport {
    fn from(r: &StationReport) -> Self {
        Self {
            processing_time: r.processing_time,
            earliest_start: r.earliest_start,
            earliest_finish: r.earliest_finish,
            latest_start: r.latest_start,
            latest_finish: r.latest_finish,
            slack: r.slack,
            is_critical: r.is_critical,
            utilization_percent: r.utilization_percent,
        }
    }
}

/// Results snapshot of one analysis run (read-only).
#[pyclass(name = "LineAnalysis", frozen)]
#[derive(Clone, Debug)]
pub struct PyLineAnalysis {
    inner: LineAnalysis,
}

#[pymethods]
impl PyLineAnalysis {
    #[getter]
    fn critical_path_length(&self) -> f64 {
        self.inner.critical_path_length
    }

    #[getter]
    fn critical_station_names(&self) -> Vec<String> {
        self.inner.critical_station_names.clone()
    }

    #[getter]
    fn critical_path(&self) -> Vec<String> {
        self.inner.critical_path.clone()
    }

    #[getter]
    fn per_station(&self) -> HashMap<String, PyStationReport> {
        self.inner
            .per_station
            .iter()
            .map(|(name, report)| (name.clone(), PyStationReport::from(report)))
            .collect()
    }

    /// (name, processing_time), or None for an empty line.
    #[getter]
    fn bottleneck(&self) -> Option<(String, f64)> {
        self.inner
            .bottleneck
            .as_ref()
            .map(|b| (b.name.clone(), b.processing_time))
    }

    #[getter]
    fn cycle_time(&self) -> f64 {
        self.inner.cycle_time
    }

    #[getter]
    fn production_rate(&self) -> f64 {
        self.inner.production_rate
    }

    #[getter]
    fn estimated_total_time(&self) -> f64 {
        self.inner.estimated_total_time
    }

    #[getter]
    fn efficiency_percent(&self) -> f64 {
        self.inner.efficiency_percent
    }

    #[getter]
    fn balance_delay_percent(&self) -> f64 {
        self.inner.balance_delay_percent
    }

    #[getter]
    fn idle_time_total(&self) -> f64 {
        self.inner.idle_time_total
    }

    #[getter]
    fn total_work_content(&self) -> f64 {
        self.inner.total_work_content
    }

    #[getter]
    fn station_count(&self) -> usize {
        self.inner.station_count
    }

    #[getter]
    fn workforce_allocation(&self) -> HashMap<String, u32> {
        self.inner
            .workforce_allocation
            .iter()
            .map(|(name, &workers)| (name.clone(), workers))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "LineAnalysis(stations={}, critical_path_length={}, cycle_time={})",
            self.inner.station_count, self.inner.critical_path_length, self.inner.cycle_time
        )
    }
}

/// Analyze a production line.
///
/// # Arguments
/// * `stations` - Station definitions
/// * `units_to_produce` - Batch size for the total-time estimate
/// * `available_workers` - Headcount to apportion across stations
/// * `verbosity` - Logging verbosity (0-3)
///
/// # Raises
/// * ValueError on invalid stations or a circular predecessor chain
#[pyfunction]
#[pyo3(signature = (stations, units_to_produce, available_workers, verbosity=0))]
fn analyze_production_line(
    stations: Vec<PyStation>,
    units_to_produce: u32,
    available_workers: u32,
    verbosity: u8,
) -> PyResult<PyLineAnalysis> {
    let line = ProductionLine::new(
        stations.into_iter().map(StationSpec::from).collect(),
        units_to_produce,
        available_workers,
    );
    let config = AnalysisConfig::with_verbosity(verbosity);

    match analyze_line(&line, &config) {
        Ok(inner) => Ok(PyLineAnalysis { inner }),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The line_balance.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStation>()?;
    m.add_class::<PyStationReport>()?;
    m.add_class::<PyLineAnalysis>()?;

    m.add_function(wrap_pyfunction!(analyze_production_line, m)?)?;

    Ok(())
}
