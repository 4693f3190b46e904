//! Line analysis pipeline: registry -> CPM -> metrics and workforce.

use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::cpm::schedule;
use crate::error::Result;
use crate::log_changes;
use crate::metrics::analyze;
use crate::models::{LineAnalysis, ProductionLine, StationReport};
use crate::registry::build;
use crate::workforce::allocate;

/// Analyze a production line and return a fresh results snapshot.
///
/// Pure and deterministic: the same line and config always produce an equal
/// snapshot, and nothing is retained between calls.
///
/// # Errors
/// * `LineError::Validation` if a station definition is malformed
/// * `LineError::CycleDetected` if predecessor references form a cycle
pub fn analyze_line(line: &ProductionLine, config: &AnalysisConfig) -> Result<LineAnalysis> {
    let graph = build(&line.stations, config)?;
    let scheduled = schedule(&graph, config);
    let metrics = analyze(&graph, &scheduled, line.units_to_produce, config);
    let allocation = allocate(&graph, line.available_workers, config);

    let mut per_station = BTreeMap::new();
    let mut workforce_allocation = BTreeMap::new();

    for id in graph.ids() {
        let idx = id as usize;
        let timing = scheduled.timing(id);
        let name = graph.name(id).to_string();
        per_station.insert(
            name.clone(),
            StationReport {
                processing_time: graph.processing_time(id),
                earliest_start: timing.earliest_start,
                earliest_finish: timing.earliest_finish,
                latest_start: timing.latest_start,
                latest_finish: timing.latest_finish,
                slack: timing.slack,
                is_critical: timing.is_critical,
                utilization_percent: metrics.utilization_percent[idx],
            },
        );
        workforce_allocation.insert(name, allocation[idx]);
    }

    log_changes!(
        config.verbosity,
        "Analyzed line of {} stations: {} units in {} min",
        graph.len(),
        line.units_to_produce,
        metrics.estimated_total_time
    );

    Ok(LineAnalysis {
        critical_path_length: scheduled.critical_path_length,
        critical_station_names: scheduled.critical_station_names,
        critical_path: scheduled.critical_path,
        per_station,
        bottleneck: metrics.bottleneck,
        cycle_time: metrics.cycle_time,
        production_rate: metrics.production_rate,
        estimated_total_time: metrics.estimated_total_time,
        efficiency_percent: metrics.efficiency_percent,
        balance_delay_percent: metrics.balance_delay_percent,
        idle_time_total: metrics.idle_time_total,
        total_work_content: metrics.total_work_content,
        station_count: graph.len(),
        workforce_allocation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LineError, ValidationError};
    use crate::logging;
    use crate::models::StationSpec;

    fn sheet_metal_line(units: u32, workers: u32) -> ProductionLine {
        ProductionLine::new(
            vec![
                StationSpec::new("Cut", 2.0, None),
                StationSpec::new("Bend", 3.0, Some("Cut")),
                StationSpec::new("Assemble", 5.0, Some("Bend")),
                StationSpec::new("Paint", 4.0, Some("Assemble")),
                StationSpec::new("Pack", 1.5, Some("Paint")),
            ],
            units,
            workers,
        )
    }

    #[test]
    fn test_sheet_metal_snapshot() {
        logging::init_test();
        let config = AnalysisConfig::with_verbosity(logging::VERBOSITY_DEBUG);
        let result = analyze_line(&sheet_metal_line(100, 10), &config).unwrap();

        assert!((result.critical_path_length - 15.5).abs() < 1e-9);
        assert_eq!(result.critical_station_names.len(), 5);
        assert_eq!(result.bottleneck.as_ref().unwrap().name, "Assemble");
        assert!((result.cycle_time - 5.0).abs() < 1e-9);
        assert!((result.production_rate - 12.0).abs() < 1e-9);
        assert!((result.estimated_total_time - 510.5).abs() < 1e-9);
        assert!((result.efficiency_percent - 62.0).abs() < 1e-9);
        assert_eq!(result.station_count, 5);

        let paint = &result.per_station["Paint"];
        assert!((paint.earliest_start - 10.0).abs() < 1e-9);
        assert!((paint.earliest_finish - 14.0).abs() < 1e-9);
        assert!(paint.is_critical);

        let total: u32 = result.workforce_allocation.values().sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_single_station_line() {
        let line = ProductionLine::new(vec![StationSpec::new("Only", 4.0, None)], 5, 3);
        let result = analyze_line(&line, &AnalysisConfig::default()).unwrap();

        assert!((result.critical_path_length - 4.0).abs() < 1e-9);
        assert!((result.efficiency_percent - 100.0).abs() < 1e-9);
        assert_eq!(result.idle_time_total, 0.0);
        assert_eq!(result.workforce_allocation["Only"], 3);
    }

    #[test]
    fn test_even_workforce() {
        let line = ProductionLine::new(
            (1..=5)
                .map(|i| StationSpec::new(format!("S{}", i), 1.7, None))
                .collect(),
            1,
            5,
        );
        let result = analyze_line(&line, &AnalysisConfig::default()).unwrap();
        assert!(result.workforce_allocation.values().all(|&w| w == 1));
    }

    #[test]
    fn test_cycle_halts_pipeline() {
        let line = ProductionLine::new(
            vec![
                StationSpec::new("A", 1.0, Some("B")),
                StationSpec::new("B", 2.0, Some("A")),
            ],
            10,
            2,
        );
        let err = analyze_line(&line, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, LineError::CycleDetected { .. }));
    }

    #[test]
    fn test_validation_halts_pipeline() {
        let line = ProductionLine::new(vec![StationSpec::new("Cut", 0.0, None)], 10, 2);
        let err = analyze_line(&line, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(
            err,
            LineError::Validation(ValidationError::InvalidProcessingTime {
                name: "Cut".to_string(),
                value: 0.0,
            })
        );
    }

    #[test]
    fn test_empty_line() {
        let line = ProductionLine::new(vec![], 10, 4);
        let result = analyze_line(&line, &AnalysisConfig::default()).unwrap();
        assert_eq!(result.critical_path_length, 0.0);
        assert!(result.critical_station_names.is_empty());
        assert!(result.bottleneck.is_none());
        assert!(result.workforce_allocation.is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let line = sheet_metal_line(42, 7);
        let config = AnalysisConfig::default();
        let first = analyze_line(&line, &config).unwrap();
        let second = analyze_line(&line, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let result = analyze_line(&sheet_metal_line(100, 10), &AnalysisConfig::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["critical_path_length"], 15.5);
        assert_eq!(json["bottleneck"]["name"], "Assemble");
        assert_eq!(json["bottleneck"]["processing_time"], 5.0);
        assert_eq!(json["per_station"]["Cut"]["earliest_finish"], 2.0);
        assert_eq!(json["per_station"]["Pack"]["is_critical"], true);
        assert!(json["workforce_allocation"]["Assemble"].is_u64());
        assert!(json["critical_station_names"].is_array());
    }
}
