//! Bottleneck and line performance metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Cycle time | Processing time of the bottleneck station |
//! | Production rate | Units per hour at the cycle time |
//! | Estimated total time | Fill time (critical path) plus one cycle per extra unit |
//! | Efficiency | Work content / (stations x cycle time) |
//! | Balance delay | 100% - efficiency |
//! | Idle time | Total slack of non-critical stations |

use crate::config::AnalysisConfig;
use crate::cpm::ScheduleResult;
use crate::interner::StationId;
use crate::log_changes;
use crate::models::Bottleneck;
use crate::registry::StationGraph;

/// Line metrics derived from a scheduled graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMetrics {
    /// None only when the line has no stations.
    pub bottleneck: Option<Bottleneck>,
    pub cycle_time: f64,
    /// Units per hour.
    pub production_rate: f64,
    pub estimated_total_time: f64,
    pub efficiency_percent: f64,
    pub balance_delay_percent: f64,
    pub idle_time_total: f64,
    pub total_work_content: f64,
    /// Busy share of the cycle time per station, indexed by station ID.
    pub utilization_percent: Vec<f64>,
}

/// Station with the largest processing time; ties keep the earliest input.
fn find_bottleneck(graph: &StationGraph) -> Option<Bottleneck> {
    let mut best: Option<(StationId, f64)> = None;
    for id in graph.ids() {
        let time = graph.processing_time(id);
        match best {
            Some((_, best_time)) if time <= best_time => {}
            _ => best = Some((id, time)),
        }
    }
    best.map(|(id, processing_time)| Bottleneck {
        name: graph.name(id).to_string(),
        processing_time,
    })
}

/// Compute cycle time, throughput, efficiency, and idle time.
///
/// Zero-valued metrics stand in for undefined ratios (no stations, or a
/// zero cycle time); they are not errors.
pub fn analyze(
    graph: &StationGraph,
    schedule: &ScheduleResult,
    units_to_produce: u32,
    config: &AnalysisConfig,
) -> LineMetrics {
    let bottleneck = find_bottleneck(graph);
    let cycle_time = bottleneck.as_ref().map_or(0.0, |b| b.processing_time);

    let production_rate = if cycle_time > 0.0 {
        config.minutes_per_hour / cycle_time
    } else {
        0.0
    };

    let estimated_total_time = if units_to_produce > 0 && cycle_time > 0.0 {
        schedule.critical_path_length + f64::from(units_to_produce - 1) * cycle_time
    } else {
        schedule.critical_path_length
    };

    let total_work_content = graph.total_processing_time();
    let capacity = graph.len() as f64 * cycle_time;
    let efficiency_percent = if capacity > 0.0 {
        total_work_content / capacity * 100.0
    } else {
        0.0
    };
    let balance_delay_percent = if efficiency_percent > 0.0 {
        100.0 - efficiency_percent
    } else {
        0.0
    };

    let idle_time_total = schedule
        .timings
        .iter()
        .filter(|t| !t.is_critical)
        .fold(0.0, |acc, t| acc + t.slack);

    let utilization_percent = graph
        .ids()
        .map(|id| {
            if cycle_time > 0.0 {
                graph.processing_time(id) / cycle_time * 100.0
            } else {
                0.0
            }
        })
        .collect();

    if let Some(b) = &bottleneck {
        log_changes!(
            config.verbosity,
            "Bottleneck {} ({} min), {:.2} units/h, efficiency {:.1}%",
            b.name,
            b.processing_time,
            production_rate,
            efficiency_percent
        );
    }

    LineMetrics {
        bottleneck,
        cycle_time,
        production_rate,
        estimated_total_time,
        efficiency_percent,
        balance_delay_percent,
        idle_time_total,
        total_work_content,
        utilization_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpm::schedule;
    use crate::models::StationSpec;
    use crate::registry;

    fn run(stations: &[(&str, f64, Option<&str>)], units: u32) -> LineMetrics {
        let specs: Vec<StationSpec> = stations
            .iter()
            .map(|&(name, time, pred)| StationSpec::new(name, time, pred))
            .collect();
        let config = AnalysisConfig::default();
        let graph = registry::build(&specs, &config).unwrap();
        let scheduled = schedule(&graph, &config);
        analyze(&graph, &scheduled, units, &config)
    }

    fn sheet_metal_line() -> Vec<(&'static str, f64, Option<&'static str>)> {
        vec![
            ("Cut", 2.0, None),
            ("Bend", 3.0, Some("Cut")),
            ("Assemble", 5.0, Some("Bend")),
            ("Paint", 4.0, Some("Assemble")),
            ("Pack", 1.5, Some("Paint")),
        ]
    }

    #[test]
    fn test_sheet_metal_metrics() {
        let metrics = run(&sheet_metal_line(), 100);

        let bottleneck = metrics.bottleneck.unwrap();
        assert_eq!(bottleneck.name, "Assemble");
        assert!((bottleneck.processing_time - 5.0).abs() < 1e-9);
        assert!((metrics.cycle_time - 5.0).abs() < 1e-9);
        assert!((metrics.production_rate - 12.0).abs() < 1e-9);
        assert!((metrics.estimated_total_time - 510.5).abs() < 1e-9);
        assert!((metrics.efficiency_percent - 62.0).abs() < 1e-9);
        assert!((metrics.balance_delay_percent - 38.0).abs() < 1e-9);
        assert!((metrics.total_work_content - 15.5).abs() < 1e-9);
        assert!(metrics.idle_time_total.abs() < 1e-9);
    }

    #[test]
    fn test_utilization_relative_to_bottleneck() {
        let metrics = run(&sheet_metal_line(), 1);
        assert!((metrics.utilization_percent[0] - 40.0).abs() < 1e-9);
        assert!((metrics.utilization_percent[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bottleneck_tie_keeps_first_station() {
        let metrics = run(
            &[
                ("Saw", 4.0, None),
                ("Lathe", 6.0, Some("Saw")),
                ("Mill", 6.0, Some("Lathe")),
            ],
            1,
        );
        assert_eq!(metrics.bottleneck.unwrap().name, "Lathe");
    }

    #[test]
    fn test_single_unit_takes_critical_path() {
        let metrics = run(&sheet_metal_line(), 1);
        assert!((metrics.estimated_total_time - 15.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_units_falls_back_to_critical_path() {
        let metrics = run(&sheet_metal_line(), 0);
        assert!((metrics.estimated_total_time - 15.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_station_boundary() {
        let metrics = run(&[("Only", 3.0, None)], 10);
        assert!((metrics.efficiency_percent - 100.0).abs() < 1e-9);
        assert_eq!(metrics.balance_delay_percent, 0.0);
        assert_eq!(metrics.idle_time_total, 0.0);
        assert!((metrics.estimated_total_time - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_time_sums_non_critical_slack() {
        // Cut-Drill-Polish finishes at 3.5 against 7.0, so Drill and Polish each have 3.5 slack
        let metrics = run(
            &[
                ("Cut", 2.0, None),
                ("Drill", 1.0, Some("Cut")),
                ("Weld", 5.0, Some("Cut")),
                ("Polish", 0.5, Some("Drill")),
            ],
            1,
        );
        assert!((metrics.idle_time_total - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_line_is_all_zero() {
        let metrics = run(&[], 50);
        assert!(metrics.bottleneck.is_none());
        assert_eq!(metrics.cycle_time, 0.0);
        assert_eq!(metrics.production_rate, 0.0);
        assert_eq!(metrics.estimated_total_time, 0.0);
        assert_eq!(metrics.efficiency_percent, 0.0);
        assert_eq!(metrics.idle_time_total, 0.0);
        assert!(metrics.utilization_percent.is_empty());
    }
}
