//! Side-by-side comparison of planners on one world

use std::time::Instant;

use log::info;

use crate::common::{GridCoord, PlanningResult};
use crate::evaluation::path_metrics::PathMetrics;
use crate::mapping::GridWorld;
use crate::path_planning::PlannerConfig;

/// Metrics of one planner run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkRecord {
    pub algorithm: String,
    pub metrics: PathMetrics,
    /// Wall-clock planning time in milliseconds
    pub elapsed_ms: f64,
}

/// Run every planner on the same world and endpoints
///
/// All configurations are validated before the first planner runs.
pub fn run_benchmark(
    world: &GridWorld,
    start: GridCoord,
    goal: GridCoord,
    planners: &[PlannerConfig],
) -> PlanningResult<Vec<BenchmarkRecord>> {
    for planner in planners {
        planner.validate()?;
    }
    world.validate_endpoints(start, goal)?;

    planners
        .iter()
        .map(|planner| -> PlanningResult<BenchmarkRecord> {
            let start_time = Instant::now();
            let result = planner.plan(world, start, goal)?;
            let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;

            let metrics = PathMetrics::from_result(&result);
            info!(
                "[Benchmark] {}: found={} cost={:.2} explored={} in {:.2} ms",
                planner.name(),
                metrics.found,
                metrics.cost,
                metrics.explored_count,
                elapsed_ms
            );
            Ok(BenchmarkRecord { algorithm: planner.name().to_string(), metrics, elapsed_ms })
        })
        .collect()
}

/// Plain-text table of benchmark records, one row per planner
pub fn format_table(records: &[BenchmarkRecord]) -> String {
    let mut table = format!(
        "{:<6} {:>6} {:>9} {:>10} {:>8} {:>9} {:>10} {:>10}\n",
        "algo", "found", "cost", "deviation", "length", "explored", "iterations", "time(ms)"
    );
    for record in records {
        let m = &record.metrics;
        table.push_str(&format!(
            "{:<6} {:>6} {:>9.2} {:>10.2} {:>8} {:>9} {:>10} {:>10.2}\n",
            record.algorithm, m.found, m.cost, m.deviation, m.path_len, m.explored_count, m.iterations, record.elapsed_ms
        ));
    }
    table
}
