//! Request-vs-allocatable utilization percentages

use crate::model::{AggregateTotals, UtilizationResult};

/// Percentage of allocatable consumed by requests, per dimension.
///
/// Rounded to two decimal places half away from zero. A zero allocatable
/// total yields `None` rather than an arithmetic fault or a misleading 0%.
pub fn compute(requested: &AggregateTotals, allocatable: &AggregateTotals) -> UtilizationResult {
    UtilizationResult {
        cpu_percent: percent_of(requested.cpu_millicores, allocatable.cpu_millicores),
        memory_percent: percent_of(requested.memory_bytes, allocatable.memory_bytes),
    }
}

fn percent_of(requested: u64, allocatable: u64) -> Option<f64> {
    if allocatable == 0 {
        return None;
    }
    let raw = requested as f64 * 100.0 / allocatable as f64;
    Some((raw * 100.0).round() / 100.0)
}
