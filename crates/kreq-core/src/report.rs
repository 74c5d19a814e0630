//! Report assembly pipeline

use chrono::Utc;

use crate::accumulate::ResourceAccumulator;
use crate::error::ReportWarning;
use crate::model::{ContainerSpec, NodeSpec, ReportModel};
use crate::nodes::NodeCapacityIndex;
use crate::utilization;

/// Explicit per-invocation configuration for the report pipeline
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Namespace the input was filtered by, echoed into the report
    pub namespace: Option<String>,
    /// Include node capacity detail and utilization
    pub wide: bool,
}

/// Builds a [`ReportModel`] from one cluster snapshot.
///
/// Single linear pipeline: accumulate containers, index nodes when wide
/// output is requested, derive utilization, package everything with the
/// collected warnings. Carries no state between invocations.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, containers: &[ContainerSpec], nodes: &[NodeSpec]) -> ReportModel {
        let mut accumulator = ResourceAccumulator::new();
        for spec in containers {
            accumulator.push(spec);
        }
        let accumulation = accumulator.finish();

        let mut warnings = accumulation.warnings;
        if containers.is_empty() {
            warnings.push(ReportWarning::EmptyInput);
        }

        let (node_report, utilization) = if self.config.wide {
            let mut index = NodeCapacityIndex::new();
            for spec in nodes {
                index.push(spec);
            }
            let (node_report, node_warnings) = index.finish();
            warnings.extend(node_warnings);
            let utilization = utilization::compute(&accumulation.totals, &node_report.allocatable);
            (Some(node_report), Some(utilization))
        } else {
            (None, None)
        };

        ReportModel {
            namespace: self.config.namespace.clone(),
            generated_at: Utc::now().timestamp(),
            rows: accumulation.rows,
            totals: accumulation.totals,
            nodes: node_report,
            utilization,
            warnings,
        }
    }
}
