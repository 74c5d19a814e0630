//! Per-node capacity bookkeeping for wide reports

use tracing::warn;

use crate::error::{ParseError, ReportWarning};
use crate::model::{AggregateTotals, NodeReport, NodeRow, NodeSpec};
use crate::quantity::{self, Dimension, Quantity};

/// Parsed node rows plus cluster-wide allocatable and capacity sums.
///
/// Capacity >= allocatable is expected but not asserted; the index trusts
/// the data source and does not validate node-internal consistency. A node
/// with any malformed quantity is dropped with a recorded warning.
#[derive(Debug, Default)]
pub struct NodeCapacityIndex {
    rows: Vec<NodeRow>,
    allocatable: AggregateTotals,
    capacity: AggregateTotals,
    warnings: Vec<ReportWarning>,
}

impl NodeCapacityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one node's quantities and fold them into the cluster sums
    pub fn push(&mut self, spec: &NodeSpec) {
        match parse_node(spec) {
            Ok(row) => {
                self.allocatable.cpu_millicores += row.cpu_allocatable.canonical;
                self.allocatable.memory_bytes += row.memory_allocatable.canonical;
                self.capacity.cpu_millicores += row.cpu_capacity.canonical;
                self.capacity.memory_bytes += row.memory_capacity.canonical;
                self.rows.push(row);
            }
            Err((field, value, err)) => {
                warn!(
                    node = %spec.name,
                    %field,
                    value = %value,
                    error = %err,
                    "skipping node with malformed quantity"
                );
                self.warnings.push(ReportWarning::SkippedNode {
                    node_name: spec.name.clone(),
                    field,
                    value,
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Sum of allocatable across all accepted nodes
    pub fn total_allocatable(&self, dimension: Dimension) -> u64 {
        self.allocatable.get(dimension)
    }

    /// Sum of capacity across all accepted nodes
    pub fn total_capacity(&self, dimension: Dimension) -> u64 {
        self.capacity.get(dimension)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn finish(self) -> (NodeReport, Vec<ReportWarning>) {
        (
            NodeReport {
                rows: self.rows,
                allocatable: self.allocatable,
                capacity: self.capacity,
            },
            self.warnings,
        )
    }
}

fn parse_node(spec: &NodeSpec) -> Result<NodeRow, (Dimension, String, ParseError)> {
    let parse = |raw: &str, dimension: Dimension| -> Result<Quantity, (Dimension, String, ParseError)> {
        quantity::parse(raw, dimension).map_err(|err| (dimension, raw.to_string(), err))
    };

    Ok(NodeRow {
        name: spec.name.clone(),
        cpu_allocatable: parse(&spec.cpu_allocatable, Dimension::Cpu)?,
        memory_allocatable: parse(&spec.memory_allocatable, Dimension::Memory)?,
        cpu_capacity: parse(&spec.cpu_capacity, Dimension::Cpu)?,
        memory_capacity: parse(&spec.memory_capacity, Dimension::Memory)?,
    })
}
