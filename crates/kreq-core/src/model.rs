//! Core data models for the resource report

use serde::{Deserialize, Serialize};

use crate::error::ReportWarning;
use crate::quantity::{Dimension, Quantity};

/// One container's resource requests as found on the workload spec.
///
/// Raw strings are carried exactly as declared; `None` means the container
/// does not request that dimension at all, which is distinct from an
/// explicit `"0"` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub namespace: String,
    pub pod_name: String,
    pub container_name: String,
    pub node_name: Option<String>,
    pub cpu_request: Option<String>,
    pub memory_request: Option<String>,
}

impl ContainerSpec {
    /// `namespace/pod/container` identifier used in tables and warnings
    pub fn full_name(&self) -> String {
        format!(
            "{}/{}/{}",
            self.namespace, self.pod_name, self.container_name
        )
    }
}

/// A node's capacity and allocatable quantities as reported by the cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    pub cpu_allocatable: String,
    pub memory_allocatable: String,
    pub cpu_capacity: String,
    pub memory_capacity: String,
}

/// A request that was present on the spec, both as declared and normalized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedQuantity {
    pub raw: String,
    pub quantity: Quantity,
}

/// A parsed per-container report row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerRow {
    pub namespace: String,
    pub pod_name: String,
    pub container_name: String,
    pub node_name: Option<String>,
    /// `None` when the container declares no request for the dimension
    pub cpu: Option<RequestedQuantity>,
    pub memory: Option<RequestedQuantity>,
}

impl ContainerRow {
    /// `namespace/pod/container` identifier used in tables and warnings
    pub fn full_name(&self) -> String {
        format!(
            "{}/{}/{}",
            self.namespace, self.pod_name, self.container_name
        )
    }

    /// Requested millicores; an unset request contributes 0
    pub fn cpu_millicores(&self) -> u64 {
        self.cpu.as_ref().map_or(0, |r| r.quantity.canonical)
    }

    /// Requested bytes; an unset request contributes 0
    pub fn memory_bytes(&self) -> u64 {
        self.memory.as_ref().map_or(0, |r| r.quantity.canonical)
    }

    /// Requested mebibytes, for display only
    pub fn memory_mebibytes(&self) -> f64 {
        self.memory_bytes() as f64 / (1024.0 * 1024.0)
    }
}

/// A parsed per-node report row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRow {
    pub name: String,
    pub cpu_allocatable: Quantity,
    pub memory_allocatable: Quantity,
    pub cpu_capacity: Quantity,
    pub memory_capacity: Quantity,
}

/// Elementwise sums of CPU and memory over a set of rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub cpu_millicores: u64,
    pub memory_bytes: u64,
}

impl AggregateTotals {
    /// Canonical total for one dimension
    pub fn get(&self, dimension: Dimension) -> u64 {
        match dimension {
            Dimension::Cpu => self.cpu_millicores,
            Dimension::Memory => self.memory_bytes,
        }
    }

    /// Whole cores, for display only
    pub fn cores(&self) -> f64 {
        self.cpu_millicores as f64 / 1000.0
    }

    /// Mebibytes, for display only
    pub fn mebibytes(&self) -> f64 {
        self.memory_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Gibibytes, for display only
    pub fn gibibytes(&self) -> f64 {
        self.memory_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}

/// Request-vs-allocatable percentages; `None` when allocatable is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationResult {
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
}

/// Node detail section of a wide report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeReport {
    pub rows: Vec<NodeRow>,
    pub allocatable: AggregateTotals,
    pub capacity: AggregateTotals,
}

/// The assembled, render-ready report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
    /// Namespace the snapshot was filtered by, if any
    pub namespace: Option<String>,
    /// Unix timestamp of report assembly
    pub generated_at: i64,
    pub rows: Vec<ContainerRow>,
    pub totals: AggregateTotals,
    /// Present only for wide reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<NodeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utilization: Option<UtilizationResult>,
    pub warnings: Vec<ReportWarning>,
}
