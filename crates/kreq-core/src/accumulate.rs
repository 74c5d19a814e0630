//! Folding container specs into report rows and grand totals

use tracing::warn;

use crate::error::{ParseError, ReportWarning};
use crate::model::{AggregateTotals, ContainerRow, ContainerSpec, RequestedQuantity};
use crate::quantity::{self, Dimension};

/// Output of a finished accumulation pass
#[derive(Debug, Clone, Default)]
pub struct Accumulation {
    /// Accepted rows, in input order
    pub rows: Vec<ContainerRow>,
    pub totals: AggregateTotals,
    pub warnings: Vec<ReportWarning>,
}

/// Folds an ordered sequence of container specs into parsed rows and
/// elementwise grand totals.
///
/// Rows come out in input order. A container with no request for a dimension
/// contributes 0 and is still listed; a container with a malformed quantity
/// is dropped entirely with a recorded warning so one bad record cannot hide
/// the rest of the cluster's data.
#[derive(Debug, Default)]
pub struct ResourceAccumulator {
    rows: Vec<ContainerRow>,
    totals: AggregateTotals,
    warnings: Vec<ReportWarning>,
}

impl ResourceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one container spec and fold it into the running totals
    pub fn push(&mut self, spec: &ContainerSpec) {
        let cpu = match parse_request(spec.cpu_request.as_deref(), Dimension::Cpu) {
            Ok(value) => value,
            Err((value, err)) => {
                self.skip(spec, Dimension::Cpu, value, err);
                return;
            }
        };
        let memory = match parse_request(spec.memory_request.as_deref(), Dimension::Memory) {
            Ok(value) => value,
            Err((value, err)) => {
                self.skip(spec, Dimension::Memory, value, err);
                return;
            }
        };

        if let Some(request) = &cpu {
            self.totals.cpu_millicores += request.quantity.canonical;
        }
        if let Some(request) = &memory {
            self.totals.memory_bytes += request.quantity.canonical;
        }

        self.rows.push(ContainerRow {
            namespace: spec.namespace.clone(),
            pod_name: spec.pod_name.clone(),
            container_name: spec.container_name.clone(),
            node_name: spec.node_name.clone(),
            cpu,
            memory,
        });
    }

    pub fn finish(self) -> Accumulation {
        Accumulation {
            rows: self.rows,
            totals: self.totals,
            warnings: self.warnings,
        }
    }

    fn skip(&mut self, spec: &ContainerSpec, field: Dimension, value: String, err: ParseError) {
        warn!(
            container = %spec.full_name(),
            %field,
            value = %value,
            error = %err,
            "skipping container with malformed request"
        );
        self.warnings.push(ReportWarning::SkippedContainer {
            namespace: spec.namespace.clone(),
            pod_name: spec.pod_name.clone(),
            container_name: spec.container_name.clone(),
            field,
            value,
            reason: err.to_string(),
        });
    }
}

fn parse_request(
    raw: Option<&str>,
    dimension: Dimension,
) -> Result<Option<RequestedQuantity>, (String, ParseError)> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match quantity::parse(raw, dimension) {
        Ok(quantity) => Ok(Some(RequestedQuantity {
            raw: raw.to_string(),
            quantity,
        })),
        Err(err) => Err((raw.to_string(), err)),
    }
}
