//! Error and warning types for the report engine

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::Dimension;

/// Failure to parse a single Kubernetes quantity string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty quantity string")]
    Empty,

    #[error("negative quantity {value:?}")]
    Negative { value: String },

    #[error("invalid mantissa in {value:?}")]
    InvalidMantissa { value: String },

    #[error("unknown suffix {suffix:?} in {value:?}")]
    UnknownSuffix { value: String, suffix: String },

    #[error("fractional value {value:?} not allowed with the millicore suffix")]
    FractionalWithSuffix { value: String },

    #[error("quantity {value:?} carries more precision than supported")]
    PrecisionTooFine { value: String },

    #[error("quantity {value:?} overflows the canonical unit")]
    Overflow { value: String },
}

/// A non-fatal problem recorded while building a report.
///
/// Warnings never abort the run; each one is attributable to a specific
/// entity so the CLI layer can surface it next to the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// A container was dropped because one of its request strings failed to parse
    SkippedContainer {
        namespace: String,
        pod_name: String,
        container_name: String,
        field: Dimension,
        value: String,
        reason: String,
    },
    /// A node was dropped because one of its status quantities failed to parse
    SkippedNode {
        node_name: String,
        field: Dimension,
        value: String,
        reason: String,
    },
    /// No containers matched the namespace filter
    EmptyInput,
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::SkippedContainer {
                namespace,
                pod_name,
                container_name,
                field,
                value,
                reason,
            } => write!(
                f,
                "skipped container {}/{}/{}: bad {} request {:?}: {}",
                namespace, pod_name, container_name, field, value, reason
            ),
            ReportWarning::SkippedNode {
                node_name,
                field,
                value,
                reason,
            } => write!(
                f,
                "skipped node {}: bad {} quantity {:?}: {}",
                node_name, field, value, reason
            ),
            ReportWarning::EmptyInput => write!(f, "no containers matched the filter"),
        }
    }
}
