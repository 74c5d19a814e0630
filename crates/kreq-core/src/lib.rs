//! Resource request normalization and aggregation engine
//!
//! This crate provides the core functionality for:
//! - Parsing Kubernetes quantity strings into canonical integer units
//! - Accumulating container requests into per-row values and grand totals
//! - Summing worker-node capacity and allocatable resources
//! - Deriving request-vs-allocatable utilization percentages
//! - Assembling the render-ready report model

pub mod accumulate;
pub mod error;
pub mod model;
pub mod nodes;
pub mod quantity;
pub mod report;
pub mod utilization;

pub use error::{ParseError, ReportWarning};
pub use model::*;
pub use quantity::{Dimension, Quantity};
pub use report::{ReportBuilder, ReportConfig};
