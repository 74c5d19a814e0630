//! The report command: fetch one cluster snapshot and render it

use anyhow::Result;
use kreq_core::{ReportBuilder, ReportConfig};

use crate::client::SnapshotSource;
use crate::output::{self, OutputFormat};

/// Fetch one snapshot, build the report model, and render it.
///
/// Node data is only fetched when wide output is requested.
pub async fn run(
    source: &dyn SnapshotSource,
    namespace: Option<String>,
    wide: bool,
    format: OutputFormat,
) -> Result<()> {
    let containers = source.container_requests(namespace.as_deref()).await?;
    let nodes = if wide {
        source.worker_nodes().await?
    } else {
        Vec::new()
    };

    let builder = ReportBuilder::new(ReportConfig { namespace, wide });
    let report = builder.build(&containers, &nodes);

    output::render(&report, format)
}
