//! Kubernetes Resource Request Reporter CLI
//!
//! A command-line tool that reports the CPU and memory requests declared by
//! workloads and, with `--wide`, compares them against worker-node capacity.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Kubernetes Resource Request Reporter
#[derive(Parser)]
#[command(name = "kreq")]
#[command(author, version, about = "Report container resource requests against node capacity", long_about = None)]
pub struct Cli {
    /// Filter pods by specific namespace (all namespaces if not set)
    #[arg(long, short, env = "KREQ_NAMESPACE")]
    pub namespace: Option<String>,

    /// Show wide output including node resources and utilization
    #[arg(long)]
    pub wide: bool,

    /// Output format (defaults to table, or the config-file default)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never corrupt the report on stdout
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Explicit flags win over config-file defaults
    let file_config = config::Config::load().unwrap_or_default();
    let namespace = cli.namespace.or(file_config.default_namespace);
    let format = cli
        .format
        .or_else(|| {
            file_config
                .default_format
                .as_deref()
                .and_then(output::OutputFormat::from_name)
        })
        .unwrap_or_default();

    let source = client::ClusterClient::new().await?;
    commands::report::run(&source, namespace, cli.wide, format).await
}
