//! Output formatting for the resource report

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use kreq_core::{ContainerRow, NodeReport, NodeRow, ReportModel, RequestedQuantity};
use tabled::{settings::Style, Table, Tabled};

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Resolve a config-file format name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Row for the container requests table
#[derive(Tabled)]
struct ContainerTableRow {
    #[tabled(rename = "NAMESPACE/POD/CONTAINER")]
    name: String,
    #[tabled(rename = "CPU (orig)")]
    cpu_orig: String,
    #[tabled(rename = "MEM (orig)")]
    mem_orig: String,
    #[tabled(rename = "CPU (m)")]
    cpu_millicores: String,
    #[tabled(rename = "MEM (MiB)")]
    mem_mebibytes: String,
}

/// Row for the wide container table, including the scheduled node
#[derive(Tabled)]
struct WideContainerTableRow {
    #[tabled(rename = "NAMESPACE/POD/CONTAINER")]
    name: String,
    #[tabled(rename = "NODE")]
    node: String,
    #[tabled(rename = "CPU (orig)")]
    cpu_orig: String,
    #[tabled(rename = "MEM (orig)")]
    mem_orig: String,
    #[tabled(rename = "CPU (m)")]
    cpu_millicores: String,
    #[tabled(rename = "MEM (MiB)")]
    mem_mebibytes: String,
}

/// Row for the node resources table
#[derive(Tabled)]
struct NodeTableRow {
    #[tabled(rename = "NODE")]
    name: String,
    #[tabled(rename = "ALLOC CPU (m)")]
    alloc_cpu: String,
    #[tabled(rename = "ALLOC MEM (MiB)")]
    alloc_mem: String,
    #[tabled(rename = "CAP CPU (m)")]
    cap_cpu: String,
    #[tabled(rename = "CAP MEM (MiB)")]
    cap_mem: String,
}

/// Render a report in the requested format
pub fn render(report: &ReportModel, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => print_report(report),
    }
    Ok(())
}

fn print_report(report: &ReportModel) {
    let title = match &report.namespace {
        Some(namespace) => format!("KUBERNETES RESOURCES REPORT (namespace: {})", namespace),
        None => "KUBERNETES RESOURCES REPORT".to_string(),
    };
    println!("{}", title.bold());

    if !report.rows.is_empty() {
        if report.nodes.is_some() {
            let rows: Vec<WideContainerTableRow> = report.rows.iter().map(wide_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        } else {
            let rows: Vec<ContainerTableRow> = report.rows.iter().map(narrow_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
    }

    if let Some(nodes) = &report.nodes {
        println!("\n{}", "NODE RESOURCES".bold());
        if nodes.rows.is_empty() {
            print_warning("No worker node resources found");
        } else {
            let rows: Vec<NodeTableRow> = nodes.rows.iter().map(node_row).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
    }

    print_summary(report);

    for warning in &report.warnings {
        print_warning(&warning.to_string());
    }
}

fn print_summary(report: &ReportModel) {
    println!("\n{}", "SUMMARY".bold());
    println!(
        "Total Container CPU Requests: {}m ({:.2} cores)",
        report.totals.cpu_millicores,
        report.totals.cores()
    );
    println!(
        "Total Container Memory Requests: {:.1}MiB ({:.2}GiB)",
        report.totals.mebibytes(),
        report.totals.gibibytes()
    );

    if let Some(nodes) = &report.nodes {
        print_node_totals(nodes);
    }

    if let Some(utilization) = &report.utilization {
        println!(
            "\nCPU Request Utilization: {} of allocatable",
            format_percent(utilization.cpu_percent)
        );
        println!(
            "Memory Request Utilization: {} of allocatable",
            format_percent(utilization.memory_percent)
        );
    }

    println!("\nContainers processed: {}", report.rows.len());
}

fn print_node_totals(nodes: &NodeReport) {
    println!("\nCluster Worker Node Resources:");
    println!(
        "Total Allocatable CPU: {}m ({:.2} cores)",
        nodes.allocatable.cpu_millicores,
        nodes.allocatable.cores()
    );
    println!(
        "Total Allocatable Memory: {:.1}MiB ({:.2}GiB)",
        nodes.allocatable.mebibytes(),
        nodes.allocatable.gibibytes()
    );
    println!(
        "Total Node Capacity CPU: {}m ({:.2} cores)",
        nodes.capacity.cpu_millicores,
        nodes.capacity.cores()
    );
    println!(
        "Total Node Capacity Memory: {:.1}MiB ({:.2}GiB)",
        nodes.capacity.mebibytes(),
        nodes.capacity.gibibytes()
    );
}

fn narrow_row(row: &ContainerRow) -> ContainerTableRow {
    ContainerTableRow {
        name: row.full_name(),
        cpu_orig: display_request(&row.cpu),
        mem_orig: display_request(&row.memory),
        cpu_millicores: format!("{}m", row.cpu_millicores()),
        mem_mebibytes: format!("{:.1}Mi", row.memory_mebibytes()),
    }
}

fn wide_row(row: &ContainerRow) -> WideContainerTableRow {
    WideContainerTableRow {
        name: row.full_name(),
        node: row.node_name.clone().unwrap_or_else(|| "-".to_string()),
        cpu_orig: display_request(&row.cpu),
        mem_orig: display_request(&row.memory),
        cpu_millicores: format!("{}m", row.cpu_millicores()),
        mem_mebibytes: format!("{:.1}Mi", row.memory_mebibytes()),
    }
}

fn node_row(row: &NodeRow) -> NodeTableRow {
    NodeTableRow {
        name: row.name.clone(),
        alloc_cpu: format!("{}m", row.cpu_allocatable.canonical),
        alloc_mem: format!("{:.1}Mi", row.memory_allocatable.mebibytes()),
        cap_cpu: format!("{}m", row.cpu_capacity.canonical),
        cap_mem: format!("{:.1}Mi", row.memory_capacity.mebibytes()),
    }
}

/// An unset request renders as a dash, distinct from an explicit zero
fn display_request(request: &Option<RequestedQuantity>) -> String {
    match request {
        Some(request) => request.raw.clone(),
        None => "-".to_string(),
    }
}

/// Color a utilization percentage by pressure; undefined renders as N/A
fn format_percent(value: Option<f64>) -> String {
    let Some(percent) = value else {
        return "N/A".yellow().to_string();
    };
    let formatted = format!("{:.2}%", percent);
    if percent >= 90.0 {
        formatted.red().to_string()
    } else if percent >= 70.0 {
        formatted.yellow().to_string()
    } else {
        formatted.green().to_string()
    }
}

/// Print a warning message to stderr
fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}
