//! End-to-end pipeline tests for the report engine

use kreq_core::{ContainerSpec, NodeSpec, ReportBuilder, ReportConfig, ReportWarning};

fn container(
    namespace: &str,
    pod: &str,
    name: &str,
    cpu: Option<&str>,
    memory: Option<&str>,
) -> ContainerSpec {
    ContainerSpec {
        namespace: namespace.to_string(),
        pod_name: pod.to_string(),
        container_name: name.to_string(),
        node_name: Some("worker-1".to_string()),
        cpu_request: cpu.map(str::to_string),
        memory_request: memory.map(str::to_string),
    }
}

fn node(name: &str, alloc_cpu: &str, alloc_mem: &str, cap_cpu: &str, cap_mem: &str) -> NodeSpec {
    NodeSpec {
        name: name.to_string(),
        cpu_allocatable: alloc_cpu.to_string(),
        memory_allocatable: alloc_mem.to_string(),
        cpu_capacity: cap_cpu.to_string(),
        memory_capacity: cap_mem.to_string(),
    }
}

/// Two containers requesting 500m/128Mi and 100m/70Mi against a worker pool
/// with 8 cores / 16Gi allocatable.
#[test]
fn cluster_scenario_totals_and_utilization() {
    let containers = [
        container("default", "nginx-xyz", "nginx", Some("500m"), Some("128Mi")),
        container(
            "kube-system",
            "coredns-abc",
            "coredns",
            Some("100m"),
            Some("70Mi"),
        ),
    ];
    let nodes = [node("worker-1", "8", "16Gi", "8", "16Gi")];

    let builder = ReportBuilder::new(ReportConfig {
        namespace: None,
        wide: true,
    });
    let report = builder.build(&containers, &nodes);

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.totals.cpu_millicores, 600);
    assert_eq!(report.totals.cores(), 0.6);
    assert_eq!(report.totals.memory_bytes, 198 * 1024 * 1024);
    assert_eq!(report.totals.mebibytes(), 198.0);

    let nodes = report.nodes.expect("wide report carries node detail");
    assert_eq!(nodes.allocatable.cpu_millicores, 8000);
    assert_eq!(nodes.allocatable.mebibytes(), 16384.0);

    let utilization = report.utilization.expect("wide report carries utilization");
    assert_eq!(utilization.cpu_percent, Some(7.5));
    assert_eq!(utilization.memory_percent, Some(1.21));

    assert!(report.warnings.is_empty());
}

#[test]
fn narrow_report_skips_nodes_and_utilization() {
    let containers = [container("default", "a", "main", Some("250m"), Some("64Mi"))];
    let nodes = [node("worker-1", "8", "16Gi", "8", "16Gi")];

    let builder = ReportBuilder::new(ReportConfig {
        namespace: Some("default".to_string()),
        wide: false,
    });
    let report = builder.build(&containers, &nodes);

    assert!(report.nodes.is_none());
    assert!(report.utilization.is_none());
    assert_eq!(report.namespace.as_deref(), Some("default"));
    assert_eq!(report.totals.cpu_millicores, 250);
}

#[test]
fn empty_snapshot_yields_empty_input_warning() {
    let builder = ReportBuilder::new(ReportConfig::default());
    let report = builder.build(&[], &[]);

    assert!(report.rows.is_empty());
    assert_eq!(report.totals.cpu_millicores, 0);
    assert_eq!(report.totals.memory_bytes, 0);
    assert_eq!(report.warnings, vec![ReportWarning::EmptyInput]);
}

#[test]
fn zero_allocatable_reports_undefined_utilization() {
    let containers = [container("default", "a", "main", Some("250m"), Some("64Mi"))];

    let builder = ReportBuilder::new(ReportConfig {
        namespace: None,
        wide: true,
    });
    let report = builder.build(&containers, &[]);

    let utilization = report.utilization.expect("wide report carries utilization");
    assert_eq!(utilization.cpu_percent, None);
    assert_eq!(utilization.memory_percent, None);
}

#[test]
fn malformed_records_do_not_fail_the_report() {
    let containers = [
        container("default", "good", "main", Some("500m"), Some("128Mi")),
        container("default", "bad", "main", Some("half-a-core"), Some("128Mi")),
    ];
    let nodes = [
        node("worker-1", "8", "16Gi", "8", "16Gi"),
        node("worker-2", "8", "sixteen", "8", "16Gi"),
    ];

    let builder = ReportBuilder::new(ReportConfig {
        namespace: None,
        wide: true,
    });
    let report = builder.build(&containers, &nodes);

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.totals.cpu_millicores, 500);
    assert_eq!(report.nodes.as_ref().unwrap().rows.len(), 1);
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn report_serializes_for_json_output() {
    let containers = [container("default", "a", "main", Some("250m"), None)];

    let builder = ReportBuilder::new(ReportConfig {
        namespace: None,
        wide: false,
    });
    let report = builder.build(&containers, &[]);

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["totals"]["cpu_millicores"], 250);
    assert_eq!(value["rows"][0]["cpu"]["raw"], "250m");
    assert!(value["rows"][0]["memory"].is_null());
    // narrow reports omit the node section entirely
    assert!(value.get("nodes").is_none());
}
