//! Cluster snapshot source backed by the Kubernetes API

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Pod};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kreq_core::{ContainerSpec, NodeSpec};
use kube::{api::ListParams, Api, Client};
use tracing::debug;

/// Label identifying control-plane nodes, which are excluded from capacity sums
const CONTROL_PLANE_LABEL: &str = "node-role.kubernetes.io/control-plane";

/// One best-effort snapshot of the cluster's requests and capacity.
///
/// The engine never re-fetches or retries; a failed list aborts the run.
#[async_trait]
pub trait SnapshotSource {
    /// Container resource requests, optionally filtered by namespace
    async fn container_requests(&self, namespace: Option<&str>) -> Result<Vec<ContainerSpec>>;

    /// Worker-node capacity and allocatable quantities
    async fn worker_nodes(&self) -> Result<Vec<NodeSpec>>;
}

/// Snapshot source backed by a live [`kube::Client`]
pub struct ClusterClient {
    client: Client,
}

impl ClusterClient {
    /// Connect using the ambient kubeconfig or in-cluster environment
    pub async fn new() -> Result<Self> {
        let client = Client::try_default()
            .await
            .context("Failed to create Kubernetes client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SnapshotSource for ClusterClient {
    async fn container_requests(&self, namespace: Option<&str>) -> Result<Vec<ContainerSpec>> {
        let api: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let pods = api
            .list(&ListParams::default())
            .await
            .context("Failed to list pods")?;
        debug!(pods = pods.items.len(), "fetched pod snapshot");

        let mut specs = Vec::new();
        for pod in pods.items {
            let pod_namespace = pod.metadata.namespace.clone().unwrap_or_default();
            let pod_name = pod.metadata.name.clone().unwrap_or_default();
            let Some(pod_spec) = pod.spec else { continue };
            let node_name = pod_spec.node_name.clone();

            for container in pod_spec.containers {
                let requests = container
                    .resources
                    .as_ref()
                    .and_then(|resources| resources.requests.as_ref());
                specs.push(ContainerSpec {
                    namespace: pod_namespace.clone(),
                    pod_name: pod_name.clone(),
                    container_name: container.name.clone(),
                    node_name: node_name.clone(),
                    cpu_request: requests
                        .and_then(|map| map.get("cpu"))
                        .map(|quantity| quantity.0.clone()),
                    memory_request: requests
                        .and_then(|map| map.get("memory"))
                        .map(|quantity| quantity.0.clone()),
                });
            }
        }

        // Stable display order regardless of API list order
        specs.sort_by(|a, b| a.full_name().cmp(&b.full_name()));
        Ok(specs)
    }

    async fn worker_nodes(&self) -> Result<Vec<NodeSpec>> {
        let api: Api<Node> = Api::all(self.client.clone());
        let nodes = api
            .list(&ListParams::default())
            .await
            .context("Failed to list nodes")?;
        debug!(nodes = nodes.items.len(), "fetched node snapshot");

        let mut specs = Vec::new();
        for node in nodes.items {
            let is_control_plane = node
                .metadata
                .labels
                .as_ref()
                .is_some_and(|labels| labels.contains_key(CONTROL_PLANE_LABEL));
            if is_control_plane {
                continue;
            }

            let name = node.metadata.name.clone().unwrap_or_default();
            let status = node.status.unwrap_or_default();
            let allocatable = status.allocatable.unwrap_or_default();
            let capacity = status.capacity.unwrap_or_default();

            specs.push(NodeSpec {
                name,
                cpu_allocatable: quantity_or_zero(&allocatable, "cpu"),
                memory_allocatable: quantity_or_zero(&allocatable, "memory"),
                cpu_capacity: quantity_or_zero(&capacity, "cpu"),
                memory_capacity: quantity_or_zero(&capacity, "memory"),
            });
        }

        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specs)
    }
}

/// Nodes without a reported quantity contribute nothing to the sums
fn quantity_or_zero(map: &BTreeMap<String, Quantity>, key: &str) -> String {
    map.get(key)
        .map(|quantity| quantity.0.clone())
        .unwrap_or_else(|| "0".to_string())
}
