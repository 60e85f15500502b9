//! Kubernetes client for fetching pod status snapshots

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{ContainerStatus, Pod};
use kube::{
    api::{Api, ListParams},
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};
use restart_lib::{ContainerStatusSnapshot, ContainerTransition, PodStatusSnapshot};
use tracing::debug;

/// Client for listing pods
pub struct PodClient {
    client: Client,
}

impl PodClient {
    /// Create a new client.
    ///
    /// An explicit kubeconfig path or context reads the kubeconfig; with
    /// neither, the config is inferred (in-cluster, then `KUBECONFIG` or
    /// `~/.kube/config`).
    pub async fn new(
        kubeconfig: Option<&Path>,
        context: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let options = KubeConfigOptions {
            context: context.map(str::to_string),
            ..Default::default()
        };

        let mut config = match kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)
                    .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .context("Failed to read kubeconfig, exiting.")?
            }
            None if context.is_some() => Config::from_kubeconfig(&options)
                .await
                .context("Failed to read kubeconfig, exiting.")?,
            None => Config::infer()
                .await
                .context("Failed to infer Kubernetes config")?,
        };

        config.connect_timeout = Some(timeout);
        config.read_timeout = Some(timeout);

        debug!(cluster_url = %config.cluster_url, "Kubernetes config loaded");

        let client = Client::try_from(config).context("Failed to create API clientset")?;
        Ok(Self { client })
    }

    /// List pods in `namespace`, or across the cluster when `None`
    pub async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<Pod>> {
        let pods: Api<Pod> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let list = pods
            .list(&ListParams::default())
            .await
            .context("Failed to list pods")?;

        Ok(list.items)
    }

    /// Fetch and convert the current pod statuses
    pub async fn fetch_snapshot(&self, namespace: Option<&str>) -> Result<Vec<PodStatusSnapshot>> {
        let pods = self.list_pods(namespace).await?;
        let fetched_at = Utc::now();
        Ok(pods
            .into_iter()
            .map(|pod| snapshot_from_pod(pod, fetched_at))
            .collect())
    }
}

/// Convert an API pod into the snapshot the report engine consumes.
///
/// Pods without a start time fall back to their creation time, then to
/// `fetched_at`.
pub fn snapshot_from_pod(pod: Pod, fetched_at: DateTime<Utc>) -> PodStatusSnapshot {
    let metadata = pod.metadata;
    let status = pod.status.unwrap_or_default();

    let started_at = status
        .start_time
        .map(|t| t.0)
        .or_else(|| metadata.creation_timestamp.map(|t| t.0))
        .unwrap_or(fetched_at);

    PodStatusSnapshot {
        namespace: metadata.namespace.unwrap_or_else(|| "default".to_string()),
        name: metadata.name.unwrap_or_default(),
        started_at,
        containers: convert_statuses(status.container_statuses),
        init_containers: convert_statuses(status.init_container_statuses),
    }
}

fn convert_statuses(statuses: Option<Vec<ContainerStatus>>) -> Vec<ContainerStatusSnapshot> {
    statuses
        .unwrap_or_default()
        .into_iter()
        .map(|status| ContainerStatusSnapshot {
            last_transition: last_transition(&status),
            name: status.name,
            restart_count: status.restart_count.max(0),
        })
        .collect()
}

/// Terminated-at, else running-since, else the previous termination.
///
/// Crash-looping containers sit in `waiting` with the termination in
/// `last_state`. Reading it here means such a container is dated by its last
/// crash rather than by the pod start, which is what a container with no
/// transition at all falls back to.
fn last_transition(status: &ContainerStatus) -> Option<ContainerTransition> {
    let state = status.state.as_ref();

    if let Some(at) = state
        .and_then(|s| s.terminated.as_ref())
        .and_then(|t| t.finished_at.as_ref())
    {
        return Some(ContainerTransition::Terminated { at: at.0 });
    }

    if let Some(since) = state
        .and_then(|s| s.running.as_ref())
        .and_then(|r| r.started_at.as_ref())
    {
        return Some(ContainerTransition::Running { since: since.0 });
    }

    status
        .last_state
        .as_ref()
        .and_then(|s| s.terminated.as_ref())
        .and_then(|t| t.finished_at.as_ref())
        .map(|at| ContainerTransition::Terminated { at: at.0 })
}
