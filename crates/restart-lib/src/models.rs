//! Core data models for restart reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time status of one pod, as fetched from the cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodStatusSnapshot {
    pub namespace: String,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub containers: Vec<ContainerStatusSnapshot>,
    pub init_containers: Vec<ContainerStatusSnapshot>,
}

impl PodStatusSnapshot {
    /// Sum of restarts across regular and init containers
    pub fn total_restarts(&self) -> i32 {
        self.all_containers()
            .fold(0i32, |acc, c| acc.saturating_add(c.restart_count))
    }

    /// Regular containers followed by init containers, in snapshot order
    pub fn all_containers(&self) -> impl Iterator<Item = &ContainerStatusSnapshot> {
        self.containers.iter().chain(self.init_containers.iter())
    }
}

/// Status of a single container within a pod
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerStatusSnapshot {
    pub name: String,
    pub restart_count: i32,
    pub last_transition: Option<ContainerTransition>,
}

impl ContainerStatusSnapshot {
    /// Timestamp this container's restarts are reported against
    pub fn reference_time(&self, pod_started_at: DateTime<Utc>) -> DateTime<Utc> {
        match self.last_transition {
            Some(ContainerTransition::Terminated { at }) => at,
            Some(ContainerTransition::Running { since }) => since,
            None => pod_started_at,
        }
    }
}

/// Most recent lifecycle transition of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ContainerTransition {
    Running { since: DateTime<Utc> },
    Terminated { at: DateTime<Utc> },
}

/// One row of the restart report.
///
/// Always carries a positive restart count; zero-restart pods and
/// containers never produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartRecord {
    pub namespace: String,
    pub name: String,
    pub restarts: i32,
    pub reference_time: DateTime<Utc>,
    pub age: String,
}
