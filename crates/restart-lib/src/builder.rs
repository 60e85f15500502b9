//! Turns pod status snapshots into restart records

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::humanize::humanize_since;
use crate::models::{PodStatusSnapshot, RestartRecord};
use crate::threshold::Threshold;

/// Aggregation mode for one report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// One record per restarting container instead of one per pod.
    /// Container-detail reports ignore the threshold.
    pub detail_by_container: bool,
    pub threshold: Threshold,
}

/// Records contributed by a single pod.
///
/// `now` is the instant ages are measured against.
pub fn build_pod_records(
    pod: &PodStatusSnapshot,
    options: &BuildOptions,
    now: DateTime<Utc>,
) -> Vec<RestartRecord> {
    let total_restarts = pod.total_restarts();
    if total_restarts == 0 {
        return Vec::new();
    }

    if options.detail_by_container {
        return pod
            .all_containers()
            .filter(|c| c.restart_count > 0)
            .map(|c| {
                let reference_time = c.reference_time(pod.started_at);
                RestartRecord {
                    namespace: pod.namespace.clone(),
                    name: format!("{}/{}", pod.name, c.name),
                    restarts: c.restart_count,
                    reference_time,
                    age: humanize_since(reference_time, now),
                }
            })
            .collect();
    }

    if !options.threshold.admits(total_restarts) {
        trace!(
            namespace = %pod.namespace,
            pod = %pod.name,
            total_restarts,
            threshold = options.threshold.value(),
            "Pod below restart threshold"
        );
        return Vec::new();
    }

    vec![RestartRecord {
        namespace: pod.namespace.clone(),
        name: pod.name.clone(),
        restarts: total_restarts,
        reference_time: pod.started_at,
        age: humanize_since(pod.started_at, now),
    }]
}

/// Records for a whole snapshot, in snapshot order
pub fn build_records(
    pods: &[PodStatusSnapshot],
    options: &BuildOptions,
    now: DateTime<Utc>,
) -> Vec<RestartRecord> {
    pods.iter()
        .flat_map(|pod| build_pod_records(pod, options, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerStatusSnapshot, ContainerTransition};
    use chrono::Duration;

    fn container(name: &str, restarts: i32) -> ContainerStatusSnapshot {
        ContainerStatusSnapshot {
            name: name.to_string(),
            restart_count: restarts,
            last_transition: None,
        }
    }

    fn pod(
        name: &str,
        started_at: DateTime<Utc>,
        containers: Vec<ContainerStatusSnapshot>,
        init_containers: Vec<ContainerStatusSnapshot>,
    ) -> PodStatusSnapshot {
        PodStatusSnapshot {
            namespace: "default".to_string(),
            name: name.to_string(),
            started_at,
            containers,
            init_containers,
        }
    }

    #[test]
    fn test_aggregate_sums_containers_and_init_containers() {
        let now = Utc::now();
        let p = pod(
            "api-7d9f",
            now - Duration::hours(5),
            vec![container("app", 3), container("sidecar", 2)],
            vec![container("migrate", 4)],
        );

        let records = build_pod_records(&p, &BuildOptions::default(), now);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "api-7d9f");
        assert_eq!(records[0].restarts, 9);
        assert_eq!(records[0].reference_time, p.started_at);
        assert_eq!(records[0].age, "5h");
    }

    #[test]
    fn test_zero_restarts_produce_nothing_in_either_mode() {
        let now = Utc::now();
        let p = pod(
            "quiet",
            now,
            vec![container("app", 0)],
            vec![container("init", 0)],
        );

        assert!(build_pod_records(&p, &BuildOptions::default(), now).is_empty());
        let detail = BuildOptions {
            detail_by_container: true,
            ..Default::default()
        };
        assert!(build_pod_records(&p, &detail, now).is_empty());
    }

    #[test]
    fn test_container_detail_emits_only_restarting_containers() {
        let now = Utc::now();
        let p = pod(
            "worker",
            now - Duration::days(4),
            vec![container("app", 3), container("proxy", 0)],
            vec![container("setup", 1)],
        );
        let options = BuildOptions {
            detail_by_container: true,
            ..Default::default()
        };

        let records = build_pod_records(&p, &options, now);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["worker/app", "worker/setup"]);
        assert!(records.iter().all(|r| r.name != "worker"));
    }

    #[test]
    fn test_container_detail_ignores_threshold() {
        let now = Utc::now();
        let p = pod("worker", now, vec![container("app", 1)], vec![]);
        let options = BuildOptions {
            detail_by_container: true,
            threshold: Threshold::new(100).unwrap(),
        };

        let records = build_pod_records(&p, &options, now);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].restarts, 1);
    }

    #[test]
    fn test_container_reference_time_precedence() {
        let now = Utc::now();
        let pod_start = now - Duration::days(10);
        let terminated_at = now - Duration::minutes(30);
        let running_since = now - Duration::seconds(90);

        let p = pod(
            "db",
            pod_start,
            vec![
                ContainerStatusSnapshot {
                    name: "crashing".to_string(),
                    restart_count: 7,
                    last_transition: Some(ContainerTransition::Terminated { at: terminated_at }),
                },
                ContainerStatusSnapshot {
                    name: "recovered".to_string(),
                    restart_count: 2,
                    last_transition: Some(ContainerTransition::Running {
                        since: running_since,
                    }),
                },
                container("unknown", 1),
            ],
            vec![],
        );
        let options = BuildOptions {
            detail_by_container: true,
            ..Default::default()
        };

        let records = build_pod_records(&p, &options, now);
        assert_eq!(records[0].reference_time, terminated_at);
        assert_eq!(records[0].age, "30m");
        assert_eq!(records[1].reference_time, running_since);
        assert_eq!(records[1].age, "90s");
        assert_eq!(records[2].reference_time, pod_start);
        assert_eq!(records[2].age, "10d");
    }

    #[test]
    fn test_threshold_applies_to_pod_total() {
        let now = Utc::now();
        let options = BuildOptions {
            detail_by_container: false,
            threshold: Threshold::new(5).unwrap(),
        };
        let at_threshold = pod("five", now, vec![container("a", 2), container("b", 3)], vec![]);
        let above = pod("six", now, vec![container("a", 3)], vec![container("i", 3)]);

        assert!(build_pod_records(&at_threshold, &options, now).is_empty());
        assert_eq!(build_pod_records(&above, &options, now)[0].restarts, 6);
    }

    #[test]
    fn test_build_records_keeps_snapshot_order() {
        let now = Utc::now();
        let pods = vec![
            pod("b", now, vec![container("app", 1)], vec![]),
            pod("skip", now, vec![container("app", 0)], vec![]),
            pod("a", now, vec![container("app", 2)], vec![]),
        ];

        let records = build_records(&pods, &BuildOptions::default(), now);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
