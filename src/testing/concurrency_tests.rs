use super::utils::{assert_sorted, cluster_with_groups, init_tracing, node};
use crate::cluster::{Cluster, Group, NodeGroup};
use crate::config::ClusterConfig;
use crate::error::Error;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_add_node_same_group() {
    init_tracing();
    let (cluster, groups) = cluster_with_groups(1);
    let group = groups[0].clone();
    let n = 64;

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let cluster = cluster.clone();
            let group = group.clone();
            thread::spawn(move || cluster.add_node(Some(node(format!("n{}", i))), Some(&group)))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(group.node_count(), n);
    assert_eq!(cluster.node_count(), n);

    let ids: HashSet<_> = group.nodes().iter().map(|n| n.id().to_string()).collect();
    assert_eq!(ids.len(), n);
}

#[test]
fn test_concurrent_duplicate_add_single_winner() {
    let (cluster, groups) = cluster_with_groups(4);

    // Every thread races to add the same id into a different group.
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let cluster = cluster.clone();
            let group = groups[i % groups.len()].clone();
            thread::spawn(move || cluster.add_node(Some(node("contended")), Some(&group)))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == Error::DuplicateNode));
    assert_eq!(cluster.node_count(), 1);
}

#[test]
fn test_concurrent_add_node_group_stays_sorted() {
    let cluster: Arc<Cluster> = Arc::new(Cluster::new(ClusterConfig::new("sorted")));
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let cluster = cluster.clone();
        let done = done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                assert_sorted(&cluster.node_groups());
            }
        })
    };

    let writers: Vec<_> = (0..8)
        .map(|w| {
            let cluster = cluster.clone();
            thread::spawn(move || {
                for i in 0..25u32 {
                    // Interleave partition starts across writers.
                    let start = (i * 8 + w) * 7 % 200;
                    let group = Group::with_partition_start(format!("w{}-{}", w, i), start);
                    cluster.add_node_group(Arc::new(group)).unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);
    reader.join().unwrap();

    let groups = cluster.node_groups();
    assert_eq!(groups.len(), 200);
    assert_sorted(&groups);
}

#[test]
fn test_concurrent_add_and_remove_nodes() {
    let (cluster, groups) = cluster_with_groups(3);

    // Seed nodes that will be removed concurrently with new additions.
    for i in 0..30 {
        let group = &groups[i % groups.len()];
        cluster.add_node(Some(node(format!("old{}", i))), Some(group)).unwrap();
    }

    let removers: Vec<_> = (0..3)
        .map(|r| {
            let cluster = cluster.clone();
            thread::spawn(move || {
                for i in (r..30).step_by(3) {
                    cluster.remove_node(Some(&node(format!("old{}", i)))).unwrap();
                }
            })
        })
        .collect();

    let adders: Vec<_> = (0..3)
        .map(|a| {
            let cluster = cluster.clone();
            let group = groups[a].clone();
            thread::spawn(move || {
                for i in 0..10 {
                    cluster
                        .add_node(Some(node(format!("new{}-{}", a, i))), Some(&group))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in removers.into_iter().chain(adders) {
        handle.join().unwrap();
    }

    assert_eq!(cluster.node_count(), 30);
    for i in 0..30 {
        assert!(cluster.get_node(&format!("old{}", i)).is_none());
    }
    for group in &groups {
        assert_eq!(group.node_count(), 10);
    }
}

#[test]
fn test_concurrent_moves_keep_node_unique() {
    let (cluster, groups) = cluster_with_groups(4);
    for i in 0..8 {
        cluster
            .add_node(Some(node(format!("n{}", i))), Some(&groups[0]))
            .unwrap();
    }

    let movers: Vec<_> = (0..4)
        .map(|m| {
            let cluster = cluster.clone();
            let groups = groups.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    let target = &groups[(m + round) % groups.len()];
                    let node_id = format!("n{}", (m * 3 + round) % 8);
                    cluster.move_node(&node_id, Some(target)).unwrap();
                }
            })
        })
        .collect();

    for mover in movers {
        mover.join().unwrap();
    }

    // Every node still lives in exactly one group.
    assert_eq!(cluster.node_count(), 8);
    for i in 0..8 {
        let id = format!("n{}", i);
        let owners = groups.iter().filter(|g| g.get_node(&id).is_some()).count();
        assert_eq!(owners, 1, "node {} has {} owners", id, owners);
    }
}
