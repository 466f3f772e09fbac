//! Structural network metrics: density, path length, clustering

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::config::NetworkConfig;
use crate::network::graph::SocialGraph;

/// Aggregate structural metrics for one analysis step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub node_count: usize,
    pub edge_count: usize,
    /// edges / possible edges
    pub density: f32,
    /// Sampled estimate; None when no sampled pair was reachable
    pub average_path_length: Option<f32>,
    /// Mean local clustering coefficient over nodes with degree >= 2
    pub clustering_coefficient: f32,
}

pub fn compute_metrics(
    graph: &SocialGraph,
    config: &NetworkConfig,
    rng: &mut ChaCha8Rng,
) -> NetworkMetrics {
    let n = graph.node_count();
    NetworkMetrics {
        node_count: n,
        edge_count: graph.edge_count(),
        density: density(graph),
        average_path_length: average_path_length(graph, config.path_length_samples, rng),
        clustering_coefficient: clustering_coefficient(graph),
    }
}

/// Fraction of possible edges present
pub fn density(graph: &SocialGraph) -> f32 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    let possible = n * (n - 1) / 2;
    graph.edge_count() as f32 / possible as f32
}

/// Average shortest-path length, estimated from random node pairs.
///
/// Unreachable pairs are excluded from the average. An all-pairs BFS would
/// be exact but the sampled estimate is what the analytics need.
pub fn average_path_length(
    graph: &SocialGraph,
    samples: usize,
    rng: &mut ChaCha8Rng,
) -> Option<f32> {
    let n = graph.node_count();
    if n < 2 {
        return None;
    }

    let mut total = 0u64;
    let mut reachable = 0u64;
    for _ in 0..samples {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a == b {
            continue;
        }
        if let Some(dist) = bfs_distance(graph, a, b) {
            total += dist as u64;
            reachable += 1;
        }
    }

    (reachable > 0).then(|| total as f32 / reachable as f32)
}

/// Unweighted BFS hop distance, None if unreachable
fn bfs_distance(graph: &SocialGraph, from: usize, to: usize) -> Option<usize> {
    if from == to {
        return Some(0);
    }
    let mut visited = vec![false; graph.node_count()];
    visited[from] = true;
    let mut queue = VecDeque::new();
    queue.push_back((from, 0usize));
    while let Some((node, dist)) = queue.pop_front() {
        for &(neighbor, _) in &graph.adjacency[node] {
            if neighbor == to {
                return Some(dist + 1);
            }
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back((neighbor, dist + 1));
            }
        }
    }
    None
}

/// Mean local clustering coefficient.
///
/// For each node with degree >= 2: closed triangles among its neighbors
/// divided by the maximum possible. Nodes below degree 2 are ineligible.
pub fn clustering_coefficient(graph: &SocialGraph) -> f32 {
    let mut total = 0.0f32;
    let mut eligible = 0usize;

    for node in 0..graph.node_count() {
        let neighbors: Vec<usize> = graph.adjacency[node].iter().map(|&(w, _)| w).collect();
        let k = neighbors.len();
        if k < 2 {
            continue;
        }
        eligible += 1;

        let mut closed = 0usize;
        for (i, &a) in neighbors.iter().enumerate() {
            for &b in &neighbors[i + 1..] {
                if graph.adjacency[a].iter().any(|&(w, _)| w == b) {
                    closed += 1;
                }
            }
        }
        total += closed as f32 / (k * (k - 1) / 2) as f32;
    }

    if eligible > 0 {
        total / eligible as f32
    } else {
        0.0
    }
}
