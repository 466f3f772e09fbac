//! Centrality measures: betweenness (Brandes) and eigenvector (power iteration)

use rayon::prelude::*;
use std::collections::VecDeque;

use crate::core::config::NetworkConfig;
use crate::network::graph::SocialGraph;

/// Betweenness centrality via Brandes' algorithm over the unweighted
/// adjacency, normalized by (n-1)(n-2).
///
/// Each per-source pass only reads the frozen graph, so the sources fan out
/// across the rayon pool and the partial scores are summed afterwards.
/// Deterministic for a fixed graph.
pub fn betweenness(graph: &SocialGraph) -> Vec<f32> {
    let n = graph.node_count();
    if n < 3 {
        return vec![0.0; n];
    }

    let scores = (0..n)
        .into_par_iter()
        .map(|source| brandes_pass(graph, source))
        .reduce(
            || vec![0.0f64; n],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(partial) {
                    *a += p;
                }
                acc
            },
        );

    let norm = ((n - 1) * (n - 2)) as f64;
    scores.into_iter().map(|s| (s / norm) as f32).collect()
}

/// One Brandes source pass: BFS shortest-path counts, then dependency
/// accumulation in reverse finish order.
fn brandes_pass(graph: &SocialGraph, source: usize) -> Vec<f64> {
    let n = graph.node_count();
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];

    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &(w, _) in &graph.adjacency[v] {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    let mut scores = vec![0.0f64; n];
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            scores[w] += delta[w];
        }
    }
    scores
}

/// Eigenvector centrality via power iteration over the weighted adjacency.
///
/// Iterates on the shifted matrix A + I: each round adds the node's own
/// previous value to the neighbor sum, which keeps the iteration from
/// oscillating with period 2 on bipartite components (stars, even cycles)
/// without changing the eigenvector ordering. Starts from a uniform vector,
/// L2-normalizes each iterate, and stops once the largest per-coordinate
/// change drops under the tolerance or the iteration cap is hit. Hitting
/// the cap is not an error; the last iterate is returned as a documented
/// approximation.
pub fn eigenvector(graph: &SocialGraph, config: &NetworkConfig) -> Vec<f32> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut current = vec![1.0f64 / n as f64; n];
    for _ in 0..config.eigenvector_max_iterations {
        let mut next = current.clone();
        for (v, row) in graph.adjacency.iter().enumerate() {
            for &(w, weight) in row {
                next[v] += weight as f64 * current[w];
            }
        }

        // next carries current forward, so the norm stays strictly positive
        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        for x in &mut next {
            *x /= norm;
        }

        let max_change = current
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        current = next;
        if max_change < config.eigenvector_tolerance as f64 {
            break;
        }
    }

    current.into_iter().map(|x| x as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentId, PairKey};
    use crate::model::{AgentProfile, PersonalityTraits, Relationship, RelationshipKind};
    use ahash::AHashMap;

    fn path_graph(ids: &[&str], weight: f32) -> SocialGraph {
        let mut profiles = AHashMap::new();
        for id in ids {
            profiles.insert(
                AgentId::from(*id),
                AgentProfile::new(
                    AgentId::from(*id),
                    id.to_string(),
                    PersonalityTraits::neutral(),
                    None,
                    0,
                ),
            );
        }
        let mut relationships = AHashMap::new();
        for pair in ids.windows(2) {
            let key = PairKey::new(&AgentId::from(pair[0]), &AgentId::from(pair[1]));
            relationships.insert(
                key.clone(),
                Relationship::seeded(key, weight, RelationshipKind::Friend),
            );
        }
        SocialGraph::build(&profiles, &relationships, &NetworkConfig::default())
    }

    #[test]
    fn test_betweenness_middle_of_path_dominates() {
        // a - b - c: all shortest paths between the ends pass through b
        let graph = path_graph(&["a", "b", "c"], 0.8);
        let scores = betweenness(&graph);
        let b = graph.index_of(&AgentId::from("b")).unwrap();
        let a = graph.index_of(&AgentId::from("a")).unwrap();
        assert!(scores[b] > scores[a]);
        assert!(scores.iter().all(|s| *s >= 0.0));
        assert!(scores[b] > 0.0);
    }

    #[test]
    fn test_betweenness_trivial_graphs_are_zero() {
        let graph = path_graph(&["a", "b"], 0.8);
        assert!(betweenness(&graph).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_eigenvector_favors_the_hub() {
        // Star: hub connected to three leaves
        let mut profiles = AHashMap::new();
        for id in ["hub", "l1", "l2", "l3"] {
            profiles.insert(
                AgentId::from(id),
                AgentProfile::new(
                    AgentId::from(id),
                    id.to_string(),
                    PersonalityTraits::neutral(),
                    None,
                    0,
                ),
            );
        }
        let mut relationships = AHashMap::new();
        for leaf in ["l1", "l2", "l3"] {
            let key = PairKey::new(&AgentId::from("hub"), &AgentId::from(leaf));
            relationships.insert(
                key.clone(),
                Relationship::seeded(key, 0.7, RelationshipKind::Friend),
            );
        }
        let config = NetworkConfig::default();
        let graph = SocialGraph::build(&profiles, &relationships, &config);
        let scores = eigenvector(&graph, &config);
        let hub = graph.index_of(&AgentId::from("hub")).unwrap();
        for leaf in ["l1", "l2", "l3"] {
            let idx = graph.index_of(&AgentId::from(leaf)).unwrap();
            assert!(scores[hub] > scores[idx]);
        }
    }

    #[test]
    fn test_eigenvector_settles_on_bipartite_graphs() {
        // A path is bipartite; without the A + I shift the iterates flip
        // with period 2 and never meet the tolerance
        let config = NetworkConfig::default();
        let graph = path_graph(&["a", "b", "c", "d"], 0.8);
        let scores = eigenvector(&graph, &config);
        let idx = |id: &str| graph.index_of(&AgentId::from(id)).unwrap();
        assert!(scores[idx("b")] > scores[idx("a")]);
        assert!(scores[idx("c")] > scores[idx("d")]);
        // A settled vector respects the path's mirror symmetry
        assert!((scores[idx("a")] - scores[idx("d")]).abs() < 1e-3);
        assert!((scores[idx("b")] - scores[idx("c")]).abs() < 1e-3);
    }

    #[test]
    fn test_eigenvector_empty_graph() {
        let profiles = AHashMap::new();
        let relationships = AHashMap::new();
        let config = NetworkConfig::default();
        let graph = SocialGraph::build(&profiles, &relationships, &config);
        assert!(eigenvector(&graph, &config).is_empty());
    }
}
