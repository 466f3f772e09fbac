//! Community detection via synchronous label propagation

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::NetworkConfig;
use crate::core::types::AgentId;
use crate::model::{PersonalityArchetype, PersonalityTraits};
use crate::network::graph::SocialGraph;

/// Rough character of a detected cluster, inferred from its trait center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterType {
    Combat,
    Social,
    Economic,
    Criminal,
    Mixed,
}

/// A detected community of size >= 2
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialCluster {
    pub id: usize,
    pub members: Vec<AgentId>,
    /// Per-axis mean of member personalities
    pub center: PersonalityTraits,
    /// Modal archetype among members
    pub dominant_archetype: PersonalityArchetype,
    /// Mean |affinity| over intra-cluster edges
    pub cohesion: f32,
    pub average_influence: f32,
    pub cluster_type: ClusterType,
}

/// Outcome of one community-detection pass
#[derive(Debug, Clone, Default)]
pub struct CommunityPartition {
    pub clusters: Vec<SocialCluster>,
    /// Nodes whose label group ended up a singleton; reported, not clustered
    pub isolates: Vec<AgentId>,
    /// cluster id per node index (usize::MAX for isolates)
    pub assignment: Vec<usize>,
}

/// Label propagation: every node starts with a unique label; each round the
/// nodes (visited in shuffled order) adopt the neighbor label with the
/// greatest total incident edge weight, ties keeping the current label.
/// Stops on a fixed round without changes or at the round cap; hitting the
/// cap just returns the current partition.
pub fn detect_communities(
    graph: &SocialGraph,
    config: &NetworkConfig,
    rng: &mut ChaCha8Rng,
) -> CommunityPartition {
    let n = graph.node_count();
    if n == 0 {
        return CommunityPartition::default();
    }

    let mut labels: Vec<usize> = (0..n).collect();
    let mut order: Vec<usize> = (0..n).collect();

    for _ in 0..config.label_propagation_max_rounds {
        order.shuffle(rng);
        let mut changed = false;

        for &node in &order {
            if graph.adjacency[node].is_empty() {
                continue;
            }
            let mut weight_per_label: AHashMap<usize, f32> = AHashMap::new();
            for &(neighbor, weight) in &graph.adjacency[node] {
                *weight_per_label.entry(labels[neighbor]).or_insert(0.0) += weight;
            }

            let current = labels[node];
            let current_weight = weight_per_label.get(&current).copied().unwrap_or(0.0);
            // Deterministic winner: heaviest label, smallest label id on ties
            let (best, best_weight) = weight_per_label
                .iter()
                .map(|(&label, &weight)| (label, weight))
                .min_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.0.cmp(&b.0))
                })
                .unwrap_or((current, current_weight));

            // Strict improvement only: ties keep the current label
            if best != current && best_weight > current_weight {
                labels[node] = best;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    partition_from_labels(graph, &labels)
}

fn partition_from_labels(graph: &SocialGraph, labels: &[usize]) -> CommunityPartition {
    let mut groups: AHashMap<usize, Vec<usize>> = AHashMap::new();
    for (node, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(node);
    }

    let mut groups: Vec<Vec<usize>> = groups.into_values().collect();
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));

    let mut clusters = Vec::new();
    let mut isolates = Vec::new();
    let mut assignment = vec![usize::MAX; graph.node_count()];

    for members in groups {
        if members.len() < 2 {
            isolates.push(graph.nodes[members[0]].id.clone());
            continue;
        }
        let id = clusters.len();
        for &node in &members {
            assignment[node] = id;
        }
        clusters.push(build_cluster(graph, id, &members));
    }

    CommunityPartition {
        clusters,
        isolates,
        assignment,
    }
}

fn build_cluster(graph: &SocialGraph, id: usize, members: &[usize]) -> SocialCluster {
    let traits: Vec<PersonalityTraits> =
        members.iter().map(|&m| graph.nodes[m].personality).collect();
    let center = PersonalityTraits::mean_of(&traits);

    // Modal archetype among members
    let mut counts: AHashMap<PersonalityArchetype, usize> = AHashMap::new();
    for &m in members {
        *counts.entry(graph.nodes[m].archetype).or_insert(0) += 1;
    }
    let dominant_archetype = counts
        .into_iter()
        .max_by_key(|(_, c)| *c)
        .map(|(a, _)| a)
        .unwrap_or(PersonalityArchetype::Balanced);

    let member_set: ahash::AHashSet<usize> = members.iter().copied().collect();
    let mut cohesion_sum = 0.0;
    let mut cohesion_edges = 0usize;
    for edge in &graph.edges {
        if member_set.contains(&edge.a) && member_set.contains(&edge.b) {
            cohesion_sum += edge.weight;
            cohesion_edges += 1;
        }
    }
    let cohesion = if cohesion_edges > 0 {
        cohesion_sum / cohesion_edges as f32
    } else {
        0.0
    };

    let average_influence =
        members.iter().map(|&m| graph.nodes[m].influence).sum::<f32>() / members.len() as f32;

    SocialCluster {
        id,
        members: members.iter().map(|&m| graph.nodes[m].id.clone()).collect(),
        center,
        dominant_archetype,
        cohesion,
        average_influence,
        cluster_type: infer_cluster_type(&center),
    }
}

/// Infer a cluster's character from its trait center of mass.
///
/// Checked most-specific first: a reckless, disloyal, aggressive center is
/// criminal even though it would also pass the combat check.
fn infer_cluster_type(center: &PersonalityTraits) -> ClusterType {
    if center.risk_tolerance > 0.6 && center.aggression > 0.5 && center.loyalty < 0.4 {
        ClusterType::Criminal
    } else if center.aggression > 0.6 {
        ClusterType::Combat
    } else if center.greed > 0.6 {
        ClusterType::Economic
    } else if center.sociability > 0.6 {
        ClusterType::Social
    } else {
        ClusterType::Mixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PairKey;
    use crate::model::{AgentProfile, Relationship, RelationshipKind};
    use rand::SeedableRng;

    fn two_camps_graph() -> SocialGraph {
        // Two dense subgraphs with no edges between them
        let camps = [["a1", "a2", "a3"], ["b1", "b2", "b3"]];
        let mut profiles = AHashMap::new();
        let mut relationships = AHashMap::new();
        for camp in &camps {
            for id in camp {
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
            for i in 0..camp.len() {
                for j in (i + 1)..camp.len() {
                    let key = PairKey::new(&AgentId::from(camp[i]), &AgentId::from(camp[j]));
                    relationships.insert(
                        key.clone(),
                        Relationship::seeded(key, 0.9, RelationshipKind::Ally),
                    );
                }
            }
        }
        SocialGraph::build(&profiles, &relationships, &NetworkConfig::default())
    }

    #[test]
    fn test_disjoint_camps_split_into_two_clusters() {
        let graph = two_camps_graph();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let partition = detect_communities(&graph, &NetworkConfig::default(), &mut rng);

        assert_eq!(partition.clusters.len(), 2);
        for cluster in &partition.clusters {
            let prefixes: ahash::AHashSet<char> = cluster
                .members
                .iter()
                .filter_map(|m| m.as_str().chars().next())
                .collect();
            assert_eq!(prefixes.len(), 1, "cluster mixes the two camps");
            assert_eq!(cluster.members.len(), 3);
        }
        assert!(partition.isolates.is_empty());
    }

    #[test]
    fn test_singletons_are_isolates_not_clusters() {
        let mut profiles = AHashMap::new();
        profiles.insert(
            AgentId::from("loner"),
            AgentProfile::new(
                AgentId::from("loner"),
                "loner".to_string(),
                PersonalityTraits::neutral(),
                None,
                0,
            ),
        );
        let relationships = AHashMap::new();
        let config = NetworkConfig::default();
        let graph = SocialGraph::build(&profiles, &relationships, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let partition = detect_communities(&graph, &config, &mut rng);
        assert!(partition.clusters.is_empty());
        assert_eq!(partition.isolates, vec![AgentId::from("loner")]);
    }

    #[test]
    fn test_cluster_type_inference() {
        let criminal = PersonalityTraits::new(0.4, 0.7, 0.2, 0.8, 0.5, 0.5, 0.3);
        assert_eq!(infer_cluster_type(&criminal), ClusterType::Criminal);

        let combat = PersonalityTraits::new(0.4, 0.8, 0.8, 0.4, 0.3, 0.5, 0.3);
        assert_eq!(infer_cluster_type(&combat), ClusterType::Combat);

        let economic = PersonalityTraits::new(0.4, 0.2, 0.5, 0.4, 0.8, 0.5, 0.5);
        assert_eq!(infer_cluster_type(&economic), ClusterType::Economic);

        let social = PersonalityTraits::new(0.9, 0.2, 0.5, 0.4, 0.2, 0.5, 0.5);
        assert_eq!(infer_cluster_type(&social), ClusterType::Social);

        assert_eq!(
            infer_cluster_type(&PersonalityTraits::neutral()),
            ClusterType::Mixed
        );
    }

    #[test]
    fn test_cohesion_reflects_edge_weights() {
        let graph = two_camps_graph();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let partition = detect_communities(&graph, &NetworkConfig::default(), &mut rng);
        for cluster in &partition.clusters {
            assert!((cluster.cohesion - 0.9).abs() < 1e-6);
        }
    }
}
