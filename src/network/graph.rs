//! Frozen graph view of the relationship table
//!
//! Built once per analysis step from the profile store and the canonical
//! relationship table; index-based so the algorithm code never touches
//! string ids in its hot loops. This view is read-only by construction;
//! new interactions land in the live store for the next step.

use ahash::AHashMap;

use crate::core::config::NetworkConfig;
use crate::core::types::{AgentId, GangId, PairKey};
use crate::model::{
    AgentProfile, PersonalityArchetype, PersonalityTraits, Relationship, RelationshipKind,
};

/// Per-node payload carried into analysis
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: AgentId,
    pub name: String,
    pub personality: PersonalityTraits,
    pub archetype: PersonalityArchetype,
    pub influence: f32,
    pub popularity: f32,
    pub gang: Option<GangId>,
}

/// One undirected edge (indices into the node list)
#[derive(Debug, Clone, Copy)]
pub struct GraphEdge {
    pub a: usize,
    pub b: usize,
    /// |affinity| of the underlying relationship
    pub weight: f32,
    pub kind: RelationshipKind,
    /// Signed affinity, kept for cohesion calculations
    pub affinity: f32,
}

/// Undirected weighted social graph for one analysis step
#[derive(Debug, Clone)]
pub struct SocialGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// adjacency[i] = (neighbor index, weight) pairs
    pub adjacency: Vec<Vec<(usize, f32)>>,
    index: AHashMap<AgentId, usize>,
}

impl SocialGraph {
    /// Build the step view. Inactive agents and relationships below the
    /// edge-weight floor are excluded.
    pub fn build(
        profiles: &AHashMap<AgentId, AgentProfile>,
        relationships: &AHashMap<PairKey, Relationship>,
        config: &NetworkConfig,
    ) -> Self {
        let mut nodes: Vec<GraphNode> = profiles
            .values()
            .filter(|p| p.active)
            .map(|p| GraphNode {
                id: p.id.clone(),
                name: p.name.clone(),
                personality: p.personality,
                archetype: p.personality.archetype(),
                influence: p.influence,
                popularity: p.popularity,
                gang: p.gang.clone(),
            })
            .collect();
        // Deterministic node order regardless of hash-map iteration
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let index: AHashMap<AgentId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let mut edges = Vec::new();
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for rel in relationships.values() {
            let weight = rel.affinity.abs();
            if weight < config.min_edge_weight {
                continue;
            }
            let (Some(&a), Some(&b)) = (
                index.get(rel.key.first()),
                index.get(rel.key.second()),
            ) else {
                continue; // endpoint inactive
            };
            edges.push(GraphEdge {
                a,
                b,
                weight,
                kind: rel.kind,
                affinity: rel.affinity,
            });
            adjacency[a].push((b, weight));
            adjacency[b].push((a, weight));
        }
        // Same determinism for edge and neighbor order
        edges.sort_by(|x, y| (x.a, x.b).cmp(&(y.a, y.b)));
        for neighbors in &mut adjacency {
            neighbors.sort_by(|x, y| x.0.cmp(&y.0));
        }

        Self {
            nodes,
            edges,
            adjacency,
            index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    pub fn index_of(&self, id: &AgentId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Signed affinity between two nodes, if they share an edge
    pub fn affinity_between(&self, a: usize, b: usize) -> Option<f32> {
        self.edges
            .iter()
            .find(|e| (e.a == a && e.b == b) || (e.a == b && e.b == a))
            .map(|e| e.affinity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Relationship;

    fn profile(id: &str) -> AgentProfile {
        AgentProfile::new(
            AgentId::from(id),
            id.to_string(),
            PersonalityTraits::neutral(),
            None,
            0,
        )
    }

    fn store_with(
        ids: &[&str],
        links: &[(&str, &str, f32)],
    ) -> (
        AHashMap<AgentId, AgentProfile>,
        AHashMap<PairKey, Relationship>,
    ) {
        let mut profiles = AHashMap::new();
        for id in ids {
            profiles.insert(AgentId::from(*id), profile(id));
        }
        let mut relationships = AHashMap::new();
        for (a, b, affinity) in links {
            let key = PairKey::new(&AgentId::from(*a), &AgentId::from(*b));
            relationships.insert(
                key.clone(),
                Relationship::seeded(key, *affinity, RelationshipKind::Stranger),
            );
        }
        (profiles, relationships)
    }

    #[test]
    fn test_build_excludes_weak_edges() {
        let (profiles, relationships) = store_with(
            &["a", "b", "c"],
            &[("a", "b", 0.5), ("b", "c", 0.01)],
        );
        let graph = SocialGraph::build(&profiles, &relationships, &NetworkConfig::default());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_build_excludes_inactive_agents() {
        let (mut profiles, relationships) =
            store_with(&["a", "b"], &[("a", "b", 0.5)]);
        profiles.get_mut(&AgentId::from("b")).unwrap().active = false;
        let graph = SocialGraph::build(&profiles, &relationships, &NetworkConfig::default());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_negative_affinity_still_an_edge() {
        // Enmity is a tie too; weight is |affinity|
        let (profiles, relationships) = store_with(&["a", "b"], &[("a", "b", -0.8)]);
        let graph = SocialGraph::build(&profiles, &relationships, &NetworkConfig::default());
        assert_eq!(graph.edge_count(), 1);
        assert!((graph.edges[0].weight - 0.8).abs() < 1e-6);
        assert!((graph.edges[0].affinity + 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic_node_order() {
        let (profiles, relationships) =
            store_with(&["zed", "amy", "mia"], &[("zed", "amy", 0.4)]);
        let graph = SocialGraph::build(&profiles, &relationships, &NetworkConfig::default());
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["amy", "mia", "zed"]);
    }
}
