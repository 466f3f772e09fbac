//! Renderer-agnostic network export
//!
//! Data-only projection for an external visualization collaborator: nodes
//! with size/color hints derived from influence and archetype, links with
//! color hints derived from relationship classification. Nothing here draws.

use serde::{Deserialize, Serialize};

use crate::model::{PersonalityArchetype, RelationshipKind};
use crate::network::graph::SocialGraph;

/// One exported node; rebuilt fresh every step, never the source of truth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub influence: f32,
    pub popularity: f32,
    pub degree: usize,
    pub betweenness: f32,
    pub eigenvector: f32,
    /// Cluster id from community detection, None for isolates
    pub cluster: Option<usize>,
    /// Render size hint derived from influence
    pub size: f32,
    /// Render color hint derived from personality archetype
    pub color: String,
}

/// One exported undirected link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub weight: f32,
    pub kind: RelationshipKind,
    /// Render color hint derived from the relationship classification
    pub color: String,
}

/// The full export payload: `{ nodes, links }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationExport {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkEdge>,
}

pub fn archetype_color(archetype: PersonalityArchetype) -> &'static str {
    match archetype {
        PersonalityArchetype::Socialite => "#f5a623",
        PersonalityArchetype::Enforcer => "#d0021b",
        PersonalityArchetype::Loyalist => "#4a90d9",
        PersonalityArchetype::Daredevil => "#bd10e0",
        PersonalityArchetype::Hustler => "#7ed321",
        PersonalityArchetype::Explorer => "#50e3c2",
        PersonalityArchetype::Strategist => "#9013fe",
        PersonalityArchetype::Balanced => "#9b9b9b",
    }
}

pub fn relationship_color(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Ally => "#2e7d32",
        RelationshipKind::Friend => "#7ed321",
        RelationshipKind::Acquaintance => "#9b9b9b",
        RelationshipKind::Stranger => "#d3d3d3",
        RelationshipKind::Rival => "#f5a623",
        RelationshipKind::Enemy => "#d0021b",
    }
}

/// Node size hint: base plus influence-proportional growth
fn node_size(influence: f32) -> f32 {
    8.0 + influence * 0.4
}

/// Assemble the export from the graph and the per-node analysis results
pub fn build_export(
    graph: &SocialGraph,
    betweenness: &[f32],
    eigenvector: &[f32],
    assignment: &[usize],
) -> VisualizationExport {
    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| NetworkNode {
            id: node.id.to_string(),
            name: node.name.clone(),
            influence: node.influence,
            popularity: node.popularity,
            degree: graph.degree(i),
            betweenness: betweenness.get(i).copied().unwrap_or(0.0),
            eigenvector: eigenvector.get(i).copied().unwrap_or(0.0),
            cluster: assignment
                .get(i)
                .copied()
                .filter(|&c| c != usize::MAX),
            size: node_size(node.influence),
            color: archetype_color(node.archetype).to_string(),
        })
        .collect();

    let links = graph
        .edges
        .iter()
        .map(|edge| NetworkEdge {
            source: graph.nodes[edge.a].id.to_string(),
            target: graph.nodes[edge.b].id.to_string(),
            weight: edge.weight,
            kind: edge.kind,
            color: relationship_color(edge.kind).to_string(),
        })
        .collect();

    VisualizationExport { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_size_grows_with_influence() {
        assert!(node_size(80.0) > node_size(10.0));
    }

    #[test]
    fn test_colors_distinguish_hostile_ties() {
        assert_ne!(
            relationship_color(RelationshipKind::Ally),
            relationship_color(RelationshipKind::Enemy)
        );
    }
}
