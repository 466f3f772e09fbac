//! Friendship network analysis
//!
//! Builds an undirected weighted graph from the canonical relationship
//! table (one edge per relationship, weight = |affinity|) and computes
//! centralities, communities, and structural metrics over it. Everything
//! operates on a frozen per-step snapshot; the live store keeps mutating
//! for the next step.

pub mod centrality;
pub mod community;
pub mod export;
pub mod graph;
pub mod metrics;

pub use community::{ClusterType, CommunityPartition, SocialCluster};
pub use export::{NetworkEdge, NetworkNode, VisualizationExport};
pub use graph::SocialGraph;
pub use metrics::NetworkMetrics;

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::NetworkConfig;
use crate::core::types::{AgentId, PairKey};
use crate::model::{AgentProfile, Relationship};

/// Full result of one network analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkAnalysis {
    pub metrics: NetworkMetrics,
    pub clusters: Vec<SocialCluster>,
    pub isolates: Vec<AgentId>,
    pub visualization: VisualizationExport,
}

impl NetworkAnalysis {
    /// Agents ranked by eigenvector centrality, highest first
    pub fn top_influencers(&self, count: usize) -> Vec<AgentId> {
        let mut ranked: Vec<&NetworkNode> = self.visualization.nodes.iter().collect();
        ranked.sort_by_key(|n| std::cmp::Reverse(OrderedFloat(n.eigenvector)));
        ranked
            .into_iter()
            .take(count)
            .map(|n| AgentId::from(n.id.as_str()))
            .collect()
    }

    /// Agents ranked by betweenness (the network's brokers), highest first
    pub fn top_brokers(&self, count: usize) -> Vec<AgentId> {
        let mut ranked: Vec<&NetworkNode> = self.visualization.nodes.iter().collect();
        ranked.sort_by_key(|n| std::cmp::Reverse(OrderedFloat(n.betweenness)));
        ranked
            .into_iter()
            .take(count)
            .map(|n| AgentId::from(n.id.as_str()))
            .collect()
    }

    pub fn cluster_of(&self, id: &AgentId) -> Option<&SocialCluster> {
        self.clusters
            .iter()
            .find(|c| c.members.iter().any(|m| m == id))
    }
}

/// Run the full analysis pipeline against a frozen view of the store
pub fn analyze(
    profiles: &AHashMap<AgentId, AgentProfile>,
    relationships: &AHashMap<PairKey, Relationship>,
    config: &NetworkConfig,
    rng: &mut ChaCha8Rng,
) -> NetworkAnalysis {
    let graph = SocialGraph::build(profiles, relationships, config);
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "network analysis pass"
    );

    let betweenness = centrality::betweenness(&graph);
    let eigenvector = centrality::eigenvector(&graph, config);
    let partition = community::detect_communities(&graph, config, rng);
    let metrics = metrics::compute_metrics(&graph, config, rng);
    let visualization =
        export::build_export(&graph, &betweenness, &eigenvector, &partition.assignment);

    NetworkAnalysis {
        metrics,
        clusters: partition.clusters,
        isolates: partition.isolates,
        visualization,
    }
}
