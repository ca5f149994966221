use std::cmp::Ordering;
use data_structure::DisjointSet;
use data_structure::graph::WeightedEdge;

/// Compute a minimum spanning tree (Kruskal) of an undirected graph whose nodes are `0..n_nodes`.
///
/// Edges are stably sorted by weight, so among edges of equal weight the one appearing first in
/// `edges` is preferred. If the graph is disconnected, a minimum spanning forest is returned.
/// Self-loops are ignored.
pub fn minimum_spanning_tree(n_nodes: usize, edges: &[WeightedEdge]) -> Vec<WeightedEdge> {
    let mut sorted_edges: Vec<&WeightedEdge> = edges.iter().collect();
    sorted_edges.sort_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal));

    let mut components = DisjointSet::new(n_nodes);
    let mut tree = Vec::with_capacity(n_nodes.saturating_sub(1));

    for edge in sorted_edges {
        if edge.source == edge.target {
            continue;
        }

        if components.union(edge.source, edge.target) {
            tree.push(*edge);
            if tree.len() + 1 == n_nodes {
                break;
            }
        }
    }

    tree
}
