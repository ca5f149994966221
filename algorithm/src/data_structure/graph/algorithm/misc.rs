use fnv::FnvHashMap;
use data_structure::DisjointSet;

/// Check if `edges` form a single tree spanning exactly `nodes`: every edge joins two of `nodes`,
/// the edges contain no cycle and connect all of `nodes`. An empty node set is a tree only when
/// there are no edges.
pub fn is_tree(nodes: &[usize], edges: &[(usize, usize)]) -> bool {
    if nodes.is_empty() {
        return edges.is_empty();
    }

    let index: FnvHashMap<usize, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    if index.len() != nodes.len() || edges.len() + 1 != nodes.len() {
        return false;
    }

    let mut components = DisjointSet::new(nodes.len());
    for &(source, target) in edges {
        match (index.get(&source), index.get(&target)) {
            (Some(&i), Some(&j)) => {
                if !components.union(i, j) {
                    // cycle
                    return false;
                }
            },
            _ => return false
        }
    }

    components.n_components() == 1
}
