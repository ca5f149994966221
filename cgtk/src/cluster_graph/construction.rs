//! Steps that turn a list of factors into the clusters and sepsets of a cluster graph.
//!
//! Sepsets are computed twice. The non-RIP sepsets are the plain scope intersections of every
//! cluster pair. The running intersection sepsets keep, for every variable, only the edges of a
//! minimum spanning tree over the clusters sharing that variable, so that the clusters containing a
//! variable are connected by exactly one path.

use std::collections::BTreeMap;
use fnv::{FnvHashMap, FnvHashSet};
use algorithm::prelude::{UniqueArray, WeightedEdge, minimum_spanning_tree};
use factors::{Factor, Evidence, reduce_by_evidence, scope_set, is_strict_subset};

/// Sepsets keyed by cluster index pair `(i, j)` with `i < j`
pub type Sepsets = BTreeMap<(usize, usize), Vec<String>>;

/// Observe the relevant evidence in each factor, keeping the factor labels
pub fn evidence_reduce_factors<L, F: Factor>(factors: Vec<(L, F)>, evidence: &Evidence<F::Value>) -> Vec<(L, F)> {
    factors.into_iter()
        .map(|(label, factor)| {
            let reduced = reduce_by_evidence(&factor, evidence);
            (label, reduced)
        })
        .collect()
}

/// Multiply every factor whose scope is a strict subset of another factor's scope into that factor.
///
/// Factors are visited in order and each is absorbed into the first remaining factor that strictly
/// contains its scope. Absorption never changes a scope, so after one pass no remaining scope is a
/// strict subset of another. Every input factor ends up in exactly one output factor; output
/// factors keep their relative order and label.
pub fn absorb_subset_factors<L, F: Factor>(factors: Vec<(L, F)>) -> Vec<(L, F)> {
    let n_factors = factors.len();
    let mut absorbed_into: Vec<Option<usize>> = vec![None; n_factors];

    {
        let scopes: Vec<FnvHashSet<&str>> = factors.iter().map(|&(_, ref f)| scope_set(f.var_names())).collect();
        let mut alive = vec![true; n_factors];

        for j in 0..n_factors {
            for i in 0..n_factors {
                if i != j && alive[i] && is_strict_subset(&scopes[j], &scopes[i]) {
                    absorbed_into[j] = Some(i);
                    alive[j] = false;
                    break;
                }
            }
        }
    }

    // targets are always alive, but may receive products built from factors absorbed before them
    let mut slots: Vec<Option<(L, F)>> = factors.into_iter().map(Some).collect();
    for j in 0..n_factors {
        if let Some(i) = absorbed_into[j] {
            if let Some((_, subset_factor)) = slots[j].take() {
                if let Some((_, ref mut target)) = slots[i] {
                    *target = target.multiply(&subset_factor);
                }
            }
        }
    }

    slots.into_iter().filter_map(|slot| slot).collect()
}

/// Scope intersections of every cluster pair, excluding observed variables. Empty intersections
/// are left out. Variables keep the order of the first cluster's scope.
pub fn get_non_rip_sepsets(scopes: &[&[String]], evidence_vars: &FnvHashSet<String>) -> Sepsets {
    let mut sepsets = Sepsets::new();
    let scope_sets: Vec<FnvHashSet<&str>> = scopes.iter().map(|s| scope_set(s)).collect();

    for i in 0..scopes.len() {
        for j in (i + 1)..scopes.len() {
            let sepset: Vec<String> = scopes[i].iter()
                .filter(|v| scope_sets[j].contains(v.as_str()) && !evidence_vars.contains(*v))
                .cloned()
                .collect();

            if !sepset.is_empty() {
                sepsets.insert((i, j), sepset);
            }
        }
    }

    sepsets
}

/// Restrict the non-RIP sepsets so that the graph satisfies the running intersection property.
///
/// For every variable, a graph over the clusters is built with a unit-weight edge for each pair
/// whose sepset contains the variable, and the variable is kept only on the edges of its minimum
/// spanning tree. Pairs that keep no variable are dropped.
pub fn get_running_intersection_sepsets(n_clusters: usize, non_rip_sepsets: &Sepsets) -> Sepsets {
    // variables in order of first appearance, and the candidate edges of each variable
    let mut vars: UniqueArray<String> = UniqueArray::new();
    let mut var_edges: FnvHashMap<&str, Vec<WeightedEdge>> = Default::default();

    for (&(i, j), sepset) in non_rip_sepsets.iter() {
        for var in sepset {
            vars.push_borrow(var, var.clone());
            var_edges.entry(var.as_str()).or_insert_with(Vec::new).push(WeightedEdge::unweighted(i, j));
        }
    }

    let mut rip_sepsets = Sepsets::new();
    for var in vars.iter() {
        let edges = match var_edges.get(var.as_str()) {
            Some(edges) => edges,
            None => continue
        };

        for edge in minimum_spanning_tree(n_clusters, edges) {
            rip_sepsets.entry(edge.ordered_pair()).or_insert_with(Vec::new).push(var.clone());
        }
    }

    trace!("Kept {} of {} candidate edges after enforcing the running intersection property", rip_sepsets.len(), non_rip_sepsets.len());
    rip_sepsets
}
