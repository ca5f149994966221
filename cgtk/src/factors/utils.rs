use fnv::{FnvHashMap, FnvHashSet};
use factors::traits::Factor;

/// Observed values keyed by variable name
pub type Evidence<V> = FnvHashMap<String, V>;

/// Select the evidence relevant to `var_names`, in the order of `var_names`
pub fn get_subset_evidence<V: Clone>(evidence: &Evidence<V>, var_names: &[String]) -> (Vec<String>, Vec<V>) {
    let mut vars = Vec::new();
    let mut values = Vec::new();

    for var in var_names {
        if let Some(value) = evidence.get(var) {
            vars.push(var.clone());
            values.push(value.clone());
        }
    }

    (vars, values)
}

/// Reduce a factor by the relevant subset of `evidence`, or copy it when nothing is observed
pub fn reduce_by_evidence<F: Factor>(factor: &F, evidence: &Evidence<F::Value>) -> F {
    let (vars, values) = get_subset_evidence(evidence, factor.var_names());
    if vars.is_empty() {
        factor.copy()
    } else {
        factor.reduce(&vars, &values)
    }
}

#[inline]
pub fn scope_set(var_names: &[String]) -> FnvHashSet<&str> {
    var_names.iter().map(|v| v.as_str()).collect()
}

/// True if `a` is a strict subset of `b`
pub fn is_strict_subset(a: &FnvHashSet<&str>, b: &FnvHashSet<&str>) -> bool {
    a.len() < b.len() && a.is_subset(b)
}
