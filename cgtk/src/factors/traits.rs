use std::fmt::Debug;

/// A (possibly unnormalized) distribution over an ordered scope of named variables.
///
/// Factors are treated as immutable values: every operation returns a new factor.
pub trait Factor: Clone + Debug {
    /// Value a variable can be observed at (e.g. a category index or a real number)
    type Value: Clone + Debug;

    fn var_names(&self) -> &[String];

    fn multiply(&self, factor: &Self) -> Self;

    /// Divide by `factor`, where zero divided by zero gives zero
    fn cancel(&self, factor: &Self) -> Self;

    /// Sum out `vars` (`keep = false`) or every variable not in `vars` (`keep = true`)
    fn marginalize(&self, vars: &[String], keep: bool) -> Self;

    /// Observe `vars` at `values`, removing them from the scope
    fn reduce(&self, vars: &[String], values: &[Self::Value]) -> Self;

    /// D_KL(self || factor), both factors normalized first
    fn kl_divergence(&self, factor: &Self) -> f64;

    /// D_KL between this factor and a vacuous (uniform) factor over the same scope
    fn distance_from_vacuous(&self) -> f64;

    fn copy(&self) -> Self {
        self.clone()
    }

    fn touch(&self, var: &str) -> bool {
        self.var_names().iter().any(|v| v == var)
    }
}
