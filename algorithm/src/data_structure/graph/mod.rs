pub mod algorithm;

/// Undirected weighted edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64
}

impl WeightedEdge {
    pub fn new(source: usize, target: usize, weight: f64) -> WeightedEdge {
        WeightedEdge { source, target, weight }
    }

    pub fn unweighted(source: usize, target: usize) -> WeightedEdge {
        WeightedEdge { source, target, weight: 1.0 }
    }

    /// Return the node pair with the smaller index first
    #[inline]
    pub fn ordered_pair(&self) -> (usize, usize) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}
