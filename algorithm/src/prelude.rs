pub use data_structure::{DisjointSet, IndexedMaxHeap, UniqueArray};
pub use data_structure::graph::WeightedEdge;
pub use data_structure::graph::algorithm::{minimum_spanning_tree, is_tree};
