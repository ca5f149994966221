mod unique_array;
mod disjoint_set;
mod indexed_heap;

pub mod graph;

pub use self::unique_array::UniqueArray;
pub use self::disjoint_set::DisjointSet;
pub use self::indexed_heap::IndexedMaxHeap;
