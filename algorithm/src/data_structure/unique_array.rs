use std::collections::HashSet;
use std::hash::Hash;
use std::slice::Iter;

/// Insertion-ordered array that keeps only the first value pushed for each key.
pub struct UniqueArray<V, K: Hash + Eq + PartialEq + Clone=String> {
    data: Vec<V>,
    id: HashSet<K>
}

impl<V, K: Hash + Eq + PartialEq + Clone> UniqueArray<V, K> {
    pub fn new() -> UniqueArray<V, K> {
        UniqueArray {
            data: Vec::new(),
            id: HashSet::new()
        }
    }

    pub fn push_borrow(&mut self, id: &K, value: V) -> bool {
        if !self.id.contains(id) {
            self.id.insert(id.clone());
            self.data.push(value);

            return true;
        }

        return false;
    }

    #[inline]
    pub fn contains(&self, id: &K) -> bool {
        self.id.contains(id)
    }

    pub fn iter(&self) -> Iter<V> {
        self.data.iter()
    }

    pub fn get_ref_value(&self) -> &Vec<V> {
        &self.data
    }

    pub fn get_value(self) -> Vec<V> {
        self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Hash + Eq + PartialEq + Clone> UniqueArray<K, K> {
    /// Collect unique keys in order of first appearance, also returning every key that was seen
    /// more than once (in order of its first repetition).
    pub fn from_keys<I: IntoIterator<Item=K>>(keys: I) -> (UniqueArray<K, K>, Vec<K>) {
        let mut array = UniqueArray::new();
        let mut duplicates: UniqueArray<K, K> = UniqueArray::new();

        for key in keys {
            if !array.push_borrow(&key, key.clone()) {
                duplicates.push_borrow(&key, key.clone());
            }
        }

        (array, duplicates.get_value())
    }
}
