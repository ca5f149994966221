use std::cmp::Ordering;

/// Binary max-heap over the items `0..n`, each keyed by a `f64`. The position of every item is
/// tracked so its key can be increased or decreased in O(log n).
///
/// Items with equal keys are ordered by their id (smaller id first), so the order in which items
/// are popped is fully determined by the keys.
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap {
    keys: Vec<f64>,
    // heap of item ids
    heap: Vec<usize>,
    // position of each item in `heap`
    positions: Vec<usize>
}

impl IndexedMaxHeap {
    pub fn new(keys: Vec<f64>) -> IndexedMaxHeap {
        let n_items = keys.len();
        let mut heap = IndexedMaxHeap {
            keys,
            heap: (0..n_items).collect(),
            positions: (0..n_items).collect()
        };

        if n_items > 1 {
            for i in (0..n_items / 2).rev() {
                heap.sift_down(i);
            }
        }

        heap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Return the item with the largest key and its key
    pub fn peek(&self) -> Option<(usize, f64)> {
        self.heap.first().map(|&item| (item, self.keys[item]))
    }

    #[inline]
    pub fn key(&self, item: usize) -> f64 {
        self.keys[item]
    }

    pub fn update(&mut self, item: usize, key: f64) {
        let old_key = self.keys[item];
        self.keys[item] = key;
        let pos = self.positions[item];

        if key.total_cmp(&old_key) == Ordering::Greater {
            self.sift_up(pos);
        } else {
            self.sift_down(pos);
        }
    }

    /// All items ordered from the largest key to the smallest. Does not modify the heap.
    pub fn iter_sorted(&self) -> Vec<usize> {
        let mut items = self.heap.clone();
        items.sort_by(|&a, &b| self.compare(b, a));
        items
    }

    /// `Greater` if item `a` must be popped before item `b`
    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.keys[a].total_cmp(&self.keys[b]).then_with(|| b.cmp(&a))
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.positions[self.heap[i]] = i;
        self.positions[self.heap[j]] = j;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.compare(self.heap[pos], self.heap[parent]) != Ordering::Greater {
                break;
            }

            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut largest = pos;

            if left < n && self.compare(self.heap[left], self.heap[largest]) == Ordering::Greater {
                largest = left;
            }
            if right < n && self.compare(self.heap[right], self.heap[largest]) == Ordering::Greater {
                largest = right;
            }
            if largest == pos {
                break;
            }

            self.swap(pos, largest);
            pos = largest;
        }
    }
}
