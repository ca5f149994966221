/// Union-find over elements `0..n` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parents: Vec<usize>,
    ranks: Vec<u8>,
    n_components: usize
}

impl DisjointSet {
    pub fn new(n_elements: usize) -> DisjointSet {
        DisjointSet {
            parents: (0..n_elements).collect(),
            ranks: vec![0; n_elements],
            n_components: n_elements
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        // compress the path
        let mut current = x;
        while self.parents[current] != root {
            let next = self.parents[current];
            self.parents[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets of `a` and `b`, return false if they are already in the same set
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        if self.ranks[root_a] < self.ranks[root_b] {
            self.parents[root_a] = root_b;
        } else if self.ranks[root_a] > self.ranks[root_b] {
            self.parents[root_b] = root_a;
        } else {
            self.parents[root_b] = root_a;
            self.ranks[root_a] += 1;
        }

        self.n_components -= 1;
        return true;
    }

    #[inline]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parents.len()
    }
}
