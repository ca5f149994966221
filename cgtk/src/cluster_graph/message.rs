use factors::Factor;

/// A factor sent from one cluster to a neighbour, over the sepset they share.
#[derive(Debug, Clone)]
pub struct Message<F: Factor> {
    /// index of the sending cluster in the graph
    pub sender: usize,
    /// index of the receiving cluster in the graph
    pub receiver: usize,
    pub factor: F
}

impl<F: Factor> Message<F> {
    pub fn new(sender: usize, receiver: usize, factor: F) -> Message<F> {
        Message { sender, receiver, factor }
    }

    #[inline]
    pub fn var_names(&self) -> &[String] {
        self.factor.var_names()
    }
}
