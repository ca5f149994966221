use fnv::FnvHashMap;
use factors::{Factor, Evidence, get_subset_evidence, reduce_by_evidence};
use cluster_graph::message::Message;

/// A node of the cluster graph, holding one factor over its scope.
///
/// The cluster keeps its base factor and the latest message received from each neighbour. Its
/// belief is the product of the two. A message to a neighbour is built from everything except
/// what that neighbour sent, so information is never echoed back to where it came from.
#[derive(Debug, Clone)]
pub struct Cluster<F: Factor> {
    id: String,
    // index of this cluster in the graph
    handle: usize,
    factor: F,
    belief: F,
    neighbours: Vec<usize>,
    sepsets: FnvHashMap<usize, Vec<String>>,
    received_messages: FnvHashMap<usize, F>,
    outward_message_paths: Vec<usize>,
    special_evidence: Evidence<F::Value>
}

impl<F: Factor> Cluster<F> {
    pub fn new(id: String, handle: usize, factor: F) -> Cluster<F> {
        Cluster {
            id,
            handle,
            belief: factor.copy(),
            factor,
            neighbours: Vec::new(),
            sepsets: Default::default(),
            received_messages: Default::default(),
            outward_message_paths: Vec::new(),
            special_evidence: Default::default()
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn handle(&self) -> usize {
        self.handle
    }

    #[inline]
    pub fn var_names(&self) -> &[String] {
        self.belief.var_names()
    }

    /// The factor the cluster was built from, without any received message
    #[inline]
    pub fn factor(&self) -> &F {
        &self.factor
    }

    /// The factor multiplied by the latest message from every neighbour
    #[inline]
    pub fn belief(&self) -> &F {
        &self.belief
    }

    #[inline]
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    pub fn sepset(&self, neighbour: usize) -> Option<&[String]> {
        self.sepsets.get(&neighbour).map(|s| s.as_slice())
    }

    #[inline]
    pub fn outward_message_paths(&self) -> &[usize] {
        &self.outward_message_paths
    }

    #[inline]
    pub fn special_evidence(&self) -> &Evidence<F::Value> {
        &self.special_evidence
    }

    pub fn received_message(&self, neighbour: usize) -> Option<&F> {
        self.received_messages.get(&neighbour)
    }

    pub fn add_neighbour(&mut self, neighbour: usize, sepset: Vec<String>) {
        if !self.sepsets.contains_key(&neighbour) {
            self.neighbours.push(neighbour);
        }
        self.sepsets.insert(neighbour, sepset);
    }

    /// Detach the cluster from the graph, forgetting every received message
    pub fn remove_all_neighbours(&mut self) {
        self.neighbours.clear();
        self.sepsets.clear();
        self.received_messages.clear();
        self.outward_message_paths.clear();
        self.belief = self.factor.copy();
    }

    pub fn add_outward_message_path(&mut self, path: usize) {
        self.outward_message_paths.push(path);
    }

    /// Record evidence used when computing messages and marginals. Variables outside of the
    /// cluster scope are ignored. The stored factor is left untouched.
    pub fn add_special_evidence(&mut self, vars: &[String], values: &[F::Value]) {
        for (var, value) in vars.iter().zip(values.iter()) {
            if self.factor.touch(var) {
                self.special_evidence.insert(var.clone(), value.clone());
            }
        }
    }

    /// Compute the message this cluster would currently send to `receiver`
    pub fn make_message(&self, receiver: usize) -> Message<F> {
        let sepset = match self.sepsets.get(&receiver) {
            Some(sepset) => sepset,
            None => panic!("cluster {} has no neighbour with index {}", self.id, receiver)
        };

        let mut information = self.factor.copy();
        for neighbour in &self.neighbours {
            if *neighbour == receiver {
                continue;
            }
            if let Some(message) = self.received_messages.get(neighbour) {
                information = information.multiply(message);
            }
        }

        let (vars, values) = get_subset_evidence(&self.special_evidence, information.var_names());
        if !vars.is_empty() {
            information = information.reduce(&vars, &values);
        }

        Message::new(self.handle, receiver, information.marginalize(sepset, true))
    }

    /// Absorb a message, replacing the previous message from the same sender
    pub fn receive_message(&mut self, message: Message<F>) {
        debug_assert_eq!(message.receiver, self.handle);
        self.received_messages.insert(message.sender, message.factor);
        self.update_belief();
    }

    /// The belief reduced by all of the special evidence still in its scope. Observed variables
    /// leave the scope of the result.
    pub fn get_reduced_belief(&self) -> F {
        reduce_by_evidence(&self.belief, &self.special_evidence)
    }

    /// Permanently reduce the stored factor (and belief) by the cluster's special evidence
    pub(super) fn observe_special_evidence(&mut self) {
        let (vars, values) = get_subset_evidence(&self.special_evidence, self.factor.var_names());
        if vars.is_empty() {
            return;
        }

        self.factor = self.factor.reduce(&vars, &values);
        self.update_belief();
    }

    fn update_belief(&mut self) {
        let mut belief = self.factor.copy();
        for neighbour in &self.neighbours {
            if let Some(message) = self.received_messages.get(neighbour) {
                belief = belief.multiply(message);
            }
        }
        self.belief = belief;
    }
}
