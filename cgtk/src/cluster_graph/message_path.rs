use factors::Factor;
use cluster_graph::cluster::Cluster;
use cluster_graph::message::Message;

/// One direction of an edge in the cluster graph, along which messages are passed.
///
/// The path keeps the message the sender would send next and how much information the receiver
/// would gain from it, which is what the scheduler uses to pick the next message.
#[derive(Debug, Clone)]
pub struct MessagePath<F: Factor> {
    pub sender: usize,
    pub receiver: usize,
    next_message: Message<F>,
    previously_sent_message: Option<Message<F>>,
    next_information_gain: f64,
    information_gains_with_iters: Vec<f64>
}

impl<F: Factor> MessagePath<F> {
    pub fn new(sender: usize, receiver: usize, clusters: &[Cluster<F>]) -> MessagePath<F> {
        let mut path = MessagePath {
            sender,
            receiver,
            next_message: clusters[sender].make_message(receiver),
            previously_sent_message: None,
            next_information_gain: 0.0,
            information_gains_with_iters: Vec::new()
        };

        path.update_next_information_gain();
        path
    }

    #[inline]
    pub fn next_message(&self) -> &Message<F> {
        &self.next_message
    }

    #[inline]
    pub fn previously_sent_message(&self) -> Option<&Message<F>> {
        self.previously_sent_message.as_ref()
    }

    #[inline]
    pub fn next_information_gain(&self) -> f64 {
        self.next_information_gain
    }

    /// Gain recorded after every recomputation and every pass, for plotting convergence
    #[inline]
    pub fn information_gains_with_iters(&self) -> &[f64] {
        &self.information_gains_with_iters
    }

    pub fn update_next_information_gain(&mut self) {
        self.next_information_gain = match self.previously_sent_message {
            None => self.next_message.factor.distance_from_vacuous(),
            // KL(P || Q) is the information gained when Q (the next message) is used instead of P
            Some(ref previous) => previous.factor.kl_divergence(&self.next_message.factor)
        };
        self.information_gains_with_iters.push(self.next_information_gain);
    }

    pub fn recompute_next_message(&mut self, clusters: &[Cluster<F>]) {
        self.next_message = clusters[self.sender].make_message(self.receiver);
        self.update_next_information_gain();
    }

    /// Deliver the next message to the receiver and return the receiver index.
    ///
    /// The receiver's state changes, so the caller must recompute the messages on the receiver's
    /// outward paths. The sender's outward paths are unaffected.
    pub fn pass_next_message(&mut self, clusters: &mut [Cluster<F>]) -> usize {
        clusters[self.receiver].receive_message(self.next_message.clone());
        self.previously_sent_message = Some(self.next_message.clone());
        self.next_information_gain = 0.0;
        self.information_gains_with_iters.push(self.next_information_gain);

        self.receiver
    }
}
