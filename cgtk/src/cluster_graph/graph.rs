use fnv::FnvHashSet;
use algorithm::prelude::{IndexedMaxHeap, UniqueArray};
use errors::*;
use factors::{Factor, Evidence, get_subset_evidence};
use settings::ProcessConf;
use cluster_graph::cluster::Cluster;
use cluster_graph::message::Message;
use cluster_graph::message_path::MessagePath;
use cluster_graph::construction::*;
use cluster_graph::snapshot::{GraphSnapshot, SnapshotEdge, MessagePassEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// no message passing has been run yet
    Idle,
    Running,
    /// the largest information gain fell to the tolerance
    Converged,
    /// the message budget ran out first, which is expected for some loopy graphs
    Exhausted
}

/// A cluster graph built from a list of factors, on which (loopy) belief propagation is run by
/// greedily passing the message with the largest information gain.
pub struct ClusterGraph<F: Factor> {
    clusters: Vec<Cluster<F>>,
    message_paths: Vec<MessagePath<F>>,
    evidence: Evidence<F::Value>,
    special_evidence: Evidence<F::Value>,
    non_rip_sepsets: Sepsets,
    rip_sepsets: Sepsets,
    num_messages_passed: usize,
    sync_message_passing_max_distances: Vec<f64>,
    keep_passed_messages: bool,
    passed_messages: Vec<Message<F>>,
    status: ProcessStatus
}

impl<F: Factor> ClusterGraph<F> {
    /// Build the graph. `evidence` reduces the factors before they are clustered, while
    /// `special_evidence` is only applied when computing messages and marginals, so that the stored
    /// factors keep their full scope.
    pub fn new(factors: Vec<F>, evidence: Option<Evidence<F::Value>>, special_evidence: Option<Evidence<F::Value>>) -> Result<ClusterGraph<F>> {
        let factors = factors.into_iter().map(|f| (None, f)).collect();
        ClusterGraph::build(factors, evidence, special_evidence)
    }

    /// Build the graph from labelled factors. A factor that absorbs others keeps its label as the
    /// id of its cluster, so labels must be unique among the surviving factors.
    pub fn with_labels(factors: Vec<(String, F)>, evidence: Option<Evidence<F::Value>>, special_evidence: Option<Evidence<F::Value>>) -> Result<ClusterGraph<F>> {
        let factors = factors.into_iter().map(|(label, f)| (Some(label), f)).collect();
        ClusterGraph::build(factors, evidence, special_evidence)
    }

    fn build(factors: Vec<(Option<String>, F)>, evidence: Option<Evidence<F::Value>>, special_evidence: Option<Evidence<F::Value>>) -> Result<ClusterGraph<F>> {
        let evidence = evidence.unwrap_or_default();
        let special_evidence = special_evidence.unwrap_or_default();

        let n_factors = factors.len();
        let cluster_factors = absorb_subset_factors(evidence_reduce_factors(factors, &evidence));
        if cluster_factors.is_empty() {
            bail!(ErrorKind::EmptyGraph);
        }
        debug!("Absorbed {} subset factors, {} clusters remain", n_factors - cluster_factors.len(), cluster_factors.len());

        let clusters: Vec<Cluster<F>> = cluster_factors.into_iter()
            .enumerate()
            .map(|(i, (label, factor))| {
                let id = match label {
                    Some(label) => label,
                    None => format!("c{}#{}", i, factor.var_names().join(","))
                };
                Cluster::new(id, i, factor)
            })
            .collect();

        let (_, duplicated_ids) = UniqueArray::from_keys(clusters.iter().map(|c| c.id().to_owned()));
        if !duplicated_ids.is_empty() {
            bail!(ErrorKind::DuplicateClusterIds(duplicated_ids));
        }

        let mut graph = ClusterGraph {
            clusters,
            message_paths: Vec::new(),
            evidence,
            special_evidence,
            non_rip_sepsets: Sepsets::new(),
            rip_sepsets: Sepsets::new(),
            num_messages_passed: 0,
            sync_message_passing_max_distances: Vec::new(),
            keep_passed_messages: false,
            passed_messages: Vec::new(),
            status: ProcessStatus::Idle
        };

        for cluster in graph.clusters.iter_mut() {
            let (vars, values) = get_subset_evidence(&graph.special_evidence, cluster.var_names());
            cluster.add_special_evidence(&vars, &values);
        }

        let all_evidence_vars: FnvHashSet<String> = graph.evidence.keys()
            .chain(graph.special_evidence.keys())
            .cloned()
            .collect();
        graph.non_rip_sepsets = {
            let scopes: Vec<&[String]> = graph.clusters.iter().map(|c| c.var_names()).collect();
            get_non_rip_sepsets(&scopes, &all_evidence_vars)
        };

        graph.build_graph();
        Ok(graph)
    }

    /// Wire clusters along the running intersection sepsets and create two message paths per edge
    fn build_graph(&mut self) {
        self.rip_sepsets = get_running_intersection_sepsets(self.clusters.len(), &self.non_rip_sepsets);

        for cluster in self.clusters.iter_mut() {
            cluster.remove_all_neighbours();
        }
        self.message_paths.clear();

        for (&(i, j), sepset) in self.rip_sepsets.iter() {
            assert!(!sepset.is_empty(), "empty sepset between clusters {} and {}", self.clusters[i].id(), self.clusters[j].id());

            self.clusters[i].add_neighbour(j, sepset.clone());
            self.clusters[j].add_neighbour(i, sepset.clone());

            let path_ij = MessagePath::new(i, j, &self.clusters);
            let path_ji = MessagePath::new(j, i, &self.clusters);
            self.clusters[i].add_outward_message_path(self.message_paths.len());
            self.message_paths.push(path_ij);
            self.clusters[j].add_outward_message_path(self.message_paths.len());
            self.message_paths.push(path_ji);
        }

        debug!("Built cluster graph with {} clusters, {} edges and {} message paths",
               self.clusters.len(), self.rip_sepsets.len(), self.message_paths.len());
    }

    pub fn process_graph(&mut self, tol: f64, max_iter: usize) -> ProcessStatus {
        self.process_graph_with_observer(tol, max_iter, |_| {})
    }

    pub fn process_graph_with_conf(&mut self, conf: &ProcessConf) -> ProcessStatus {
        self.keep_passed_messages = conf.keep_passed_messages;
        self.process_graph(conf.tol, conf.max_iter)
    }

    /// Pass messages one at a time, always along the path with the largest information gain, until
    /// that gain is at most `tol` or `max_iter * #paths` messages have been passed.
    pub fn process_graph_with_observer<O>(&mut self, tol: f64, max_iter: usize, mut observer: O) -> ProcessStatus
        where O: FnMut(&MessagePassEvent)
    {
        self.sync_message_passing_max_distances.clear();

        if self.clusters.len() == 1 {
            // nothing to pass messages to, observe the special evidence directly
            self.clusters[0].observe_special_evidence();
            self.status = ProcessStatus::Converged;
            return self.status;
        }
        if self.message_paths.is_empty() {
            debug!("Cluster graph has no edges, no message to pass");
            self.status = ProcessStatus::Converged;
            return self.status;
        }

        self.status = ProcessStatus::Running;
        let max_message_passes = max_iter * self.message_paths.len();
        let mut paths_heap = IndexedMaxHeap::new(self.message_paths.iter().map(|p| p.next_information_gain()).collect());

        for _ in 0..max_message_passes {
            let (path_idx, information_gain) = match paths_heap.peek() {
                Some(top) => top,
                None => break
            };

            self.pass_message(path_idx, &mut paths_heap);
            self.num_messages_passed += 1;

            let max_next_information_gain = paths_heap.peek().map_or(0.0, |(_, gain)| gain);
            self.sync_message_passing_max_distances.push(max_next_information_gain);

            {
                let path = &self.message_paths[path_idx];
                trace!("Passed message {} -> {} (gain: {}), max next gain: {}",
                       self.clusters[path.sender].id(), self.clusters[path.receiver].id(), information_gain, max_next_information_gain);
                observer(&MessagePassEvent {
                    sender_id: self.clusters[path.sender].id(),
                    receiver_id: self.clusters[path.receiver].id(),
                    information_gain,
                    max_next_information_gain,
                    num_messages_passed: self.num_messages_passed
                });
            }

            if max_next_information_gain <= tol {
                self.status = ProcessStatus::Converged;
                info!("Message passing converged after {} messages", self.num_messages_passed);
                return self.status;
            }
        }

        self.status = ProcessStatus::Exhausted;
        info!("Message passing stopped before converging: passed {} messages", self.num_messages_passed);
        self.status
    }

    /// Pass the next message of a path, then refresh the messages the receiver would send next
    fn pass_message(&mut self, path_idx: usize, paths_heap: &mut IndexedMaxHeap) {
        if self.keep_passed_messages {
            self.passed_messages.push(self.message_paths[path_idx].next_message().clone());
        }

        let receiver = self.message_paths[path_idx].pass_next_message(&mut self.clusters);
        paths_heap.update(path_idx, self.message_paths[path_idx].next_information_gain());

        for &outward_path in self.clusters[receiver].outward_message_paths() {
            self.message_paths[outward_path].recompute_next_message(&self.clusters);
            paths_heap.update(outward_path, self.message_paths[outward_path].next_information_gain());
        }
    }

    /// Marginal over `vars` from the first cluster whose belief, once reduced by its special
    /// evidence, still contains all of them. Variables with special evidence are observed, so they
    /// are never covered.
    pub fn get_marginal<S: AsRef<str>>(&self, vars: &[S]) -> Result<F> {
        let vars: Vec<String> = vars.iter().map(|v| v.as_ref().to_owned()).collect();

        for cluster in &self.clusters {
            if !vars.iter().all(|v| cluster.belief().touch(v)) {
                continue;
            }

            let belief = cluster.get_reduced_belief();
            if vars.iter().all(|v| belief.touch(v)) {
                return Ok(belief.marginalize(&vars, true));
            }
        }

        bail!(ErrorKind::MarginalNotFound(vars))
    }

    /// Product of all cluster beliefs with the double-counted sent messages divided out.
    ///
    /// Builds a factor over every variable of the graph, so it is only meant for checking results
    /// on small graphs.
    pub fn get_posterior_joint(&self) -> Result<F> {
        let mut clusters = self.clusters.iter();
        let mut joint = match clusters.next() {
            Some(cluster) => cluster.belief().copy(),
            None => bail!(ErrorKind::EmptyGraph)
        };
        for cluster in clusters {
            joint = joint.multiply(cluster.belief());
        }

        let mut sent_messages = self.message_paths.iter().filter_map(|p| p.previously_sent_message());
        if let Some(first) = sent_messages.next() {
            let mut message_product = first.factor.copy();
            for message in sent_messages {
                message_product = message_product.multiply(&message.factor);
            }
            joint = joint.cancel(&message_product);
        }

        Ok(joint)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.cluster_ids(),
            edges: self.rip_sepsets.iter()
                .map(|(&(i, j), sepset)| SnapshotEdge {
                    source: self.clusters[i].id().to_owned(),
                    target: self.clusters[j].id().to_owned(),
                    sepset: sepset.clone()
                })
                .collect()
        }
    }

    #[inline]
    pub fn clusters(&self) -> &[Cluster<F>] {
        &self.clusters
    }

    pub fn cluster_ids(&self) -> Vec<String> {
        self.clusters.iter().map(|c| c.id().to_owned()).collect()
    }

    #[inline]
    pub fn message_paths(&self) -> &[MessagePath<F>] {
        &self.message_paths
    }

    /// Sepset of the edge between clusters `i` and `j`, if the edge exists
    pub fn sepset(&self, i: usize, j: usize) -> Option<&[String]> {
        let key = if i <= j { (i, j) } else { (j, i) };
        self.rip_sepsets.get(&key).map(|s| s.as_slice())
    }

    /// All retained edges and their sepsets, keyed by `(i, j)` with `i < j`
    #[inline]
    pub fn sepsets(&self) -> &Sepsets {
        &self.rip_sepsets
    }

    /// Scope intersections of every cluster pair before the running intersection property was
    /// enforced
    #[inline]
    pub fn non_rip_sepsets(&self) -> &Sepsets {
        &self.non_rip_sepsets
    }

    #[inline]
    pub fn evidence(&self) -> &Evidence<F::Value> {
        &self.evidence
    }

    #[inline]
    pub fn special_evidence(&self) -> &Evidence<F::Value> {
        &self.special_evidence
    }

    #[inline]
    pub fn num_messages_passed(&self) -> usize {
        self.num_messages_passed
    }

    /// Largest next information gain after every pass of the last `process_graph` call
    #[inline]
    pub fn sync_message_passing_max_distances(&self) -> &[f64] {
        &self.sync_message_passing_max_distances
    }

    #[inline]
    pub fn passed_messages(&self) -> &[Message<F>] {
        &self.passed_messages
    }

    #[inline]
    pub fn status(&self) -> ProcessStatus {
        self.status
    }
}
