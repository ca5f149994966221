use cgtk::prelude::*;
use env_logger;
use super::mock::*;

fn chain_with_prior() -> Vec<TableFactor> {
    vec![
        TableFactor::binary("A", "B", [[2.0, 1.0], [1.0, 2.0]]),
        TableFactor::binary("B", "C", [[3.0, 1.0], [1.0, 3.0]]),
        TableFactor::new(&["C"], &[2], &[0.8, 0.2]),
    ]
}

fn star() -> Vec<TableFactor> {
    vec![
        TableFactor::binary("a", "b", [[1.0, 3.0], [2.0, 1.0]]),
        TableFactor::binary("a", "c", [[2.0, 1.0], [1.0, 4.0]]),
        TableFactor::new(&["a", "d"], &[2, 3], &[1.0, 2.0, 3.0, 3.0, 2.0, 1.0]),
    ]
}

fn long_chain() -> Vec<TableFactor> {
    vec![
        TableFactor::binary("a", "b", [[1.0, 3.0], [2.0, 1.0]]),
        TableFactor::binary("b", "c", [[2.0, 1.0], [1.0, 4.0]]),
        TableFactor::binary("c", "d", [[5.0, 1.0], [1.0, 2.0]]),
        TableFactor::binary("d", "e", [[1.0, 2.0], [3.0, 1.0]]),
        TableFactor::new(&["e"], &[2], &[0.3, 0.7]),
    ]
}

fn loop_of_three() -> Vec<TableFactor> {
    vec![
        TableFactor::binary("a", "b", [[1.5, 1.0], [0.8, 1.2]]),
        TableFactor::binary("b", "c", [[1.1, 0.9], [1.0, 1.3]]),
        TableFactor::binary("c", "a", [[1.2, 0.7], [1.0, 1.0]]),
    ]
}

fn assert_marginals_match(graph: &ClusterGraph<TableFactor>, factors: &[TableFactor], observed: &Evidence<usize>, vars: &[&str], tol: f64) {
    for var in vars {
        let marginal = graph.get_marginal(&[*var]).unwrap();
        let expected = brute_force_marginal(factors, observed, &[*var]);
        assert_probs_eq(&marginal.probs_over(&[*var]), &expected.probs_over(&[*var]), tol);
    }
}

#[test]
pub fn test_chain_scenario() {
    let _ = env_logger::try_init();

    let factors = vec![
        TableFactor::binary("A", "B", [[2.0, 1.0], [1.0, 2.0]]),
        TableFactor::binary("B", "C", [[3.0, 1.0], [1.0, 3.0]]),
    ];
    let mut graph = ClusterGraph::new(factors, None, None).unwrap();
    assert_eq!(graph.clusters().len(), 2);
    assert_eq!(graph.sepsets().len(), 1);
    assert_eq!(graph.sepset(0, 1), Some(&["B".to_owned()][..]));

    graph.process_graph(1e-6, 10);
    let marginal = graph.get_marginal(&["A"]).unwrap();
    assert_probs_eq(&marginal.probs_over(&["A"]), &[0.5, 0.5], 1e-6);
}

#[test]
pub fn test_chain_with_prior() {
    let factors = chain_with_prior();
    let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
    assert_eq!(graph.clusters().len(), 2);

    assert_eq!(graph.process_graph(1e-6, 10), ProcessStatus::Converged);
    let marginal = graph.get_marginal(&["A"]).unwrap();
    assert_probs_eq(&marginal.probs_over(&["A"]), &[0.55, 0.45], 1e-6);
    assert_marginals_match(&graph, &factors, &evidence(&[]), &["A", "B", "C"], 1e-6);
}

#[test]
pub fn test_exact_inference_on_trees() {
    let _ = env_logger::try_init();

    // a single edge needs at most one message per direction
    let factors = chain_with_prior();
    let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
    assert_eq!(graph.process_graph(1e-9, 1), ProcessStatus::Converged);
    assert_marginals_match(&graph, &factors, &evidence(&[]), &["A", "B", "C"], 1e-9);

    for factors in vec![star(), long_chain()] {
        let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
        assert_eq!(graph.sepsets().len() + 1, graph.clusters().len());

        assert_eq!(graph.process_graph(1e-9, 10), ProcessStatus::Converged);
        assert_eq!(graph.status(), ProcessStatus::Converged);
        assert!(graph.num_messages_passed() > 0);
        assert_marginals_match(&graph, &factors, &evidence(&[]), &["a", "b", "c", "d"], 1e-6);
    }
}

#[test]
pub fn test_pairwise_marginal() {
    let factors = long_chain();
    let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
    graph.process_graph(1e-9, 10);

    let marginal = graph.get_marginal(&["c", "b"]).unwrap();
    let expected = brute_force_marginal(&factors, &evidence(&[]), &["b", "c"]);
    assert_probs_eq(&marginal.probs_over(&["b", "c"]), &expected.probs_over(&["b", "c"]), 1e-6);
}

#[test]
pub fn test_idempotence() {
    let vars = ["a", "b", "c", "d"];
    let mut graph = ClusterGraph::new(star(), None, None).unwrap();
    graph.process_graph(1e-9, 10);
    let before: Vec<Vec<f64>> = vars.iter().map(|v| graph.get_marginal(&[*v]).unwrap().probs_over(&[*v])).collect();

    assert_eq!(graph.process_graph(1e-9, 10), ProcessStatus::Converged);
    for (v, probs) in vars.iter().zip(before.iter()) {
        assert_probs_eq(&graph.get_marginal(&[*v]).unwrap().probs_over(&[*v]), probs, 1e-6);
    }
}

#[test]
pub fn test_single_cluster_fast_path() {
    let factor = TableFactor::new(&["a", "b", "c"], &[2, 3, 2], &(1..13).map(|v| v as f64).collect::<Vec<_>>());
    let mut graph = ClusterGraph::new(vec![factor], None, Some(evidence(&[("b", 1)]))).unwrap();

    assert_eq!(graph.process_graph(1e-9, 10), ProcessStatus::Converged);
    assert_eq!(graph.num_messages_passed(), 0);

    let marginal = graph.get_marginal(&["a", "c"]).unwrap();
    assert_probs_eq(&marginal.probs_over(&["a", "c"]), &[3.0 / 26.0, 4.0 / 26.0, 9.0 / 26.0, 10.0 / 26.0], 1e-9);
}

#[test]
pub fn test_evidence() {
    let factors = long_chain();
    let observed = evidence(&[("c", 0)]);
    let mut graph = ClusterGraph::new(factors.clone(), Some(observed.clone()), None).unwrap();

    // f(b, c=0) is absorbed by f(a, b), f(c=0, d) and f(e) by f(d, e)
    assert_eq!(graph.cluster_ids(), vec!["c0#a,b".to_owned(), "c1#d,e".to_owned()]);
    assert!(graph.message_paths().is_empty());
    assert_eq!(graph.process_graph(1e-9, 10), ProcessStatus::Converged);
    assert_marginals_match(&graph, &factors, &observed, &["a", "b", "d", "e"], 1e-6);
}

#[test]
pub fn test_special_evidence() {
    let factors = long_chain();
    let observed = evidence(&[("c", 1)]);
    let mut graph = ClusterGraph::new(factors.clone(), None, Some(observed.clone())).unwrap();
    assert_eq!(graph.clusters().len(), 4);
    // `c` is never sent across an edge
    assert!(graph.sepsets().values().all(|sepset| !sepset.contains(&"c".to_owned())));

    assert_eq!(graph.process_graph(1e-9, 10), ProcessStatus::Converged);
    assert_marginals_match(&graph, &factors, &observed, &["a", "b", "d", "e"], 1e-6);
}

#[test]
pub fn test_special_evidence_vars_are_not_covered() {
    let factors = long_chain();
    let mut graph = ClusterGraph::new(factors.clone(), None, Some(evidence(&[("c", 1)]))).unwrap();
    graph.process_graph(1e-9, 10);

    for query in vec![vec!["c"], vec!["b", "c"], vec!["c", "d"]] {
        match graph.get_marginal(&query[..]) {
            Err(err) => match *err.kind() {
                ErrorKind::MarginalNotFound(ref vars) => assert_eq!(vars, &query.iter().map(|v| v.to_string()).collect::<Vec<_>>()),
                ref kind => panic!("unexpected error: {:?}", kind)
            },
            Ok(marginal) => panic!("`c` is observed, got a marginal over {:?}", marginal.var_names())
        }
    }

    // the neighbours of `c` are still answered, conditioned on c = 1
    let marginal = graph.get_marginal(&["b"]).unwrap();
    let expected = brute_force_marginal(&factors, &evidence(&[("c", 1)]), &["b"]);
    assert_probs_eq(&marginal.probs_over(&["b"]), &expected.probs_over(&["b"]), 1e-6);
}

#[test]
pub fn test_schedule_budget_on_trees() {
    // one edge: a single pass per direction is enough
    let factors = chain_with_prior();
    let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
    assert_eq!(graph.process_graph(1e-9, 1), ProcessStatus::Converged);
    assert_marginals_match(&graph, &factors, &evidence(&[]), &["A", "B", "C"], 1e-9);

    // the greedy order may send a message before its sender has heard from the rest of the tree,
    // so a longer chain needs more than one pass per path
    let factors = long_chain();
    let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
    let n_paths = graph.message_paths().len();
    assert_eq!(graph.process_graph(1e-9, 1), ProcessStatus::Exhausted);
    assert_eq!(graph.num_messages_passed(), n_paths);

    // more budget resumes from the current messages and reaches the exact marginals
    assert_eq!(graph.process_graph(1e-9, 10), ProcessStatus::Converged);
    assert_marginals_match(&graph, &factors, &evidence(&[]), &["a", "b", "c", "d", "e"], 1e-9);
}

#[test]
pub fn test_marginal_not_found() {
    let graph = ClusterGraph::new(chain_with_prior(), None, None).unwrap();

    match graph.get_marginal(&["A", "C"]) {
        Err(err) => match *err.kind() {
            ErrorKind::MarginalNotFound(ref vars) => assert_eq!(vars, &vec!["A".to_owned(), "C".to_owned()]),
            ref kind => panic!("unexpected error: {:?}", kind)
        },
        Ok(_) => panic!("no cluster contains both A and C")
    }
}

#[test]
pub fn test_loopy_graph() {
    let factors = loop_of_three();
    let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
    assert_eq!(graph.clusters().len(), 3);
    assert_eq!(graph.sepsets().len(), 3);

    assert_eq!(graph.process_graph(1e-6, 100), ProcessStatus::Converged);
    assert_eq!(graph.sync_message_passing_max_distances().len(), graph.num_messages_passed());
    assert!(graph.num_messages_passed() <= 100 * graph.message_paths().len());
    // loopy belief propagation is only approximate
    assert_marginals_match(&graph, &factors, &evidence(&[]), &["a", "b", "c"], 0.05);
}

#[test]
pub fn test_exhausted_budget() {
    let mut graph = ClusterGraph::new(star(), None, None).unwrap();
    assert_eq!(graph.status(), ProcessStatus::Idle);
    assert_eq!(graph.process_graph(1e-9, 0), ProcessStatus::Exhausted);
    assert_eq!(graph.num_messages_passed(), 0);
}

#[test]
pub fn test_observer() {
    let mut graph = ClusterGraph::new(chain_with_prior(), None, None).unwrap();
    let mut events = Vec::new();
    let status = graph.process_graph_with_observer(1e-9, 10, |event| {
        events.push((event.sender_id.to_owned(), event.receiver_id.to_owned(), event.information_gain,
                     event.max_next_information_gain, event.num_messages_passed));
    });

    assert_eq!(status, ProcessStatus::Converged);
    assert_eq!(events.len(), graph.num_messages_passed());
    // the message A,B -> B,C is vacuous, so only B,C -> A,B carries information
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "c1#B,C");
    assert_eq!(events[0].1, "c0#A,B");
    assert!(events[0].2 > 0.0);
    assert!(events[0].3 <= 1e-9);
    assert_eq!(events[0].4, 1);

    let history = graph.message_paths().iter()
        .find(|p| p.sender == 1)
        .unwrap()
        .information_gains_with_iters()
        .to_vec();
    assert_eq!(history.last(), Some(&0.0));
}

#[test]
pub fn test_process_with_conf() {
    let conf = ProcessConf::from_json(r#"{"tol": 1e-9, "max_iter": 10, "keep_passed_messages": true}"#).unwrap();
    let mut graph = ClusterGraph::new(star(), None, None).unwrap();

    assert_eq!(graph.process_graph_with_conf(&conf), ProcessStatus::Converged);
    assert_eq!(graph.passed_messages().len(), graph.num_messages_passed());
    for message in graph.passed_messages() {
        assert_eq!(Some(message.var_names()), graph.sepset(message.sender, message.receiver));
    }
}

#[test]
pub fn test_posterior_joint() {
    let all_vars = ["a", "b", "c", "d"];
    for factors in vec![chain_with_prior(), star()] {
        let mut graph = ClusterGraph::new(factors.clone(), None, None).unwrap();
        graph.process_graph(1e-9, 10);

        let vars: Vec<&str> = all_vars.iter()
            .map(|v| *v)
            .chain(vec!["A", "B", "C"])
            .filter(|v| factors.iter().any(|f| f.touch(v)))
            .collect();
        let joint = graph.get_posterior_joint().unwrap();
        let expected = brute_force_marginal(&factors, &evidence(&[]), &vars);
        assert_probs_eq(&joint.probs_over(&vars), &expected.probs_over(&vars), 1e-9);
    }
}
