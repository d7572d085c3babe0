use super::*;
use crate::apriori::Apriori;
use crate::config::{Extraction, MiningConfig};
use crate::error::MiningError;
use crate::support::Threshold;
use crate::traits::ItemsetMiner;
use crate::transactions::TransactionStore;
use ndarray::Array2;

fn scenario_store() -> TransactionStore {
    TransactionStore::from_transactions(vec![
        vec!["a", "b"],
        vec!["a", "c"],
        vec!["a", "b", "c"],
        vec!["b", "c"],
    ])
}

fn child(tree: &PrefixTree, parent: NodeId, item: usize) -> NodeId {
    tree.child(parent, item).expect("missing child")
}

#[test]
fn test_fp_tree_insert() {
    let mut tree = PrefixTree::new();

    // Insert first transaction: [1, 2, 3]
    tree.insert_transaction(&[1, 2, 3], 1);

    assert!(tree.root().children.contains_key(&1));
    assert_eq!(tree.header_table().len(), 3);

    // Insert second transaction: [1, 2, 4] (shares prefix with first)
    tree.insert_transaction(&[1, 2, 4], 1);

    let node1 = child(&tree, ROOT, 1);
    assert_eq!(tree.node(node1).count, 2);
    assert_eq!(tree.node(node1).parent, Some(ROOT));
    assert!(tree.header_table().contains_key(&4));
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_fp_tree_weighted_insert() {
    let mut tree = PrefixTree::new();
    tree.insert_transaction(&[1, 2], 3);
    tree.insert_transaction(&[1], 2);

    let node1 = child(&tree, ROOT, 1);
    let node2 = child(&tree, node1, 2);
    assert_eq!(tree.node(node1).count, 5);
    assert_eq!(tree.node(node2).count, 3);
}

#[test]
fn test_scenario_tree_shape() {
    let store = scenario_store();
    let (tree, ordering) = build_fp_tree(&store, Threshold::Fraction(0.5)).unwrap();

    assert_eq!(ordering.entries(), &[(0, 3), (1, 3), (2, 3)]);

    let (a, b, c) = (0, 1, 2);
    assert_eq!(tree.root().children.len(), 2);

    let root_a = child(&tree, ROOT, a);
    let root_b = child(&tree, ROOT, b);
    assert_eq!(tree.node(root_a).count, 3);
    assert_eq!(tree.node(root_b).count, 1);

    let a_b = child(&tree, root_a, b);
    let a_c = child(&tree, root_a, c);
    assert_eq!(tree.node(root_a).children.len(), 2);
    assert_eq!(tree.node(a_b).count, 2);
    assert_eq!(tree.node(a_c).count, 1);

    let a_b_c = child(&tree, a_b, c);
    assert_eq!(tree.node(a_b_c).count, 1);
    assert!(tree.node(a_b_c).children.is_empty());
    assert!(tree.node(a_c).children.is_empty());

    let b_c = child(&tree, root_b, c);
    assert_eq!(tree.node(b_c).count, 1);
    assert_eq!(tree.node(root_b).children.len(), 1);
}

#[test]
fn test_header_table_keeps_first_occurrence() {
    let store = scenario_store();
    let (tree, _) = build_fp_tree(&store, Threshold::Fraction(0.5)).unwrap();

    let root_a = child(&tree, ROOT, 0);
    let a_b = child(&tree, root_a, 1);
    let a_c = child(&tree, root_a, 2);

    assert_eq!(tree.header_table().len(), 3);
    assert_eq!(tree.header_table()[&0], root_a);
    assert_eq!(tree.header_table()[&1], a_b);
    assert_eq!(tree.header_table()[&2], a_c);

    assert_eq!(tree.node_links(2).count(), 3);
    assert_eq!(tree.item_support(2), 3);
    assert_eq!(tree.item_support(1), 3);
}

#[test]
fn test_fp_tree_prefix_paths() {
    let mut tree = PrefixTree::new();

    // root → 1 → 2 → 3
    //           └→ 4
    tree.insert_transaction(&[1, 2, 3], 1);
    tree.insert_transaction(&[1, 2, 4], 1);

    let paths = tree.prefix_paths(3);
    assert_eq!(paths, vec![(vec![1, 2], 1)]);

    let paths = tree.prefix_paths(4);
    assert_eq!(paths, vec![(vec![1, 2], 1)]);

    // the root-level node has an empty prefix
    assert!(tree.prefix_paths(1).is_empty());
}

#[test]
fn test_fp_tree_single_path() {
    let mut tree1 = PrefixTree::new();
    tree1.insert_transaction(&[1, 2, 3], 1);
    assert!(tree1.has_single_path());
    assert_eq!(tree1.single_path(), vec![(1, 1), (2, 1), (3, 1)]);

    let mut tree2 = PrefixTree::new();
    tree2.insert_transaction(&[1, 2], 1);
    tree2.insert_transaction(&[1, 3], 1);
    assert!(!tree2.has_single_path());

    assert!(PrefixTree::new().has_single_path());
    assert!(PrefixTree::new().is_empty());
}

#[test]
fn test_build_conditional_tree() {
    let prefix_paths = vec![(vec![1, 2], 2), (vec![1], 1), (vec![3], 1)];

    let (cond_tree, items) = build_conditional_tree(&prefix_paths, 2);

    // item 1 appears with weight 3, item 2 with weight 2, item 3 with weight 1
    assert_eq!(items, vec![1, 2]);
    assert!(!cond_tree.header_table().contains_key(&3));
    assert_eq!(cond_tree.item_support(1), 3);
    assert!(cond_tree.has_single_path());
}

#[test]
fn test_combination_generation() {
    let mut result = Vec::new();
    let path = vec![(5, 10), (7, 8), (9, 5)];

    combinations::generate_combinations_from_path(&path, &[], 1, &mut result);

    assert_eq!(result.len(), 3);
    assert_eq!(result[0].len(), 3);
    assert_eq!(result[1].len(), 3);
    assert_eq!(result[2].len(), 1);

    let pairs: Vec<_> = result[1].iter().collect();
    assert_eq!(pairs, vec![(&[5, 7][..], 8), (&[5, 9][..], 5), (&[7, 9][..], 5)]);

    let mut with_alpha = Vec::new();
    combinations::generate_combinations_from_path(&path, &[1], 6, &mut with_alpha);
    let found: Vec<_> = with_alpha.iter().flat_map(|level| level.iter()).collect();
    assert_eq!(found, vec![(&[1, 5][..], 10), (&[1, 7][..], 8), (&[1, 5, 7][..], 8)]);
}

#[test]
fn test_branch_local_mining() {
    let store = scenario_store();
    let (tree, _) = build_fp_tree(&store, Threshold::Fraction(0.5)).unwrap();

    let patterns = PatternMiner::new(&tree, 2).branch_local(ROOT, &[]);
    assert_eq!(patterns, vec![(vec![0], 3), (vec![0, 1], 2)]);

    let root_a = child(&tree, ROOT, 0);
    let below_a = PatternMiner::new(&tree, 1).branch_local(root_a, &[0]);
    assert_eq!(
        below_a,
        vec![(vec![0, 1], 2), (vec![0, 1, 2], 1), (vec![0, 2], 1)]
    );
}

#[test]
fn test_fp_growth_branch_local_scenario() {
    let store = scenario_store();
    let result = FpGrowth::new(MiningConfig::new(0.5)).mine(&store).unwrap();

    let singles: Vec<_> = result.level(1).unwrap().iter().collect();
    assert_eq!(singles, vec![(&[0][..], 3), (&[1][..], 3), (&[2][..], 3)]);

    // {a,c} and {b,c} are split across branches and stay below threshold
    let pairs: Vec<_> = result.level(2).unwrap().iter().collect();
    assert_eq!(pairs, vec![(&[0, 1][..], 2)]);
    assert_eq!(result.len(), 4);
}

#[test]
fn test_fp_growth_conditional_matches_apriori() {
    let store = scenario_store();
    let config = MiningConfig::new(0.5).with_extraction(Extraction::Conditional);

    let fp = FpGrowth::new(config.clone()).mine(&store).unwrap();
    let apriori = Apriori::new(config).mine(&store).unwrap();
    assert_eq!(fp.to_map(), apriori.to_map());
    assert_eq!(fp.len(), 6);
}

#[test]
fn test_fp_growth_simple_one_hot() {
    // Transactions: [[0,1], [0,1,2], [0,2], [1,2]]
    #[rustfmt::skip]
    let transactions = Array2::from_shape_vec(
        (4, 3),
        vec![
            1, 1, 0,  // Transaction 0: items 0, 1
            1, 1, 1,  // Transaction 1: items 0, 1, 2
            1, 0, 1,  // Transaction 2: items 0, 2
            0, 1, 1,  // Transaction 3: items 1, 2
        ],
    )
    .unwrap();

    let store = TransactionStore::from_one_hot(transactions.view());
    let config = MiningConfig::new(0.5).with_extraction(Extraction::Conditional);
    let result = FpGrowth::new(config).mine(&store).unwrap();

    let map = result.to_label_map(store.dictionary());
    assert_eq!(map.len(), 6);
    assert_eq!(map[&vec!["0".to_string(), "1".into()]], 2);
    assert!(!map.contains_key(&vec!["0".to_string(), "1".into(), "2".into()]));
}

#[test]
fn test_fp_growth_parallel_matches_serial() {
    let store = TransactionStore::from_transactions(vec![
        vec!["a", "b", "c", "d"],
        vec!["a", "b", "d"],
        vec!["b", "c", "d"],
        vec!["a", "c"],
        vec!["a", "b", "c", "d"],
        vec!["d"],
    ]);

    for extraction in [Extraction::BranchLocal, Extraction::Conditional] {
        let config = MiningConfig::new(0.3).with_extraction(extraction);
        let serial = FpGrowth::new(config.clone()).mine(&store).unwrap();
        let parallel = FpGrowth::new(config.with_parallel(true)).mine(&store).unwrap();
        assert_eq!(serial.to_map(), parallel.to_map());
    }
}

#[test]
fn test_fp_growth_empty_store() {
    let store = TransactionStore::from_transactions(Vec::<Vec<&str>>::new());
    let result = FpGrowth::new(MiningConfig::new(0.5)).mine(&store).unwrap();
    assert!(result.is_empty());

    let (tree, ordering) = build_fp_tree(&store, Threshold::Fraction(0.5)).unwrap();
    assert!(tree.is_empty());
    assert!(ordering.is_empty());
}

#[test]
fn test_empty_transactions_do_not_reach_tree() {
    let store = TransactionStore::from_transactions(vec![vec!["a"], vec![], vec!["a"]]);
    let (tree, ordering) = build_fp_tree(&store, Threshold::Fraction(0.5)).unwrap();
    assert_eq!(ordering.min_count(), 2);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.node(child(&tree, ROOT, 0)).count, 2);
}

#[test]
fn test_ordering_ties_follow_discovery() {
    let store = TransactionStore::from_transactions(vec![
        vec!["z", "y"],
        vec!["x", "y"],
        vec!["x", "z"],
        vec!["w"],
    ]);
    let ordering = ItemOrdering::from_store(&store, 2);

    // z=0, y=1, x=2 all count 2; w dropped
    assert_eq!(ordering.items(), vec![0, 1, 2]);
    assert_eq!(ordering.canonicalize(&[3, 2, 0]), vec![0, 2]);
    assert_eq!(ordering.count(1), Some(2));
    assert_eq!(ordering.rank(3), None);
}

#[test]
fn test_streaming_matches_one_shot() {
    let batches: Vec<Vec<Vec<&str>>> = vec![
        vec![vec!["a", "b"], vec!["a", "c"]],
        vec![vec!["a", "b", "c"], vec!["b", "c"]],
    ];

    let mut miner = StreamingMiner::new();
    for batch in &batches {
        miner.count_pass(batch.iter().cloned()).unwrap();
    }
    miner.finalize_counts(Threshold::Fraction(0.5)).unwrap();
    for batch in &batches {
        miner.build_pass(batch.iter().cloned()).unwrap();
    }
    miner.finalize_building().unwrap();

    let store = TransactionStore::from_transactions(batches.concat());
    for extraction in [Extraction::BranchLocal, Extraction::Conditional] {
        let streamed = miner.mine(extraction, false).unwrap();
        let one_shot = FpGrowth::new(MiningConfig::new(0.5).with_extraction(extraction))
            .mine(&store)
            .unwrap();
        assert_eq!(streamed.to_map(), one_shot.to_map());
    }

    let stats = miner.stats();
    assert_eq!(stats.total_transactions, 4);
    assert_eq!(stats.unique_items, 3);
    assert_eq!(stats.frequent_items, 3);
    assert_eq!(stats.tree_nodes, 7);
}

#[test]
fn test_streaming_phase_errors() {
    let mut miner = StreamingMiner::new();

    assert!(matches!(
        miner.build_pass(vec![vec!["a"]]),
        Err(MiningError::InvalidPhase { operation: "build", .. })
    ));
    assert!(miner.mine(Extraction::BranchLocal, false).is_err());
    assert!(miner.finalize_building().is_err());

    miner.count_pass(vec![vec!["a"]]).unwrap();
    assert!(miner.finalize_counts(Threshold::Absolute(0)).is_err());
    assert_eq!(miner.phase(), ProcessingPhase::Counting);

    miner.finalize_counts(Threshold::Absolute(1)).unwrap();
    assert!(miner.count_pass(vec![vec!["a"]]).is_err());

    miner.build_pass(vec![vec!["a", "unseen"]]).unwrap();
    miner.finalize_building().unwrap();
    assert_eq!(miner.phase(), ProcessingPhase::ReadyToMine);

    let result = miner.mine(Extraction::BranchLocal, false).unwrap();
    assert_eq!(result.len(), 1);

    miner.reset();
    assert_eq!(miner.phase(), ProcessingPhase::Counting);
    assert_eq!(miner.stats().total_transactions, 0);
}
