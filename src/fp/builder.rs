use super::ordering::ItemOrdering;
use super::tree::PrefixTree;
use crate::error::Result;
use crate::support::Threshold;
use crate::transactions::{ItemId, TransactionStore};
use std::collections::HashMap;

/// Orders the frequent items of `store` and inserts every transaction.
pub fn build_fp_tree(store: &TransactionStore, threshold: Threshold) -> Result<(PrefixTree, ItemOrdering)> {
    let min_count = threshold.min_count(store.len())?;
    let ordering = ItemOrdering::from_store(store, min_count);
    let tree = PrefixTree::build(store, &ordering);
    Ok((tree, ordering))
}

/// Builds the conditional tree for a pattern base. Items whose weighted
/// count falls short of `min_count` are dropped from every path; the
/// surviving paths keep their relative order.
///
/// Returns the tree and its frequent items, most frequent first.
pub fn build_conditional_tree(prefix_paths: &[(Vec<ItemId>, usize)], min_count: usize) -> (PrefixTree, Vec<ItemId>) {
    let mut item_counts: HashMap<ItemId, usize> = HashMap::new();

    for (path, count) in prefix_paths {
        for &item in path {
            *item_counts.entry(item).or_insert(0) += count;
        }
    }

    let mut conditional_tree = PrefixTree::new();

    for (path, count) in prefix_paths {
        let filtered_path: Vec<ItemId> = path
            .iter()
            .filter(|item| item_counts.get(item).is_some_and(|&c| c >= min_count))
            .copied()
            .collect();

        if !filtered_path.is_empty() {
            conditional_tree.insert_transaction(&filtered_path, *count);
        }
    }

    let frequent_items = conditional_frequent_items(&conditional_tree, min_count);
    (conditional_tree, frequent_items)
}

/// Items of `tree` with total support at least `min_count`, sorted by
/// descending support then item id.
pub fn conditional_frequent_items(tree: &PrefixTree, min_count: usize) -> Vec<ItemId> {
    let mut frequent_items: Vec<(ItemId, usize)> = tree
        .header_table()
        .keys()
        .map(|&item| (item, tree.item_support(item)))
        .filter(|&(_, count)| count >= min_count)
        .collect();

    frequent_items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    frequent_items.into_iter().map(|(item, _)| item).collect()
}
