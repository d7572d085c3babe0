use crate::storage::FrequentLevel;
use crate::transactions::{ItemId, Itemset, TransactionStore};
use std::collections::HashMap;

/// Frequent items sorted by descending count; ties keep first-discovery
/// order (ascending item id).
#[derive(Debug, Clone, Default)]
pub struct ItemOrdering {
    entries: Vec<(ItemId, usize)>,
    ranks: HashMap<ItemId, usize>,
    min_count: usize,
}

impl ItemOrdering {
    pub fn from_store(store: &TransactionStore, min_count: usize) -> Self {
        let mut counts = vec![0usize; store.num_items()];
        for transaction in store.transactions() {
            for &item in transaction {
                counts[item] += 1;
            }
        }
        Self::from_counts(counts.into_iter().enumerate(), min_count)
    }

    pub fn from_counts(counts: impl IntoIterator<Item = (ItemId, usize)>, min_count: usize) -> Self {
        let mut entries: Vec<(ItemId, usize)> = counts
            .into_iter()
            .filter(|&(_, count)| count > 0 && count >= min_count)
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let ranks = entries
            .iter()
            .enumerate()
            .map(|(rank, &(item, _))| (item, rank))
            .collect();

        Self {
            entries,
            ranks,
            min_count,
        }
    }

    pub fn entries(&self) -> &[(ItemId, usize)] {
        &self.entries
    }

    pub fn items(&self) -> Vec<ItemId> {
        self.entries.iter().map(|&(item, _)| item).collect()
    }

    pub fn rank(&self, item: ItemId) -> Option<usize> {
        self.ranks.get(&item).copied()
    }

    pub fn count(&self, item: ItemId) -> Option<usize> {
        self.rank(item).map(|rank| self.entries[rank].1)
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops infrequent items and sorts the rest by rank.
    pub fn canonicalize(&self, transaction: &[ItemId]) -> Itemset {
        let mut ranked: Vec<(usize, ItemId)> = transaction
            .iter()
            .filter_map(|&item| self.rank(item).map(|rank| (rank, item)))
            .collect();
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, item)| item).collect()
    }

    /// The ordering as the size-1 level, in rank order.
    pub fn to_level(&self) -> FrequentLevel {
        let mut level = FrequentLevel::new(1);
        for &(item, count) in &self.entries {
            level.add_itemset_with_support(vec![item], count);
        }
        level
    }
}
