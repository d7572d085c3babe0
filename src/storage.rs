use crate::support::support_fraction;
use crate::transactions::{ItemDictionary, ItemId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat itemset storage: one item buffer, an offset table and a support
/// per itemset.
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<ItemId>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<usize>,
}

/// All frequent itemsets of one size, in discovery order.
///
/// Levels are filled by the engines only; every stored itemset is sorted,
/// duplicate-free and exactly `itemset_size` long.
///
/// ```compile_fail
/// let mut level = freqmine::FrequentLevel::new(2);
/// level.add_itemset_with_support(vec![0, 0, 1], 1);
/// ```
#[derive(Debug, Clone)]
pub struct FrequentLevel {
    storage: ItemsetStorage,
    itemset_size: usize,
}

impl ItemsetStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_itemset_with_support(&mut self, mut items: Vec<ItemId>, support: usize) {
        items.sort_unstable();
        items.dedup();
        let start = self.items.len();
        self.items.extend_from_slice(&items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);
    }

    pub(crate) fn get_itemset(&self, idx: usize) -> &[ItemId] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub(crate) fn support(&self, idx: usize) -> usize {
        self.supports[idx]
    }

    pub(crate) fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Moves every itemset of `other` behind ours, rebasing its offsets.
    pub(crate) fn append(&mut self, other: ItemsetStorage) {
        let base = self.items.len();
        self.items.extend(other.items);
        self.offsets
            .extend(other.offsets.into_iter().map(|(start, len)| (start + base, len)));
        self.supports.extend(other.supports);
    }
}

impl FrequentLevel {
    pub(crate) fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn itemset_size(&self) -> usize {
        self.itemset_size
    }

    /// Callers pass sorted, duplicate-free itemsets of this level's size.
    pub(crate) fn add_itemset_with_support(&mut self, items: Vec<ItemId>, support: usize) -> usize {
        self.storage.add_itemset_with_support(items, support);
        let idx = self.storage.len() - 1;
        debug_assert_eq!(self.get_itemset(idx).len(), self.itemset_size);
        idx
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    pub fn get_itemset(&self, idx: usize) -> &[ItemId] {
        self.storage.get_itemset(idx)
    }

    pub fn support(&self, idx: usize) -> usize {
        self.storage.support(idx)
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[ItemId]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[ItemId], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.support(idx)))
    }

    pub(crate) fn merge(&mut self, other: FrequentLevel) {
        debug_assert_eq!(self.itemset_size, other.itemset_size);
        self.storage.append(other.storage);
    }
}

/// Appends `(itemset, support)` to the level matching its size, creating
/// intermediate levels as needed.
pub(crate) fn add_pattern_to_result(mut pattern: Vec<ItemId>, support: usize, result: &mut Vec<FrequentLevel>) {
    pattern.sort_unstable();
    pattern.dedup();
    let size = pattern.len();
    if size == 0 {
        return;
    }
    while result.len() < size {
        result.push(FrequentLevel::new(result.len() + 1));
    }
    result[size - 1].add_itemset_with_support(pattern, support);
}

/// Merges per-branch level vectors in order.
pub(crate) fn merge_levels(parts: impl IntoIterator<Item = Vec<FrequentLevel>>) -> Vec<FrequentLevel> {
    let mut merged: Vec<FrequentLevel> = Vec::new();
    for part in parts {
        for level in part {
            let size = level.itemset_size;
            while merged.len() < size {
                merged.push(FrequentLevel::new(merged.len() + 1));
            }
            merged[size - 1].merge(level);
        }
    }
    merged
}

/// One reported itemset with labels resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub items: Vec<String>,
    pub count: usize,
    pub support: f64,
}

/// Output of either engine.
#[derive(Debug, Clone)]
pub struct MiningResult {
    levels: Vec<FrequentLevel>,
    num_transactions: usize,
    min_count: usize,
}

impl MiningResult {
    pub(crate) fn new(mut levels: Vec<FrequentLevel>, num_transactions: usize, min_count: usize) -> Self {
        while levels.last().is_some_and(FrequentLevel::is_empty) {
            levels.pop();
        }
        Self {
            levels,
            num_transactions,
            min_count,
        }
    }

    pub(crate) fn empty(num_transactions: usize, min_count: usize) -> Self {
        Self::new(Vec::new(), num_transactions, min_count)
    }

    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    /// Level of `k`-itemsets; `None` past the largest size found.
    pub fn level(&self, k: usize) -> Option<&FrequentLevel> {
        k.checked_sub(1).and_then(|idx| self.levels.get(idx))
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All itemsets in discovery order: by level, then by insertion.
    pub fn iter(&self) -> impl Iterator<Item = (&[ItemId], usize)> {
        self.levels.iter().flat_map(|level| level.iter())
    }

    pub fn support_of(&self, itemset: &[ItemId]) -> Option<usize> {
        let mut sorted = itemset.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        self.level(sorted.len())?
            .iter()
            .find(|(items, _)| *items == sorted.as_slice())
            .map(|(_, count)| count)
    }

    pub fn support_fraction(&self, count: usize) -> f64 {
        support_fraction(count, self.num_transactions)
    }

    /// Itemset → count keyed by id sets.
    pub fn to_map(&self) -> BTreeMap<Vec<ItemId>, usize> {
        self.iter().map(|(items, count)| (items.to_vec(), count)).collect()
    }

    /// Itemset → count keyed by lexicographically sorted labels, so results
    /// from stores with different interning can be compared.
    pub fn to_label_map(&self, dictionary: &ItemDictionary) -> BTreeMap<Vec<String>, usize> {
        self.iter()
            .map(|(items, count)| {
                let mut labels = dictionary.labels_of(items);
                labels.sort();
                (labels, count)
            })
            .collect()
    }

    /// Every itemset ordered by ascending support count. The sort is
    /// stable, so equal counts keep discovery order.
    pub fn report(&self, dictionary: &ItemDictionary) -> Vec<FrequentItemset> {
        let mut report: Vec<FrequentItemset> = self
            .iter()
            .map(|(items, count)| FrequentItemset {
                items: dictionary.labels_of(items),
                count,
                support: self.support_fraction(count),
            })
            .collect();
        report.sort_by_key(|entry| entry.count);
        report
    }
}
