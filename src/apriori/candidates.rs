use crate::storage::FrequentLevel;
use crate::transactions::{ItemId, Itemset};
use std::collections::HashSet;

/// Generates the size-`k` candidates implied by the frequent `(k-1)`-itemsets.
///
/// Every `k`-subset of the items appearing in `previous` is walked in
/// lexicographic order with an index odometer, and kept only if all of its
/// `(k-1)`-subsets are themselves in `previous`.
pub fn generate_candidates(previous: &FrequentLevel, k: usize) -> Vec<Itemset> {
    if k < 2 || previous.is_empty() {
        return Vec::new();
    }
    debug_assert_eq!(previous.itemset_size(), k - 1);

    let universe = item_universe(previous);
    let n = universe.len();
    if k > n {
        return Vec::new();
    }

    let frequent: HashSet<&[ItemId]> = previous.iter_itemsets().collect();
    let mut candidates = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    let mut candidate: Itemset = Vec::with_capacity(k);
    let mut subset: Itemset = Vec::with_capacity(k - 1);

    loop {
        candidate.clear();
        candidate.extend(indices.iter().map(|&idx| universe[idx]));

        if all_subsets_frequent(&candidate, &frequent, &mut subset) {
            candidates.push(candidate.clone());
        }

        // rightmost index that can still move
        let Some(pivot) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            break;
        };
        indices[pivot] += 1;
        for i in pivot + 1..k {
            indices[i] = indices[i - 1] + 1;
        }
    }

    candidates
}

/// Sorted distinct items across a level.
pub fn item_universe(level: &FrequentLevel) -> Vec<ItemId> {
    let mut universe: Vec<ItemId> = level.iter_itemsets().flatten().copied().collect();
    universe.sort_unstable();
    universe.dedup();
    universe
}

fn all_subsets_frequent(candidate: &[ItemId], frequent: &HashSet<&[ItemId]>, subset: &mut Itemset) -> bool {
    (0..candidate.len()).all(|skip| {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|&(pos, _)| pos != skip)
                .map(|(_, &item)| item),
        );
        frequent.contains(subset.as_slice())
    })
}
