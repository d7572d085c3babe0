use crate::storage::{add_pattern_to_result, FrequentLevel};
use crate::transactions::ItemId;

/// Adds `alpha ∪ c` for every non-empty combination `c` of the nodes on a
/// single-path tree. The support of a combination is the smallest count
/// among its nodes.
pub fn generate_combinations_from_path(
    path: &[(ItemId, usize)],
    alpha: &[ItemId],
    min_count: usize,
    result: &mut Vec<FrequentLevel>,
) {
    let mut current = Vec::with_capacity(path.len());
    for k in 1..=path.len() {
        generate_comb_recursive(path, k, 0, &mut current, alpha, min_count, result);
    }
}

fn generate_comb_recursive(
    path: &[(ItemId, usize)],
    k: usize,
    start: usize,
    current: &mut Vec<usize>,
    alpha: &[ItemId],
    min_count: usize,
    result: &mut Vec<FrequentLevel>,
) {
    if current.len() == k {
        let support = current.iter().map(|&idx| path[idx].1).min().unwrap_or(0);
        if support >= min_count {
            let mut pattern = Vec::with_capacity(alpha.len() + k);
            pattern.extend_from_slice(alpha);
            pattern.extend(current.iter().map(|&idx| path[idx].0));
            add_pattern_to_result(pattern, support, result);
        }
        return;
    }

    for i in start..path.len() {
        current.push(i);
        generate_comb_recursive(path, k, i + 1, current, alpha, min_count, result);
        current.pop();
    }
}
