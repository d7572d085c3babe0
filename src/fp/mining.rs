use super::builder::build_conditional_tree;
use super::combinations::generate_combinations_from_path;
use super::tree::{NodeId, PrefixTree, ROOT};
use crate::config::Extraction;
use crate::storage::{add_pattern_to_result, merge_levels, FrequentLevel};
use crate::transactions::{ItemId, Itemset};
use rayon::prelude::*;

/// Reads frequent itemsets back out of a built [`PrefixTree`].
#[derive(Debug, Clone, Copy)]
pub struct PatternMiner<'t> {
    tree: &'t PrefixTree,
    min_count: usize,
    parallel: bool,
}

impl<'t> PatternMiner<'t> {
    pub fn new(tree: &'t PrefixTree, min_count: usize) -> Self {
        Self {
            tree,
            min_count,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Mines the whole tree. `items` lists the tree's frequent items, most
    /// frequent first; only conditional extraction uses it.
    pub fn mine(&self, extraction: Extraction, items: &[ItemId]) -> Vec<FrequentLevel> {
        match extraction {
            Extraction::BranchLocal => {
                let mut levels = Vec::new();
                for (pattern, count) in self.branch_local(ROOT, &[]) {
                    add_pattern_to_result(pattern, count, &mut levels);
                }
                levels
            }
            Extraction::Conditional => self.conditional(self.tree, items, &[]),
        }
    }

    /// Depth-first walk below `start`: each child reaching the minimum count
    /// yields `prefix + child.item` with the child's own count and is then
    /// descended into. Patterns come out in pre-order, items in path order.
    ///
    /// Branches are independent, so a combination whose transactions were
    /// split over several branches only reports the count of one of them.
    pub fn branch_local(&self, start: NodeId, prefix: &[ItemId]) -> Vec<(Itemset, usize)> {
        let roots = self.qualifying_children(start);

        if self.parallel && roots.len() > 1 {
            let branches: Vec<Vec<(Itemset, usize)>> = roots
                .par_iter()
                .map(|&child| self.walk_from(child, prefix))
                .collect();
            branches.into_iter().flatten().collect()
        } else {
            roots
                .iter()
                .flat_map(|&child| self.walk_from(child, prefix))
                .collect()
        }
    }

    fn qualifying_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .children_of(id)
            .into_iter()
            .filter(|&child| self.tree.node(child).count >= self.min_count)
            .collect()
    }

    fn walk_from(&self, first: NodeId, prefix: &[ItemId]) -> Vec<(Itemset, usize)> {
        let mut found = Vec::new();
        let mut stack: Vec<(NodeId, Itemset)> = vec![(first, prefix.to_vec())];

        while let Some((id, mut pattern)) = stack.pop() {
            let node = self.tree.node(id);
            if let Some(item) = node.item {
                pattern.push(item);
            }
            found.push((pattern.clone(), node.count));

            for child in self.qualifying_children(id).into_iter().rev() {
                stack.push((child, pattern.clone()));
            }
        }
        found
    }

    /// Classical FP-Growth over conditional pattern bases.
    fn conditional(&self, tree: &PrefixTree, items: &[ItemId], alpha: &[ItemId]) -> Vec<FrequentLevel> {
        if tree.has_single_path() {
            let mut result = Vec::new();
            let path = tree.single_path();
            generate_combinations_from_path(&path, alpha, self.min_count, &mut result);
            return result;
        }

        let grow = |&item: &ItemId| -> Option<Vec<FrequentLevel>> {
            let support = tree.item_support(item);
            if support < self.min_count {
                return None;
            }

            let mut pattern = alpha.to_vec();
            pattern.push(item);
            let mut result = Vec::new();
            add_pattern_to_result(pattern.clone(), support, &mut result);

            let prefix_paths = tree.prefix_paths(item);
            if !prefix_paths.is_empty() {
                let (cond_tree, cond_items) = build_conditional_tree(&prefix_paths, self.min_count);
                if !cond_items.is_empty() {
                    let nested = self.conditional(&cond_tree, &cond_items, &pattern);
                    result = merge_levels([result, nested]);
                }
            }

            Some(result)
        };

        let parts: Vec<Vec<FrequentLevel>> = if self.parallel {
            items.par_iter().rev().filter_map(&grow).collect()
        } else {
            items.iter().rev().filter_map(&grow).collect()
        };

        merge_levels(parts)
    }
}
