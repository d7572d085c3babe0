use super::growth::mine_levels;
use super::ordering::ItemOrdering;
use super::tree::PrefixTree;
use crate::config::Extraction;
use crate::error::{MiningError, Result};
use crate::storage::MiningResult;
use crate::support::Threshold;
use crate::transactions::{matrix_to_transactions, ItemDictionary, ItemId};
use ndarray::ArrayView2;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingPhase {
    Counting,
    Building,
    ReadyToMine,
}

/// Two-pass FP pipeline over transaction batches.
///
/// The first pass counts items, the second inserts transactions into the
/// tree. Both passes must see the same batches for the counts in the
/// tree to be meaningful.
#[derive(Debug)]
pub struct StreamingMiner {
    dictionary: ItemDictionary,
    item_counts: HashMap<ItemId, usize>,
    num_transactions: usize,
    built_transactions: usize,
    min_count: usize,
    ordering: ItemOrdering,
    fp_tree: Option<PrefixTree>,
    phase: ProcessingPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingStats {
    pub total_transactions: usize,
    pub unique_items: usize,
    pub frequent_items: usize,
    pub tree_nodes: usize,
}

impl Default for StreamingMiner {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingMiner {
    pub fn new() -> Self {
        Self {
            dictionary: ItemDictionary::new(),
            item_counts: HashMap::new(),
            num_transactions: 0,
            built_transactions: 0,
            min_count: 0,
            ordering: ItemOrdering::default(),
            fp_tree: None,
            phase: ProcessingPhase::Counting,
        }
    }

    pub fn phase(&self) -> ProcessingPhase {
        self.phase
    }

    pub fn dictionary(&self) -> &ItemDictionary {
        &self.dictionary
    }

    /// Counting pass over one batch.
    pub fn count_pass<T, I, S>(&mut self, batch: T) -> Result<()>
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.phase != ProcessingPhase::Counting {
            return Err(MiningError::invalid_phase("count", self.phase));
        }

        for transaction in batch {
            self.num_transactions += 1;
            for item in self.dictionary.encode(transaction) {
                *self.item_counts.entry(item).or_insert(0) += 1;
            }
        }
        Ok(())
    }

    pub fn count_matrix(&mut self, chunk: ArrayView2<i32>) -> Result<()> {
        self.count_pass(matrix_to_transactions(chunk))
    }

    /// Fixes the item ordering and opens the building phase.
    pub fn finalize_counts(&mut self, threshold: Threshold) -> Result<()> {
        if self.phase != ProcessingPhase::Counting {
            return Err(MiningError::invalid_phase("finalize counts", self.phase));
        }

        self.min_count = threshold.min_count(self.num_transactions)?;
        self.ordering = ItemOrdering::from_counts(
            self.item_counts.iter().map(|(&item, &count)| (item, count)),
            self.min_count,
        );
        self.fp_tree = Some(PrefixTree::new());
        self.phase = ProcessingPhase::Building;

        debug!(
            transactions = self.num_transactions,
            min_count = self.min_count,
            frequent_items = self.ordering.len(),
            "counting finalized"
        );
        Ok(())
    }

    /// Building pass over one batch. Labels never seen while counting are
    /// infrequent by definition and dropped.
    pub fn build_pass<T, I, S>(&mut self, batch: T) -> Result<()>
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.phase != ProcessingPhase::Building {
            return Err(MiningError::invalid_phase("build", self.phase));
        }
        let Some(fp_tree) = self.fp_tree.as_mut() else {
            return Err(MiningError::invalid_phase("build", self.phase));
        };

        for transaction in batch {
            self.built_transactions += 1;
            let items = self.dictionary.encode_known(transaction);
            let canonical = self.ordering.canonicalize(&items);
            fp_tree.insert_transaction(&canonical, 1);
        }
        Ok(())
    }

    pub fn build_matrix(&mut self, chunk: ArrayView2<i32>) -> Result<()> {
        self.build_pass(matrix_to_transactions(chunk))
    }

    pub fn finalize_building(&mut self) -> Result<()> {
        if self.phase != ProcessingPhase::Building {
            return Err(MiningError::invalid_phase("finalize building", self.phase));
        }
        if self.built_transactions != self.num_transactions {
            warn!(
                counted = self.num_transactions,
                built = self.built_transactions,
                "building pass saw a different number of transactions than counting"
            );
        }
        self.phase = ProcessingPhase::ReadyToMine;
        Ok(())
    }

    pub fn mine(&self, extraction: Extraction, parallel: bool) -> Result<MiningResult> {
        if self.phase != ProcessingPhase::ReadyToMine {
            return Err(MiningError::invalid_phase("mine", self.phase));
        }
        let Some(fp_tree) = self.fp_tree.as_ref() else {
            return Err(MiningError::invalid_phase("mine", self.phase));
        };

        if self.num_transactions == 0 {
            return Ok(MiningResult::empty(0, self.min_count));
        }

        let levels = mine_levels(fp_tree, &self.ordering, self.min_count, extraction, parallel);
        Ok(MiningResult::new(levels, self.num_transactions, self.min_count))
    }

    pub fn stats(&self) -> StreamingStats {
        StreamingStats {
            total_transactions: self.num_transactions,
            unique_items: self.item_counts.len(),
            frequent_items: self.ordering.len(),
            tree_nodes: self.fp_tree.as_ref().map_or(0, PrefixTree::len),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
