use super::mining::PatternMiner;
use super::ordering::ItemOrdering;
use super::tree::PrefixTree;
use crate::config::{Extraction, MiningConfig};
use crate::error::Result;
use crate::storage::{FrequentLevel, MiningResult};
use crate::traits::ItemsetMiner;
use crate::transactions::TransactionStore;
use tracing::{debug, info};

/// Prefix-tree based mining.
///
/// Singletons always carry exact counts from the item ordering; larger
/// itemsets come from the tree using the configured [`Extraction`].
#[derive(Debug, Clone, Default)]
pub struct FpGrowth {
    config: MiningConfig,
}

impl FpGrowth {
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }
}

impl ItemsetMiner for FpGrowth {
    fn mine(&self, store: &TransactionStore) -> Result<MiningResult> {
        let num_transactions = store.len();
        let min_count = self.config.threshold.min_count(num_transactions)?;

        if store.is_empty() {
            debug!("no transactions, nothing to mine");
            return Ok(MiningResult::empty(0, min_count));
        }

        let ordering = ItemOrdering::from_store(store, min_count);
        let tree = PrefixTree::build(store, &ordering);
        debug!(
            frequent_items = ordering.len(),
            nodes = tree.len(),
            "prefix tree built"
        );

        let levels = mine_levels(&tree, &ordering, min_count, self.config.extraction, self.config.parallel);
        let result = MiningResult::new(levels, num_transactions, min_count);
        info!(
            transactions = num_transactions,
            min_count,
            itemsets = result.len(),
            extraction = ?self.config.extraction,
            "fp-growth finished"
        );
        Ok(result)
    }
}

pub(crate) fn mine_levels(
    tree: &PrefixTree,
    ordering: &ItemOrdering,
    min_count: usize,
    extraction: Extraction,
    parallel: bool,
) -> Vec<FrequentLevel> {
    let mined = PatternMiner::new(tree, min_count)
        .with_parallel(parallel)
        .mine(extraction, &ordering.items());

    let mut levels = vec![ordering.to_level()];
    levels.extend(mined.into_iter().skip(1));
    levels
}
