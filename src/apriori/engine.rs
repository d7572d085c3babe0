use super::candidates::generate_candidates;
use crate::config::MiningConfig;
use crate::error::Result;
use crate::storage::{FrequentLevel, MiningResult};
use crate::support::count_support;
use crate::traits::ItemsetMiner;
use crate::transactions::TransactionStore;
use tracing::{debug, info};

/// Level-wise candidate generation and counting.
#[derive(Debug, Clone, Default)]
pub struct Apriori {
    config: MiningConfig,
}

impl Apriori {
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }
}

impl ItemsetMiner for Apriori {
    fn mine(&self, store: &TransactionStore) -> Result<MiningResult> {
        let num_transactions = store.len();
        let min_count = self.config.threshold.min_count(num_transactions)?;

        if store.is_empty() {
            debug!("no transactions, nothing to mine");
            return Ok(MiningResult::empty(0, min_count));
        }

        let mut levels = vec![frequent_singletons(store, min_count)];
        debug!(k = 1, frequent = levels[0].len(), "apriori level");

        let mut k = 2;
        while levels.last().is_some_and(|level| !level.is_empty()) {
            let candidates = generate_candidates(&levels[k - 2], k);
            if candidates.is_empty() {
                debug!(k, "no candidates survived pruning");
                break;
            }

            let counts = count_support(&candidates, store, self.config.parallel);
            let mut level = FrequentLevel::new(k);
            for (candidate, count) in candidates.iter().zip(counts) {
                if count >= min_count {
                    level.add_itemset_with_support(candidate.clone(), count);
                }
            }
            debug!(k, candidates = candidates.len(), frequent = level.len(), "apriori level");

            levels.push(level);
            k += 1;
        }

        let result = MiningResult::new(levels, num_transactions, min_count);
        info!(
            transactions = num_transactions,
            min_count,
            itemsets = result.len(),
            "apriori finished"
        );
        Ok(result)
    }
}

/// Size-1 level in item id order.
pub fn frequent_singletons(store: &TransactionStore, min_count: usize) -> FrequentLevel {
    let mut counts = vec![0usize; store.num_items()];
    for transaction in store.transactions() {
        for &item in transaction {
            counts[item] += 1;
        }
    }

    let mut level = FrequentLevel::new(1);
    for (item, &count) in counts.iter().enumerate() {
        if count >= min_count {
            level.add_itemset_with_support(vec![item], count);
        }
    }
    level
}
