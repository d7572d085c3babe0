//! Common interface of the mining engines

use crate::error::Result;
use crate::storage::MiningResult;
use crate::transactions::TransactionStore;

/// A frequent itemset mining algorithm.
///
/// Implementations read the store only; running the same miner twice on
/// the same store yields the same result.
pub trait ItemsetMiner {
    fn mine(&self, store: &TransactionStore) -> Result<MiningResult>;
}
