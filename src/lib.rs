//! # freqmine
//!
//! Frequent itemset mining over labelled transactions with two
//! independent engines:
//!
//! - [`Apriori`]: level-wise candidate generation, subset pruning and
//!   exhaustive support counting.
//! - [`FpGrowth`]: a frequency-ordered prefix tree. The default
//!   [`Extraction::BranchLocal`] mode reads supports off single branches and
//!   may under-report itemsets whose transactions were split across
//!   branches; [`Extraction::Conditional`] runs full FP-Growth and agrees
//!   with Apriori.
//!
//! ```
//! use freqmine::{Apriori, ItemsetMiner, MiningConfig, TransactionStore};
//!
//! let store = TransactionStore::from_transactions(vec![
//!     vec!["a", "b"],
//!     vec!["a", "c"],
//!     vec!["a", "b", "c"],
//!     vec!["b", "c"],
//! ]);
//!
//! let result = Apriori::new(MiningConfig::new(0.5)).mine(&store).unwrap();
//! assert_eq!(result.level(2).unwrap().len(), 3);
//! assert!(result.level(3).is_none());
//! ```

pub mod apriori;
pub mod config;
pub mod error;
pub mod fp;
pub mod storage;
pub mod support;
pub mod traits;
pub mod transactions;

#[cfg(feature = "python")]
mod python;

pub use apriori::Apriori;
pub use config::{Extraction, MiningConfig};
pub use error::{MiningError, Result};
pub use fp::{FpGrowth, StreamingMiner};
pub use storage::{FrequentItemset, FrequentLevel, MiningResult};
pub use support::Threshold;
pub use traits::ItemsetMiner;
pub use transactions::{ItemDictionary, ItemId, Itemset, TransactionStore};
