pub mod builder;
pub mod combinations;
pub mod growth;
pub mod mining;
pub mod ordering;
pub mod streaming;
pub mod tree;

pub use builder::{build_conditional_tree, build_fp_tree};
pub use growth::FpGrowth;
pub use mining::PatternMiner;
pub use ordering::ItemOrdering;
pub use streaming::{ProcessingPhase, StreamingMiner, StreamingStats};
pub use tree::{NodeId, PrefixTree, TreeNode, ROOT};

#[cfg(test)]
mod tests;
