use crate::support::Threshold;
use serde::{Deserialize, Serialize};

/// How itemsets are read back out of the prefix tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extraction {
    /// Walk root-to-leaf paths and report each qualifying path prefix with
    /// the count of its last node. Branches are never merged, so supports
    /// of combinations spread over several branches are under-reported.
    #[default]
    BranchLocal,
    /// Full FP-Growth over conditional pattern bases; exact supports.
    Conditional,
}

fn default_threshold() -> Threshold {
    Threshold::Fraction(0.5)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningConfig {
    #[serde(default = "default_threshold")]
    pub threshold: Threshold,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub extraction: Extraction,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            parallel: false,
            extraction: Extraction::default(),
        }
    }
}

impl MiningConfig {
    pub fn new(threshold: impl Into<Threshold>) -> Self {
        Self {
            threshold: threshold.into(),
            ..Self::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = extraction;
        self
    }
}
