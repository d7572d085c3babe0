//! Error types shared by both mining engines

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MiningError {
    #[error("Invalid support fraction {0}: expected a value in (0, 1]")]
    InvalidSupportFraction(f64),

    #[error("Invalid absolute support threshold {0}: expected at least 1")]
    InvalidSupportCount(usize),

    #[error("Cannot {operation} in phase {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: String,
    },

    #[error("Unknown item label: {0}")]
    UnknownItem(String),
}

impl MiningError {
    pub fn invalid_phase(operation: &'static str, phase: impl std::fmt::Debug) -> Self {
        MiningError::InvalidPhase {
            operation,
            phase: format!("{:?}", phase),
        }
    }

    /// True for both threshold variants.
    pub fn is_invalid_threshold(&self) -> bool {
        matches!(
            self,
            MiningError::InvalidSupportFraction(_) | MiningError::InvalidSupportCount(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MiningError>;
