use crate::error::{MiningError, Result};
use crate::transactions::{is_subset, Itemset, TransactionStore};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimum support, either relative to the transaction count or absolute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Fraction(f64),
    Absolute(usize),
}

impl Threshold {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Threshold::Fraction(fraction) => {
                if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 {
                    Ok(())
                } else {
                    Err(MiningError::InvalidSupportFraction(fraction))
                }
            }
            Threshold::Absolute(0) => Err(MiningError::InvalidSupportCount(0)),
            Threshold::Absolute(_) => Ok(()),
        }
    }

    /// Absolute count a set must reach in a collection of `num_transactions`.
    pub fn min_count(&self, num_transactions: usize) -> Result<usize> {
        self.validate()?;
        Ok(match *self {
            Threshold::Fraction(fraction) => min_support_count(fraction, num_transactions),
            Threshold::Absolute(count) => count,
        })
    }
}

impl From<f64> for Threshold {
    fn from(fraction: f64) -> Self {
        Threshold::Fraction(fraction)
    }
}

/// `ceil(fraction * n)`.
pub fn min_support_count(fraction: f64, num_transactions: usize) -> usize {
    (fraction * num_transactions as f64).ceil() as usize
}

/// Support as a fraction of the collection; zero when there are no transactions.
pub fn support_fraction(count: usize, num_transactions: usize) -> f64 {
    if num_transactions == 0 {
        0.0
    } else {
        count as f64 / num_transactions as f64
    }
}

/// Counts, for every candidate, the transactions containing it. The
/// returned vector is aligned with `candidates`.
pub fn count_support(candidates: &[Itemset], store: &TransactionStore, parallel: bool) -> Vec<usize> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let transactions = store.transactions();
    if parallel {
        transactions
            .par_iter()
            .fold(
                || vec![0usize; candidates.len()],
                |mut counts, transaction| {
                    tally(candidates, transaction, &mut counts);
                    counts
                },
            )
            .reduce(
                || vec![0usize; candidates.len()],
                |mut left, right| {
                    for (l, r) in left.iter_mut().zip(right) {
                        *l += r;
                    }
                    left
                },
            )
    } else {
        let mut counts = vec![0usize; candidates.len()];
        for transaction in transactions {
            tally(candidates, transaction, &mut counts);
        }
        counts
    }
}

fn tally(candidates: &[Itemset], transaction: &[usize], counts: &mut [usize]) {
    for (candidate, count) in candidates.iter().zip(counts.iter_mut()) {
        if is_subset(candidate, transaction) {
            *count += 1;
        }
    }
}

/// Brute-force count for a single itemset.
pub fn support_of(itemset: &[usize], store: &TransactionStore) -> usize {
    store
        .transactions()
        .iter()
        .filter(|transaction| is_subset(itemset, transaction))
        .count()
}
