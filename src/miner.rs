//! Level-wise frequent-itemset mining (Apriori search)
//!
//! Orchestrates candidate generation and support counting level by level:
//! seed at k=1 by counting every distinct item, then repeat join/count/filter
//! until a level yields no frequent itemsets. Pure computation over a
//! read-only basket collection; no I/O, no retries.

use crate::basket::{Basket, Itemset};
use crate::{candidates, counter};
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// Errors that can abort a mining run
#[derive(Error, Debug)]
pub enum MineError {
    #[error("invalid value for {name}: {value} (must be in (0, 1])")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("no baskets supplied: support is undefined over an empty collection")]
    EmptyInput,

    #[error("no recorded support for itemset {itemset}: candidate pruning invariant violated")]
    MissingSupport { itemset: String },
}

/// Result type for mining operations
pub type Result<T> = std::result::Result<T, MineError>;

/// An itemset together with its support ratio (count / total baskets)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    pub support: f64,
}

/// Check that a threshold ratio lies in (0, 1].
///
/// Both thresholds are validated before mining starts so an invalid run
/// produces no partial output.
pub fn validate_ratio(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MineError::InvalidParameter { name, value })
    }
}

/// Find all itemsets with support ≥ `min_support` across `baskets`.
///
/// Returns every level's frequent itemsets, sorted by support descending
/// with the itemset's canonical order as tiebreak, so repeated runs on the
/// same input produce identical output regardless of map iteration order.
///
/// `threads` is the worker count for support counting (1 = sequential).
///
/// # Errors
///
/// [`MineError::InvalidParameter`] when `min_support` is outside (0, 1];
/// [`MineError::EmptyInput`] when `baskets` is empty, since support ratios
/// would divide by zero.
pub fn mine(baskets: &[Basket], min_support: f64, threads: usize) -> Result<Vec<FrequentItemset>> {
    validate_ratio("min-support", min_support)?;
    if baskets.is_empty() {
        return Err(MineError::EmptyInput);
    }
    let total = baskets.len() as f64;

    // Level 1: count distinct items directly, no candidate generation
    let mut level: Vec<FrequentItemset> = counter::count_items(baskets)
        .into_iter()
        .filter_map(|(item, count)| {
            let support = count as f64 / total;
            (support >= min_support).then(|| FrequentItemset {
                itemset: Itemset::singleton(item),
                support,
            })
        })
        .collect();
    debug!(frequent = level.len(), "level 1 complete");

    let mut all: Vec<FrequentItemset> = Vec::new();
    let mut k = 2usize;
    while !level.is_empty() {
        let previous: Vec<Itemset> = level.iter().map(|f| f.itemset.clone()).collect();
        all.append(&mut level);

        let generated = candidates::generate(&previous);
        let counts = counter::count_support_parallel(baskets, &generated, threads);
        level = counts
            .into_iter()
            .filter_map(|(itemset, count)| {
                let support = count as f64 / total;
                (support >= min_support).then_some(FrequentItemset { itemset, support })
            })
            .collect();
        debug!(
            level = k,
            candidates = generated.len(),
            frequent = level.len(),
            "level complete"
        );
        k += 1;
    }

    all.sort_by(compare_by_support);
    Ok(all)
}

/// Support descending, canonical itemset order ascending on ties
fn compare_by_support(a: &FrequentItemset, b: &FrequentItemset) -> Ordering {
    b.support
        .partial_cmp(&a.support)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.itemset.cmp(&b.itemset))
}
