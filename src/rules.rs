//! Association rule derivation from mined frequent itemsets
//!
//! For every frequent itemset of size ≥ 2, each member item is tried as the
//! right-hand side, and every non-empty subset of the remaining items as the
//! left-hand side. Subset enumeration is an iterative walk over bit
//! combinations rather than recursive construction. Each (lhs, rhs) split is
//! evaluated at most once across the whole run: the memo records evaluated
//! splits even when they miss the confidence threshold, so a failed split is
//! never retried through a different parent itemset.

use crate::basket::{Item, Itemset};
use crate::miner::{validate_ratio, FrequentItemset, MineError, Result};
use fnv::FnvHashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// An implication rule `lhs => rhs` with its confidence and the support of
/// the combined itemset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub lhs: Itemset,
    pub rhs: Item,
    pub confidence: f64,
    pub support: f64,
}

/// Derive all rules with confidence ≥ `min_confidence` from the frequent
/// itemsets produced by [`crate::miner::mine`].
///
/// Confidence is support(lhs ∪ {rhs}) / support(lhs); both lookups are
/// guaranteed to succeed for well-formed input because every subset of a
/// frequent itemset is itself frequent. Output is sorted by confidence
/// descending, then support descending, then canonical lhs/rhs order.
///
/// # Errors
///
/// [`MineError::InvalidParameter`] when `min_confidence` is outside (0, 1];
/// [`MineError::MissingSupport`] when a subset lookup fails, which signals a
/// candidate-pruning bug upstream rather than a user error.
pub fn derive_rules(frequent: &[FrequentItemset], min_confidence: f64) -> Result<Vec<Rule>> {
    validate_ratio("min-confidence", min_confidence)?;

    let supports: FnvHashMap<&Itemset, f64> =
        frequent.iter().map(|f| (&f.itemset, f.support)).collect();
    let mut evaluated: HashSet<(Itemset, Item)> = HashSet::new();
    let mut rules: Vec<Rule> = Vec::new();

    for f in frequent {
        if f.itemset.len() < 2 {
            continue;
        }
        for rhs in f.itemset.items() {
            let rest: Vec<Item> = f
                .itemset
                .items()
                .iter()
                .filter(|item| *item != rhs)
                .cloned()
                .collect();
            // Each set bit selects one item of `rest` into the lhs
            for mask in 1u64..(1u64 << rest.len()) {
                let lhs = Itemset::new(
                    rest.iter()
                        .enumerate()
                        .filter(|(idx, _)| mask & (1u64 << idx) != 0)
                        .map(|(_, item)| item.clone()),
                );
                let key = (lhs, rhs.clone());
                if evaluated.contains(&key) {
                    continue;
                }

                let combined = key.0.with_item(rhs);
                let combined_support = lookup(&supports, &combined)?;
                let lhs_support = lookup(&supports, &key.0)?;
                let confidence = combined_support / lhs_support;
                if confidence >= min_confidence {
                    rules.push(Rule {
                        lhs: key.0.clone(),
                        rhs: key.1.clone(),
                        confidence,
                        support: combined_support,
                    });
                }
                evaluated.insert(key);
            }
        }
    }

    rules.sort_by(compare_by_confidence);
    Ok(rules)
}

fn lookup(supports: &FnvHashMap<&Itemset, f64>, itemset: &Itemset) -> Result<f64> {
    supports
        .get(itemset)
        .copied()
        .ok_or_else(|| MineError::MissingSupport {
            itemset: itemset.to_string(),
        })
}

/// Confidence descending, then support descending, then canonical lhs/rhs
fn compare_by_confidence(a: &Rule, b: &Rule) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.support.partial_cmp(&a.support).unwrap_or(Ordering::Equal))
        .then_with(|| a.lhs.cmp(&b.lhs))
        .then_with(|| a.rhs.cmp(&b.rhs))
}
