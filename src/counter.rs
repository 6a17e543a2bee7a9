//! Support counting for candidate itemsets
//!
//! Pure and stateless: given baskets and candidates, produce the number of
//! baskets each candidate occurs in. Re-invoked once per search level by the
//! miner. The parallel variant partitions baskets across scoped worker
//! threads with private count maps and merges the partial maps after the
//! join, so no locking is involved and the result is identical to the
//! sequential scan for any thread count.

use crate::basket::{Basket, Item, Itemset};
use fnv::FnvHashMap;

/// Map from candidate itemset to the number of baskets containing it
pub type SupportCounts = FnvHashMap<Itemset, usize>;

/// Count occurrences of every distinct single item across baskets.
///
/// Used to seed the level-1 frequent collection without candidate
/// generation.
pub fn count_items(baskets: &[Basket]) -> FnvHashMap<Item, usize> {
    let mut counts: FnvHashMap<Item, usize> = FnvHashMap::default();
    for basket in baskets {
        for item in basket {
            *counts.entry(item.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Count, for each candidate, how many baskets are supersets of it.
///
/// Zero candidates yield an empty map; zero baskets yield all-zero counts
/// (the caller guards the support division).
pub fn count_support(baskets: &[Basket], candidates: &[Itemset]) -> SupportCounts {
    let mut counts: SupportCounts = candidates.iter().map(|c| (c.clone(), 0)).collect();
    for basket in baskets {
        for candidate in candidates {
            if candidate.is_subset_of(basket) {
                // Entry is pre-seeded above
                if let Some(count) = counts.get_mut(candidate) {
                    *count += 1;
                }
            }
        }
    }
    counts
}

/// Parallel variant of [`count_support`]: partition baskets across `threads`
/// workers, each owning a private count map, then sum the partial maps.
///
/// Falls back to the sequential scan when a single thread is requested or
/// the basket collection is too small to split.
pub fn count_support_parallel(
    baskets: &[Basket],
    candidates: &[Itemset],
    threads: usize,
) -> SupportCounts {
    if threads <= 1 || baskets.len() < threads || candidates.is_empty() {
        return count_support(baskets, candidates);
    }

    let chunk_size = baskets.len().div_ceil(threads);
    let partials = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = baskets
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move |_| count_support(chunk, candidates)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("support counting worker panicked"))
            .collect::<Vec<SupportCounts>>()
    })
    .expect("support counting scope panicked");

    let mut merged: SupportCounts = candidates.iter().map(|c| (c.clone(), 0)).collect();
    for partial in partials {
        for (candidate, count) in partial {
            *merged.entry(candidate).or_insert(0) += count;
        }
    }
    merged
}
