//! Candidate generation: the Apriori join + prune step
//!
//! Produces the minimal superset of possibly-frequent size-k itemsets from
//! the frequent (k−1)-itemsets. The prune step eliminates candidates with an
//! infrequent (k−1)-subset before any basket scan, which is what keeps the
//! level-wise search tractable: support is anti-monotonic, so no superset of
//! an infrequent itemset can be frequent.

use crate::basket::Itemset;
use std::collections::HashSet;

/// Generate size-k candidates from the frequent (k−1)-itemsets.
///
/// Join step: two itemsets qualify when their canonical forms agree on the
/// first k−2 items and differ in the trailing item; the candidate is their
/// union. The same candidate can be reachable through more than one pair, so
/// results are deduplicated. Prune step: a candidate survives only if every
/// (k−1)-subset of it is present in `previous`.
///
/// `previous` must hold distinct itemsets of a single size (caller
/// invariant). Output is sorted in canonical order so downstream iteration
/// is deterministic.
pub fn generate(previous: &[Itemset]) -> Vec<Itemset> {
    if previous.is_empty() {
        return Vec::new();
    }

    let frequent: HashSet<&Itemset> = previous.iter().collect();
    let mut seen: HashSet<Itemset> = HashSet::new();

    for i in 0..previous.len() {
        for j in (i + 1)..previous.len() {
            let a = previous[i].items();
            let b = previous[j].items();
            let prefix = a.len() - 1;
            if a[..prefix] != b[..prefix] {
                continue;
            }
            // Same prefix, distinct trailing items: the union has size k
            let candidate = previous[i].with_item(&b[prefix]);
            if seen.contains(&candidate) {
                continue;
            }
            if survives_prune(&candidate, &frequent) {
                seen.insert(candidate);
            }
        }
    }

    let mut candidates: Vec<Itemset> = seen.into_iter().collect();
    candidates.sort();
    candidates
}

/// True when every (k−1)-subset of `candidate` is frequent
fn survives_prune(candidate: &Itemset, frequent: &HashSet<&Itemset>) -> bool {
    candidate
        .items()
        .iter()
        .all(|item| frequent.contains(&candidate.without_item(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itemset(items: &[&str]) -> Itemset {
        Itemset::new(items.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_generate_pairs_from_singletons() {
        let previous = vec![itemset(&["A"]), itemset(&["B"]), itemset(&["C"])];
        let candidates = generate(&previous);
        assert_eq!(
            candidates,
            vec![
                itemset(&["A", "B"]),
                itemset(&["A", "C"]),
                itemset(&["B", "C"]),
            ]
        );
    }

    #[test]
    fn test_generate_empty_input() {
        assert!(generate(&[]).is_empty());
    }

    #[test]
    fn test_generate_single_itemset_yields_nothing() {
        assert!(generate(&[itemset(&["A"])]).is_empty());
    }

    #[test]
    fn test_generate_joins_on_shared_prefix() {
        let previous = vec![itemset(&["A", "B"]), itemset(&["A", "C"])];
        let candidates = generate(&previous);
        // {A,B,C} is joinable but pruned: subset {B,C} is not frequent
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_generate_triple_when_all_subsets_frequent() {
        let previous = vec![
            itemset(&["A", "B"]),
            itemset(&["A", "C"]),
            itemset(&["B", "C"]),
        ];
        let candidates = generate(&previous);
        assert_eq!(candidates, vec![itemset(&["A", "B", "C"])]);
    }

    #[test]
    fn test_generate_skips_disjoint_prefixes() {
        let previous = vec![itemset(&["A", "B"]), itemset(&["C", "D"])];
        assert!(generate(&previous).is_empty());
    }

    #[test]
    fn test_generate_no_duplicates() {
        let previous = vec![
            itemset(&["A", "B"]),
            itemset(&["A", "C"]),
            itemset(&["A", "D"]),
            itemset(&["B", "C"]),
            itemset(&["B", "D"]),
            itemset(&["C", "D"]),
        ];
        let candidates = generate(&previous);
        let unique: HashSet<&Itemset> = candidates.iter().collect();
        assert_eq!(unique.len(), candidates.len());
        // All four triples have every pair frequent
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn test_generate_candidate_size_is_k() {
        let previous = vec![
            itemset(&["A", "B"]),
            itemset(&["A", "C"]),
            itemset(&["B", "C"]),
        ];
        for candidate in generate(&previous) {
            assert_eq!(candidate.len(), 3);
        }
    }

    #[test]
    fn test_generate_output_is_sorted() {
        let previous = vec![itemset(&["C"]), itemset(&["A"]), itemset(&["B"])];
        let candidates = generate(&previous);
        let mut sorted = candidates.clone();
        sorted.sort();
        assert_eq!(candidates, sorted);
    }
}
