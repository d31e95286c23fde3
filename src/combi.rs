use itertools::Itertools;

use crate::types::{ItemId, Itemset, ItemsetCounts, ItemsetLength};

/// Join step: unions of two (size - 1)-itemsets whose sorted forms share their
/// first size - 2 items.
///
/// Output itemsets are sorted and unique.
/// https://github.com/tommyod/Efficient-Apriori/blob/master/efficient_apriori/itemsets.py
pub fn join_step(mut itemsets: Vec<Itemset>, size: ItemsetLength) -> Vec<Itemset> {
    if itemsets.is_empty() {
        return vec![];
    }

    itemsets.sort_unstable();
    itemsets.dedup();

    let mut final_itemsets: Vec<Itemset> = Vec::with_capacity(itemsets.len());
    let mut tail_items: Vec<ItemId> = Vec::with_capacity(itemsets.len());

    let mut i = 0;
    while i < itemsets.len() {
        let (last, prefix) = match itemsets[i].split_last() {
            Some(split) => split,
            None => {
                i += 1;
                continue;
            }
        };

        tail_items.clear();
        tail_items.push(*last);
        let mut skip = 1;

        // sorted, so every itemset sharing this prefix follows directly
        for other in &itemsets[i + 1..] {
            match other.split_last() {
                Some((other_last, other_prefix)) if other_prefix == prefix => {
                    tail_items.push(*other_last);
                    skip += 1;
                }
                _ => break,
            }
        }

        for (&a, &b) in tail_items.iter().tuple_combinations() {
            let mut candidate = Itemset::with_capacity(prefix.len() + 2);
            candidate.extend_from_slice(prefix);
            candidate.push(a);
            candidate.push(b);
            if candidate.len() == size {
                final_itemsets.push(candidate);
            }
        }

        i += skip;
    }

    final_itemsets
}

/// Prune step: drop candidates with any (k - 1)-subset missing from `prev`.
pub fn prune_step(candidates: Vec<Itemset>, prev: &ItemsetCounts) -> Vec<Itemset> {
    candidates
        .into_iter()
        .filter(|candidate| has_frequent_subsets(candidate, prev))
        .collect()
}

fn has_frequent_subsets(candidate: &[ItemId], prev: &ItemsetCounts) -> bool {
    // combinations keep the input order, so subsets stay canonical
    candidate
        .iter()
        .copied()
        .combinations(candidate.len().saturating_sub(1))
        .all(|subset| prev.contains_key(&subset))
}
