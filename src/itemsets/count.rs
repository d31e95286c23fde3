#![allow(non_snake_case)]

use crate::types::{
    Basket, Inventory, ItemCounts, ItemId, Itemset, ItemsetCounts, ReverseLookup, Transaction,
};
use bitvec::prelude::*;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Intern every label and encode each basket as a bit vector over the inventory.
///
/// Ids are handed out in lexicographic label order, so the encoding does not
/// depend on the order of `raw_transactions`.
pub fn encode_transactions(raw_transactions: &[Basket]) -> (Inventory, Vec<Transaction>) {
    let labels: BTreeSet<&str> = raw_transactions
        .iter()
        .flat_map(|raw_transaction| raw_transaction.iter().map(String::as_str))
        .collect();

    let reverse_lookup: ReverseLookup = labels
        .iter()
        .enumerate()
        .map(|(item_id, &label)| (label, item_id))
        .collect();
    let num_items = reverse_lookup.len();

    let transactions = raw_transactions
        .iter()
        .map(|raw_transaction| {
            let mut transaction: Transaction = bitvec![usize, Lsb0; 0; num_items];
            for item in raw_transaction {
                transaction.set(reverse_lookup[item.as_str()], true);
            }
            transaction
        })
        .collect();

    let inventory: Inventory = labels.into_iter().map(str::to_owned).collect();

    (inventory, transactions)
}

/// Support is the fraction of all `N` baskets, compared as a float like the
/// threshold itself.
pub fn is_frequent(support_count: u32, N: usize, min_support: f64) -> bool {
    N > 0 && support_count as f64 / N as f64 >= min_support
}

pub fn contains_all(transaction: &Transaction, itemset: &[ItemId]) -> bool {
    itemset
        .iter()
        .all(|&item| transaction.get(item).map_or(false, |bit| *bit))
}

/// 1-itemset
/// space: O(n)
pub fn generate_frequent_1_itemset_counts(
    transactions: &[Transaction],
    num_items: usize,
    min_support: f64,
) -> ItemCounts {
    let N = transactions.len();
    let mut counts = vec![0_u32; num_items];

    for transaction in transactions {
        for item in transaction.iter_ones() {
            counts[item] += 1;
        }
    }

    // Prune
    counts
        .into_iter()
        .enumerate()
        .filter(|&(_, support_count)| is_frequent(support_count, N, min_support))
        .collect()
}

/// Count every candidate against every transaction and keep the frequent ones.
///
/// `N` is the total number of baskets, which may exceed `transactions.len()`
/// once short transactions have been dropped.
pub fn generate_frequent_k_itemset_counts(
    candidates: &[Itemset],
    transactions: &[Transaction],
    N: usize,
    min_support: f64,
) -> ItemsetCounts {
    candidates
        .par_iter()
        .filter_map(|candidate| {
            let candidate_count = transactions
                .par_iter()
                .filter(|transaction| contains_all(transaction, candidate))
                .count() as u32;
            if is_frequent(candidate_count, N, min_support) {
                Some((candidate.clone(), candidate_count))
            } else {
                None
            }
        })
        .collect()
}

pub fn convert_to_itemset_counts(item_counts: ItemCounts) -> ItemsetCounts {
    item_counts.into_iter().map(|(k, v)| (vec![k], v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    const A: &str = "Item A";
    const B: &str = "Item B";
    const C: &str = "Item C";
    const D: &str = "Item D";

    macro_rules! raw_transaction {
        ($($x:expr),*) => {
            {
                let mut set: Basket = Basket::new();
                $(set.insert($x.to_string());)*
                set
            }
        };
    }

    fn transactions(raw: &[&[ItemId]]) -> Vec<Transaction> {
        raw.iter()
            .map(|items| {
                let mut transaction: Transaction = bitvec![usize, Lsb0; 0; 16];
                for &item in *items {
                    transaction.set(item, true);
                }
                transaction
            })
            .collect()
    }

    #[test]
    fn update_counts() {
        let transactions = transactions(&[&[0, 1]]);
        let candidates = vec![vec![0], vec![1]];

        let frequent_itemsets =
            generate_frequent_k_itemset_counts(&candidates, &transactions, 1, 0.1);

        assert_eq!(frequent_itemsets, hashmap! { vec![0] => 1, vec![1] => 1 });
    }

    #[test]
    fn update_counts_with_min_support_1() {
        let transactions = transactions(&[&[10, 11], &[10, 12]]);
        let candidates = vec![vec![10], vec![11]];

        let frequent_itemsets =
            generate_frequent_k_itemset_counts(&candidates, &transactions, 2, 1.0);

        assert_eq!(frequent_itemsets, hashmap! {vec![10] => 2})
    }

    #[test]
    fn update_counts_with_min_support_0_5_2_itemset() {
        let transactions = transactions(&[
            &[10, 11],
            &[10, 15],
            &[10, 13],
            &[10, 13],
            &[10, 13],
            &[11, 13],
        ]);
        let candidates = vec![
            vec![10, 11],
            vec![10, 13],
            vec![10, 15],
            vec![11, 13],
            vec![11, 15],
        ];
        let frequent_itemsets =
            generate_frequent_k_itemset_counts(&candidates, &transactions, 6, 0.5);
        assert_eq!(frequent_itemsets, hashmap! { vec![10, 13] => 3});
    }

    #[test]
    fn support_is_relative_to_all_baskets() {
        // two short baskets were dropped before counting, N still covers them
        let transactions = transactions(&[&[10, 11], &[10, 11]]);
        let candidates = vec![vec![10, 11]];

        assert!(generate_frequent_k_itemset_counts(&candidates, &transactions, 4, 0.6).is_empty());
        assert_eq!(
            generate_frequent_k_itemset_counts(&candidates, &transactions, 4, 0.5),
            hashmap! { vec![10, 11] => 2 }
        );
    }

    #[test]
    fn one_itemset_counts_with_min_support_05() {
        let transactions = transactions(&[&[0, 1, 2], &[0], &[1], &[0, 2], &[3]]);
        let item_counts = generate_frequent_1_itemset_counts(&transactions, 4, 0.4);

        assert_eq!(item_counts, hashmap! { 0 => 3, 1 => 2, 2 => 2 });
    }

    #[test]
    fn encode_assigns_ids_in_label_order() {
        let raw_transactions = vec![raw_transaction![D, B], raw_transaction![A, C, B]];
        let (inventory, transactions) = encode_transactions(&raw_transactions);

        assert_eq!(inventory, vec![A, B, C, D]);
        assert_eq!(transactions[0].iter_ones().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(transactions[1].iter_ones().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn encode_is_independent_of_basket_order() {
        let forward = vec![raw_transaction![A, B], raw_transaction![C]];
        let backward = vec![raw_transaction![C], raw_transaction![B, A]];

        let (inventory_f, transactions_f) = encode_transactions(&forward);
        let (inventory_b, transactions_b) = encode_transactions(&backward);

        assert_eq!(inventory_f, inventory_b);
        assert_eq!(transactions_f[0], transactions_b[1]);
        assert_eq!(transactions_f[1], transactions_b[0]);
    }

    #[test]
    fn contains_all_checks_every_item() {
        let transactions = transactions(&[&[1, 4, 7]]);
        assert!(contains_all(&transactions[0], &[1, 7]));
        assert!(!contains_all(&transactions[0], &[1, 2]));
        assert!(!contains_all(&transactions[0], &[99]));
    }

    #[test]
    fn zero_baskets_are_never_frequent() {
        assert!(!is_frequent(0, 0, 0.1));
        assert!(is_frequent(3, 5, 0.6));
        assert!(!is_frequent(2, 5, 0.6));
    }

    #[test]
    fn test_convert_to_itemset_counts() {
        let item_counts: ItemCounts = hashmap! {
            13 => 3,
            10 => 0,
            11 => 5,
        };
        let itemset_counts = convert_to_itemset_counts(item_counts);

        let expected = hashmap! {
            vec![10] => 0,
            vec![11] => 5,
            vec![13] => 3,
        };

        assert_eq!(itemset_counts, expected);
    }
}
