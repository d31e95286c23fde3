//! Level-wise frequent itemset mining.

mod count;
mod table;

pub use count::{contains_all, encode_transactions, is_frequent};
pub use table::{FrequentItemset, SupportTable};

use tracing::{debug, debug_span, info};

use crate::{
    combi::{join_step, prune_step},
    config::MiningConfig,
    error::{AprioriError, Result},
    types::{Basket, Itemset},
};
use count::{
    convert_to_itemset_counts, generate_frequent_1_itemset_counts,
    generate_frequent_k_itemset_counts,
};

/// Generate frequent itemsets from a list of baskets.
///
/// Mines level by level: frequent (k - 1)-itemsets are joined into
/// k-candidates, candidates with an infrequent subset are pruned, and the rest
/// are counted against the baskets. Stops at the first empty level or at
/// `config.max_len`.
///
/// Fails with [`AprioriError::EmptyBaskets`] when there is nothing to mine,
/// since support has no denominator.
pub fn generate_frequent_itemsets(
    baskets: &[Basket],
    config: &MiningConfig,
) -> Result<SupportTable> {
    config.validate()?;
    if baskets.is_empty() {
        return Err(AprioriError::EmptyBaskets);
    }

    let total = baskets.len();
    let min_support = config.min_support;
    let max_len = config.max_len.unwrap_or(usize::MAX);

    info!(baskets = total, min_support, "Counting itemsets of length 1");
    let (inventory, mut transactions) = encode_transactions(baskets);
    let item_counts =
        generate_frequent_1_itemset_counts(&transactions, inventory.len(), min_support);
    debug!(
        items = inventory.len(),
        frequent = item_counts.len(),
        "Counted 1-itemsets"
    );

    let mut table =
        SupportTable::new(inventory, total).merge_level(1, convert_to_itemset_counts(item_counts));

    let mut size = 2;
    while size <= max_len {
        let _span = debug_span!("level", size).entered();

        let prev = match table.level(size - 1) {
            Some(prev) => prev,
            None => break,
        };

        let joined = join_step(prev.keys().cloned().collect::<Vec<Itemset>>(), size);
        let num_joined = joined.len();
        let candidates = prune_step(joined, prev);
        debug!(
            joined = num_joined,
            pruned = num_joined - candidates.len(),
            "Generated candidates"
        );
        if candidates.is_empty() {
            break;
        }

        // a transaction shorter than `size` cannot contain any candidate
        transactions.retain(|transaction| transaction.count_ones() >= size);
        let counts =
            generate_frequent_k_itemset_counts(&candidates, &transactions, total, min_support);
        info!(
            size,
            candidates = candidates.len(),
            frequent = counts.len(),
            "Counted itemsets"
        );
        if counts.is_empty() {
            break;
        }

        table = table.merge_level(size, counts);
        size += 1;
    }

    Ok(table)
}
