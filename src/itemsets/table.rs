use serde::Serialize;

use crate::types::{FrequentItemsets, Inventory, ItemId, Itemset, ItemsetCounts, ItemsetLength};

/// Every frequent itemset found by the miner, keyed by size, with its
/// support count over `total_baskets()` baskets.
///
/// The table only grows: the miner hands it from level to level by value and
/// merges each level's frequent itemsets in once counting is done.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportTable {
    inventory: Inventory,
    total: usize,
    levels: FrequentItemsets,
}

/// One row of the table, with labels resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub items: Vec<String>,
    pub count: u32,
    pub support: f64,
}

impl SupportTable {
    pub(crate) fn new(inventory: Inventory, total: usize) -> Self {
        Self {
            inventory,
            total,
            levels: FrequentItemsets::new(),
        }
    }

    pub(crate) fn merge_level(mut self, size: ItemsetLength, counts: ItemsetCounts) -> Self {
        if !counts.is_empty() {
            self.levels.entry(size).or_default().extend(counts);
        }
        self
    }

    pub fn total_baskets(&self) -> usize {
        self.total
    }

    /// Every label seen in the baskets, frequent or not, indexed by item id.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(|level| level.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the largest frequent itemset, 0 when the table is empty.
    pub fn max_len(&self) -> ItemsetLength {
        self.levels.keys().copied().max().unwrap_or(0)
    }

    pub fn level(&self, size: ItemsetLength) -> Option<&ItemsetCounts> {
        self.levels.get(&size)
    }

    /// Support count of a canonical (sorted) itemset.
    pub fn count(&self, itemset: &[ItemId]) -> Option<u32> {
        self.levels.get(&itemset.len())?.get(itemset).copied()
    }

    pub fn contains(&self, itemset: &[ItemId]) -> bool {
        self.count(itemset).is_some()
    }

    pub fn support(&self, itemset: &[ItemId]) -> Option<f64> {
        self.count(itemset).map(|count| self.fraction(count))
    }

    pub(crate) fn fraction(&self, count: u32) -> f64 {
        count as f64 / self.total as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, u32)> + '_ {
        self.levels
            .values()
            .flat_map(|level| level.iter().map(|(itemset, &count)| (itemset, count)))
    }

    pub fn label(&self, item: ItemId) -> Option<&str> {
        self.inventory.get(item).map(String::as_str)
    }

    pub fn labels(&self, itemset: &[ItemId]) -> Vec<&str> {
        itemset.iter().filter_map(|&item| self.label(item)).collect()
    }

    pub fn item_id(&self, label: &str) -> Option<ItemId> {
        self.inventory
            .binary_search_by(|known| known.as_str().cmp(label))
            .ok()
    }

    /// Canonical itemset for a set of labels, `None` if any label is unknown.
    pub fn itemset_of<S: AsRef<str>>(&self, labels: &[S]) -> Option<Itemset> {
        let mut itemset = labels
            .iter()
            .map(|label| self.item_id(label.as_ref()))
            .collect::<Option<Itemset>>()?;
        itemset.sort_unstable();
        itemset.dedup();
        Some(itemset)
    }

    pub fn support_of<S: AsRef<str>>(&self, labels: &[S]) -> Option<f64> {
        self.support(&self.itemset_of(labels)?)
    }

    /// Rows ordered by descending support, then ascending size, then
    /// lexicographic item order.
    pub fn sorted_entries(&self) -> Vec<FrequentItemset> {
        let mut entries: Vec<(&Itemset, u32)> = self.iter().collect();
        // same denominator everywhere, so counts order like supports
        entries.sort_unstable_by(|(a, a_count), (b, b_count)| {
            b_count
                .cmp(a_count)
                .then_with(|| a.len().cmp(&b.len()))
                .then_with(|| a.cmp(b))
        });

        entries
            .into_iter()
            .map(|(itemset, count)| FrequentItemset {
                items: self.labels(itemset).into_iter().map(str::to_owned).collect(),
                count,
                support: self.fraction(count),
            })
            .collect()
    }
}
