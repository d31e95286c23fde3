use std::fmt::{Display, Formatter, Result};

use crate::{
    itemsets::SupportTable,
    types::{ItemId, Itemset},
};

/// `antecedent => consequent`, with the statistics of the union itemset.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: ItemId,
    /// Support of antecedent ∪ {consequent}.
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl Rule {
    /// Every (antecedent, consequent) split of a pattern with a single item
    /// on the right. The antecedents stay sorted.
    pub fn splits(pattern: &[ItemId]) -> impl Iterator<Item = (Itemset, ItemId)> + '_ {
        (0..pattern.len()).map(move |i| {
            let mut antecedent = pattern.to_vec();
            let consequent = antecedent.remove(i);
            (antecedent, consequent)
        })
    }

    /// The frequent itemset this rule was derived from.
    pub fn itemset(&self) -> Itemset {
        let mut itemset = self.antecedent.clone();
        itemset.push(self.consequent);
        itemset.sort_unstable();
        itemset
    }

    /// `[A,B] => [C]` using the labels from `table`.
    pub fn describe(&self, table: &SupportTable) -> String {
        format!(
            "[{}] => [{}]",
            table.labels(&self.antecedent).join(","),
            table.label(self.consequent).unwrap_or_default()
        )
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?} => {:?}", self.antecedent, [self.consequent])
    }
}
