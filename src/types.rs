use bitvec::prelude::{BitVec, Lsb0};

use crate::{HashMap, HashSet};

pub type ItemId = usize;
pub type ItemName<'l> = &'l str;

/// Sorted item ids. Sorting is the canonical form used as a map key.
pub type Itemset = Vec<ItemId>;

pub type ReverseLookup<'l> = HashMap<ItemName<'l>, ItemId>;
/// Item id to label, indexed by id. Ids follow the lexicographic order of labels.
pub type Inventory = Vec<String>;

pub type Basket = HashSet<String>;
/// A basket encoded over the inventory; bit `i` is set iff item `i` is present.
pub type Transaction = BitVec<usize, Lsb0>;

pub type ItemCounts = HashMap<ItemId, u32>;
pub type ItemsetCounts = HashMap<Itemset, u32>;

pub type ItemsetLength = usize;
pub type FrequentItemsets = HashMap<ItemsetLength, ItemsetCounts>;
