//! Association rules derived from a [`SupportTable`](crate::itemsets::SupportTable).

mod rule;
mod search;

pub use rule::Rule;
pub use search::{generate_rules, sort_rules};
