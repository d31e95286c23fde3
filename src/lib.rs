//! Frequent itemsets and association rules with the Apriori algorithm.
//!
//! ```no_run
//! use apriori::{apriori, load_baskets, MiningConfig};
//!
//! let baskets = load_baskets("baskets.csv")?;
//! let config = MiningConfig::new(0.6, 0.7)?;
//! let (table, rules) = apriori(&baskets, &config)?;
//! for rule in &rules {
//!     println!("{} ({:.2})", rule.describe(&table), rule.confidence);
//! }
//! # Ok::<(), apriori::AprioriError>(())
//! ```

use std::collections::{HashMap, HashSet};

pub mod basket;
pub mod combi;
pub mod config;
pub mod error;
pub mod itemsets;
pub mod report;
pub mod rules;
pub mod types;

#[cfg(feature = "python")]
mod wrapper;

pub use basket::{load_baskets, read_baskets};
pub use config::MiningConfig;
pub use error::{AprioriError, Result};
pub use itemsets::{generate_frequent_itemsets, FrequentItemset, SupportTable};
pub use report::{save_report, write_report, Report, ReportFormat};
pub use rules::{generate_rules, sort_rules, Rule};
pub use types::Basket;

/// Apriori algorithm for association rules.
///
/// Mines the frequent itemsets of `baskets` and derives every rule meeting
/// `config.min_confidence`. Nothing is returned unless both steps succeed.
pub fn apriori(baskets: &[Basket], config: &MiningConfig) -> Result<(SupportTable, Vec<Rule>)> {
    config.validate()?;
    let table = generate_frequent_itemsets(baskets, config)?;
    let rules = generate_rules(&table, config.min_confidence)?;
    Ok((table, rules))
}
