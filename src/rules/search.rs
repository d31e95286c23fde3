use tracing::{debug, warn};

use crate::{
    config::check_confidence,
    error::{AprioriError, Result},
    itemsets::SupportTable,
    rules::rule::Rule,
    types::{ItemId, Itemset},
};

/// Generate single-consequent rules from every frequent itemset of size 2 or
/// more, keeping those with confidence of at least `min_confidence`.
pub fn generate_rules(table: &SupportTable, min_confidence: f64) -> Result<Vec<Rule>> {
    check_confidence(min_confidence)?;

    let rules: Vec<Rule> = table
        .iter()
        .filter(|(itemset, _)| itemset.len() > 1)
        .flat_map(|(itemset, count)| rules_from_itemset(itemset, count, table, min_confidence))
        .collect();

    debug!(rules = rules.len(), min_confidence, "Generated rules");
    Ok(rules)
}

/// Given a frequent itemset, find the rules that can be generated from it
fn rules_from_itemset(
    itemset: &[ItemId],
    union_count: u32,
    table: &SupportTable,
    min_confidence: f64,
) -> Vec<Rule> {
    Rule::splits(itemset)
        .filter_map(|(antecedent, consequent)| {
            match score(itemset, antecedent, consequent, union_count, table) {
                Ok(rule) => Some(rule),
                Err(err) => {
                    warn!(%err, "Skipping rule");
                    None
                }
            }
        })
        .filter(|rule| rule.confidence >= min_confidence)
        .collect()
}

fn score(
    itemset: &[ItemId],
    antecedent: Itemset,
    consequent: ItemId,
    union_count: u32,
    table: &SupportTable,
) -> Result<Rule> {
    // the prune step guarantees both subsets, a miss means the table is broken
    let antecedent_count = table.count(&antecedent).filter(|&count| count > 0);
    let consequent_count = table.count(&[consequent]).filter(|&count| count > 0);

    let (antecedent_count, consequent_count) = match (antecedent_count, consequent_count) {
        (Some(a), Some(c)) => (a, c),
        _ => {
            return Err(AprioriError::IntegrityViolation {
                itemset: table.labels(itemset).into_iter().map(str::to_owned).collect(),
            })
        }
    };

    // count ratio equals the support ratio without the rounding of two divisions
    let confidence = union_count as f64 / antecedent_count as f64;
    Ok(Rule {
        antecedent,
        consequent,
        support: table.fraction(union_count),
        confidence,
        lift: confidence / table.fraction(consequent_count),
    })
}

/// Descending confidence, then descending support, then antecedent and
/// consequent in item order.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.support.total_cmp(&a.support))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn counter() -> SupportTable {
        let inventory = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        SupportTable::new(inventory, 20)
            .merge_level(
                1,
                hashmap! {
                    vec![1] => 9,
                    vec![2] => 8,
                    vec![3] => 12,
                    vec![4] => 13,
                },
            )
            .merge_level(
                2,
                hashmap! {
                    vec![1, 2] => 4,
                    vec![1, 3] => 5,
                    vec![1, 4] => 6,
                    vec![2, 3] => 3,
                    vec![2, 4] => 5,
                    vec![3, 4] => 3,
                },
            )
            .merge_level(
                3,
                hashmap! {
                    vec![1, 2, 3] => 3,
                    vec![1, 2, 4] => 3,
                    vec![1, 3, 4] => 3,
                    vec![2, 3, 4] => 3,
                },
            )
            .merge_level(4, hashmap! { vec![1, 2, 3, 4] => 2 })
    }

    fn split(rules: &[Rule]) -> Vec<(Itemset, ItemId)> {
        rules
            .iter()
            .map(|rule| (rule.antecedent.clone(), rule.consequent))
            .collect()
    }

    #[test]
    fn test_high_confidence() {
        let mut assoc_rules = generate_rules(&counter(), 0.8).unwrap();
        sort_rules(&mut assoc_rules);

        assert_eq!(
            split(&assoc_rules),
            vec![
                (vec![2, 3], 1),
                (vec![2, 3], 4),
                (vec![3, 4], 1),
                (vec![3, 4], 2),
            ]
        );
        assert!(assoc_rules.iter().all(|rule| rule.confidence == 1.0));
        assert!(assoc_rules.iter().all(|rule| rule.support == 0.15));
    }

    #[test]
    fn test_lower_confidence_admits_more() {
        let assoc_rules = generate_rules(&counter(), 0.6).unwrap();
        let splits = split(&assoc_rules);

        // 6 / 9 and 5 / 8
        assert!(splits.contains(&(vec![1], 4)));
        assert!(splits.contains(&(vec![2], 4)));
        // 2 / 3 from the 4-itemset
        assert!(splits.contains(&(vec![1, 2, 3], 4)));
        assert!(!splits.contains(&(vec![4], 1)));
        assert!(assoc_rules.iter().all(|rule| rule.confidence >= 0.6));
    }

    #[test]
    fn test_lift() {
        let assoc_rules = generate_rules(&counter(), 0.8).unwrap();
        let rule = assoc_rules
            .iter()
            .find(|rule| rule.antecedent == vec![2, 3] && rule.consequent == 1)
            .unwrap();

        // 1.0 / (9 / 20)
        assert!((rule.lift - 20.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn missing_antecedent_is_skipped() {
        let inventory = vec!["x".to_string(), "y".to_string()];
        let table = SupportTable::new(inventory, 4)
            .merge_level(1, hashmap! { vec![0] => 2 })
            .merge_level(2, hashmap! { vec![0, 1] => 2 });

        // y => x has no antecedent count, x => y has no consequent count for lift
        assert!(generate_rules(&table, 0.1).unwrap().is_empty());
    }

    #[test]
    fn missing_consequent_skips_only_its_rules() {
        let inventory = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let table = SupportTable::new(inventory, 4)
            .merge_level(1, hashmap! { vec![0] => 2, vec![1] => 3 })
            .merge_level(2, hashmap! { vec![0, 1] => 2, vec![1, 2] => 2 });
        let rules = generate_rules(&table, 0.1).unwrap();

        // only {x, y} is intact, z is never a usable antecedent or consequent
        assert_eq!(split(&rules).len(), 2);
        assert!(rules.iter().all(|rule| rule.itemset() == vec![0, 1]));
    }

    #[test]
    fn zero_count_is_skipped() {
        let inventory = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let table = SupportTable::new(inventory, 4)
            .merge_level(1, hashmap! { vec![0] => 0, vec![1] => 2, vec![2] => 2 })
            .merge_level(2, hashmap! { vec![0, 1] => 2, vec![1, 2] => 2 });
        let mut rules = generate_rules(&table, 0.1).unwrap();
        sort_rules(&mut rules);

        assert_eq!(split(&rules), vec![(vec![1], 2), (vec![2], 1)]);
    }

    #[test]
    fn invalid_confidence_is_an_error() {
        for bad in [0.0, 1.5, -0.2] {
            assert!(matches!(
                generate_rules(&counter(), bad),
                Err(AprioriError::InvalidConfidence(_))
            ));
        }
    }

    fn rule(antecedent: Itemset, consequent: ItemId, support: f64, confidence: f64) -> Rule {
        Rule {
            antecedent,
            consequent,
            support,
            confidence,
            lift: 1.0,
        }
    }

    #[test]
    fn test_sort_rules() {
        let mut rules = vec![
            rule(vec![2], 0, 0.5, 0.7),
            rule(vec![1], 0, 0.4, 0.9),
            rule(vec![0], 1, 0.5, 0.7),
            rule(vec![0], 1, 0.6, 0.7),
        ];
        sort_rules(&mut rules);

        assert_eq!(
            rules
                .iter()
                .map(|rule| (rule.antecedent[0], rule.support))
                .collect::<Vec<_>>(),
            vec![(1, 0.4), (0, 0.6), (0, 0.5), (2, 0.5)]
        );
    }
}
