use std::collections::HashSet;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyFrozenSet};

use crate::{apriori as run_apriori, sort_rules, AprioriError, MiningConfig, Rule, SupportTable};

/// (antecedent, consequent, support, confidence, lift)
type PyRule = (Vec<String>, String, f64, f64, f64);

impl From<AprioriError> for PyErr {
    fn from(err: AprioriError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn convert_supports(py: Python<'_>, table: &SupportTable) -> PyResult<Py<PyDict>> {
    let supports = PyDict::new(py);
    for (itemset, count) in table.iter() {
        let key = PyFrozenSet::new(py, &table.labels(itemset))?;
        supports.set_item(key, table.fraction(count))?;
    }
    Ok(supports.into())
}

fn convert_rules(table: &SupportTable, rules: &[Rule]) -> Vec<PyRule> {
    rules
        .iter()
        .map(|rule| {
            (
                table
                    .labels(&rule.antecedent)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                table.label(rule.consequent).unwrap_or_default().to_owned(),
                rule.support,
                rule.confidence,
                rule.lift,
            )
        })
        .collect()
}

/// Apriori algorithm for association rules.
#[pyfunction]
#[pyo3(
    name = "apriori",
    signature = (transactions, min_support, min_confidence, max_len = None)
)]
fn apriori_py(
    py: Python<'_>,
    transactions: Vec<HashSet<String>>,
    min_support: f64,
    min_confidence: f64,
    max_len: Option<usize>,
) -> PyResult<(Py<PyDict>, Vec<PyRule>)> {
    let mut config = MiningConfig::new(min_support, min_confidence)?;
    if let Some(max_len) = max_len {
        config = config.with_max_len(max_len)?;
    }

    let (table, mut rules) = py.allow_threads(|| run_apriori(&transactions, &config))?;
    sort_rules(&mut rules);

    Ok((convert_supports(py, &table)?, convert_rules(&table, &rules)))
}

#[pymodule]
fn apriori(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apriori_py, m)?)?;
    Ok(())
}
