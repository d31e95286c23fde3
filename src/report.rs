//! Rendering mined itemsets and rules.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    config::MiningConfig,
    error::Result,
    itemsets::{FrequentItemset, SupportTable},
    rules::{sort_rules, Rule},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEntry {
    pub antecedent: Vec<String>,
    pub consequent: String,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

/// Everything a run produced, in report order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub min_support: f64,
    pub min_confidence: f64,
    pub total_baskets: usize,
    pub itemsets: Vec<FrequentItemset>,
    pub rules: Vec<RuleEntry>,
}

impl Report {
    pub fn new(table: &SupportTable, mut rules: Vec<Rule>, config: &MiningConfig) -> Self {
        sort_rules(&mut rules);

        let rules = rules
            .iter()
            .map(|rule| RuleEntry {
                antecedent: table
                    .labels(&rule.antecedent)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                consequent: table.label(rule.consequent).unwrap_or_default().to_owned(),
                support: rule.support,
                confidence: rule.confidence,
                lift: rule.lift,
            })
            .collect();

        Self {
            min_support: config.min_support,
            min_confidence: config.min_confidence,
            total_baskets: table.total_baskets(),
            itemsets: table.sorted_entries(),
            rules,
        }
    }
}

pub fn write_report<W: Write>(mut writer: W, report: &Report, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(&mut writer, report)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

pub fn save_report(path: impl AsRef<Path>, report: &Report, format: ReportFormat) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_report(&mut writer, report, format)?;
    writer.flush()?;
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    writeln!(
        writer,
        "==Frequent itemsets (min_sup={:.0}%)",
        report.min_support * 100.0
    )?;
    for itemset in &report.itemsets {
        writeln!(
            writer,
            "[{}], {:.0}%",
            itemset.items.join(","),
            itemset.support * 100.0
        )?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "==High-confidence association rules (min_conf={:.0}%)",
        report.min_confidence * 100.0
    )?;
    for rule in &report.rules {
        writeln!(
            writer,
            "[{}] => [{}] (Conf: {:.1}%, Supp: {:.1}%)",
            rule.antecedent.join(","),
            rule.consequent,
            rule.confidence * 100.0,
            rule.support * 100.0
        )?;
    }
    Ok(())
}
