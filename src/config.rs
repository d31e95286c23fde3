use serde::Serialize;

use crate::error::{AprioriError, Result};

/// Thresholds for one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MiningConfig {
    pub min_support: f64,
    pub min_confidence: f64,
    /// Largest itemset size to mine. `None` mines until a level is empty.
    pub max_len: Option<usize>,
}

impl MiningConfig {
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self> {
        let config = Self {
            min_support,
            min_confidence,
            max_len: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_len(mut self, max_len: usize) -> Result<Self> {
        if max_len == 0 {
            return Err(AprioriError::InvalidMaxLen);
        }
        self.max_len = Some(max_len);
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        check_support(self.min_support)?;
        check_confidence(self.min_confidence)?;
        if self.max_len == Some(0) {
            return Err(AprioriError::InvalidMaxLen);
        }
        Ok(())
    }
}

fn is_fraction(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

pub(crate) fn check_support(min_support: f64) -> Result<()> {
    if is_fraction(min_support) {
        Ok(())
    } else {
        Err(AprioriError::InvalidSupport(min_support))
    }
}

pub(crate) fn check_confidence(min_confidence: f64) -> Result<()> {
    if is_fraction(min_confidence) {
        Ok(())
    } else {
        Err(AprioriError::InvalidConfidence(min_confidence))
    }
}
