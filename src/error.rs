use thiserror::Error;

pub type Result<T> = std::result::Result<T, AprioriError>;

#[derive(Debug, Error)]
pub enum AprioriError {
    #[error("Minimum support must be in (0, 1], got {0}")]
    InvalidSupport(f64),

    #[error("Minimum confidence must be in (0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("Maximum itemset length must be at least 1")]
    InvalidMaxLen,

    #[error("No baskets to mine: support is undefined")]
    EmptyBaskets,

    /// A subset of a frequent itemset is missing from the support table: the
    /// antecedent of a rule (or its count is zero), or the consequent
    /// singleton that lift is computed from. The rule is skipped.
    #[error("Support table is missing a subset of {itemset:?}")]
    IntegrityViolation { itemset: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AprioriError {
    /// Bad thresholds or data, as opposed to I/O failures or broken invariants.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidSupport(_)
                | Self::InvalidConfidence(_)
                | Self::InvalidMaxLen
                | Self::EmptyBaskets
        )
    }
}
