//! Split configuration

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of a stratified split.
///
/// Deserializable so callers can embed it in their own configuration files:
///
/// ```
/// use stratsplit::SplitConfig;
///
/// let config: SplitConfig = serde_json::from_str(r#"{"stratify_columns": ["type"]}"#).unwrap();
/// assert_eq!(config.seed, stratsplit::DEFAULT_SEED);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Columns whose combined values define the strata
    pub stratify_columns: Vec<String>,
    /// Seed for the pseudo-random assignment
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl SplitConfig {
    /// Create a config for the given stratify columns with the default seed
    pub fn new<I, S>(stratify_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stratify_columns: stratify_columns.into_iter().map(Into::into).collect(),
            seed: DEFAULT_SEED,
        }
    }

    /// Override the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations that can never produce a split
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.stratify_columns.is_empty() {
            return Err(SplitError::NoStratifyColumns);
        }
        Ok(())
    }
}
