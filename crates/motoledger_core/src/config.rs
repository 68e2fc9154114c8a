//! Contract configuration.

/// Configuration for a [`crate::Contract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Inclusive lower bound of the `queryAllRecords` scan.
    pub scan_start: String,

    /// Exclusive upper bound of the `queryAllRecords` scan.
    pub scan_end: String,

    /// Key prefix for seeded sample records (`<prefix>0`, `<prefix>1`, ...).
    pub seed_key_prefix: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            scan_start: "Record0".to_string(),
            scan_end: "Record999".to_string(),
            seed_key_prefix: "Record".to_string(),
        }
    }
}

impl ContractConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `queryAllRecords` scan range.
    #[must_use]
    pub fn scan_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.scan_start = start.into();
        self.scan_end = end.into();
        self
    }

    /// Sets the key prefix for seeded records.
    #[must_use]
    pub fn seed_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.seed_key_prefix = prefix.into();
        self
    }

    /// Returns the key for the `index`-th seeded record.
    pub fn seed_key(&self, index: usize) -> String {
        format!("{}{index}", self.seed_key_prefix)
    }
}
