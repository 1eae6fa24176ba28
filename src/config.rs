//! Construction parameters for filters and coded banks.

use crate::bloom_filters::Filter;
use crate::coded::CodedFilterBank;
use crate::error::{Error, Result};
use crate::hash::{HashScheme, SaltSet};

/// Parameters shared by every filter variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Number of slots in each filter.
    /// Default: 10_000
    pub capacity: usize,

    /// Number of salts, one per hash function.
    /// Default: 3
    pub num_hashes: usize,

    /// Salts are drawn from `0..salt_range`.
    /// Default: 10_000_000
    pub salt_range: u64,

    /// Derive salts from this seed instead of the thread RNG.
    /// Default: None
    pub salt_seed: Option<u64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            num_hashes: 3,
            salt_range: 10_000_000,
            salt_seed: None,
        }
    }
}

impl FilterConfig {
    pub fn new(capacity: usize, num_hashes: usize) -> Self {
        Self {
            capacity,
            num_hashes,
            ..Default::default()
        }
    }

    /// Sets the seed salts are derived from.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.salt_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::invalid_configuration("capacity must be at least 1"));
        }
        if self.num_hashes == 0 {
            return Err(Error::invalid_configuration("hash count must be at least 1"));
        }
        if self.salt_range == 0 {
            return Err(Error::invalid_configuration("salt range must be at least 1"));
        }
        Ok(())
    }

    pub fn build_salts(&self) -> Result<SaltSet> {
        self.validate()?;
        match self.salt_seed {
            Some(seed) => SaltSet::from_seed(self.num_hashes, seed, self.salt_range),
            None => SaltSet::random(self.num_hashes, self.salt_range, &mut rand::thread_rng()),
        }
    }

    pub fn build_scheme(&self) -> Result<HashScheme> {
        HashScheme::new(self.capacity, self.build_salts()?)
    }

    /// Builds an empty filter of any variant.
    pub fn build<F: Filter>(&self) -> Result<F> {
        Ok(F::with_scheme(self.build_scheme()?))
    }
}

/// Parameters for a [`CodedFilterBank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedConfig {
    /// Number of labelled sets.
    pub num_sets: usize,

    /// Fixed filter count; derived from `num_sets` when None.
    /// Default: None
    pub num_filters: Option<usize>,

    /// Parameters of each filter in the bank.
    pub filter: FilterConfig,
}

impl CodedConfig {
    pub fn new(num_sets: usize, filter: FilterConfig) -> Self {
        Self {
            num_sets,
            num_filters: None,
            filter,
        }
    }

    pub fn with_filter_count(mut self, num_filters: usize) -> Self {
        self.num_filters = Some(num_filters);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_sets == 0 {
            return Err(Error::invalid_configuration("set count must be at least 1"));
        }
        if self.num_filters == Some(0) {
            return Err(Error::invalid_configuration("filter count must be at least 1"));
        }
        self.filter.validate()
    }

    pub fn build_bank<F: Filter>(&self) -> Result<CodedFilterBank<F>> {
        self.validate()?;
        let salts = self.filter.build_salts()?;
        match self.num_filters {
            Some(num_filters) => CodedFilterBank::with_filter_count(
                self.num_sets,
                num_filters,
                self.filter.capacity,
                salts,
            ),
            None => CodedFilterBank::new(self.num_sets, self.filter.capacity, salts),
        }
    }
}
