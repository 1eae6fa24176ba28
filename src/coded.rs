//! Coded bloom filter: one bank of filters labelling elements with sets.
//!
//! Each set gets a binary code from a [`CodeBook`]. The bank holds one
//! filter per code position; an element of a set is added to every filter
//! whose position is a one in the set's code. Decoding queries all filters
//! and reads the answers back as a code.
//!
//! A filter serves every set with a one in its position, so storage grows
//! with the code length rather than the set count. The price is coupling:
//! a collision in a filter the element was never added to turns a zero bit
//! into a one and may decode to another set.

use crate::bloom_filters::{BitFilter, ClearSlots, Filter, RemovableFilter, SlotStore};
use crate::code::{CodeBook, SetCode};
use crate::error::{Error, Result};
use crate::hash::{HashScheme, SaltSet};
use log::{debug, trace};

/// Filters sharing one capacity and salt set, one per code position.
#[derive(Debug, Clone)]
pub struct CodedFilterBank<F: Filter = BitFilter> {
    scheme: HashScheme,
    filters: Vec<F>,
    codes: CodeBook,
}

impl<F: Filter> CodedFilterBank<F> {
    /// Builds a bank for `num_sets` sets with as many filters as the code
    /// length requires.
    pub fn new(num_sets: usize, capacity: usize, salts: SaltSet) -> Result<Self> {
        let scheme = HashScheme::new(capacity, salts)?;
        Ok(Self::from_parts(CodeBook::new(num_sets)?, scheme))
    }

    /// Builds a bank with a caller-chosen filter count, which must equal the
    /// code length `num_sets` requires.
    pub fn with_filter_count(
        num_sets: usize,
        num_filters: usize,
        capacity: usize,
        salts: SaltSet,
    ) -> Result<Self> {
        let scheme = HashScheme::new(capacity, salts)?;
        let codes = CodeBook::with_code_length(num_sets, num_filters)?;
        Ok(Self::from_parts(codes, scheme))
    }

    fn from_parts(codes: CodeBook, scheme: HashScheme) -> Self {
        debug!(
            "creating coded bank: sets={}, filters={}, capacity={}, hashes={}",
            codes.num_sets(),
            codes.code_length(),
            scheme.capacity(),
            scheme.num_hashes()
        );
        let filters = (0..codes.code_length())
            .map(|_| F::with_scheme(scheme.clone()))
            .collect();
        Self {
            scheme,
            filters,
            codes,
        }
    }

    fn check_code(&self, code: &SetCode) -> Result<()> {
        if code.len() != self.filters.len() {
            return Err(Error::CodeAssignmentOverflow {
                num_sets: self.codes.num_sets(),
                required: self.filters.len(),
                available: code.len(),
            });
        }
        if code.is_zero() {
            return Err(Error::invalid_code("the all-zero code marks absence"));
        }
        Ok(())
    }

    fn set_code(&self, set: usize) -> Result<SetCode> {
        self.codes.code_for(set).copied().ok_or_else(|| {
            Error::invalid_code(format!(
                "no code for set {set}, sets are numbered 1..={}",
                self.codes.num_sets()
            ))
        })
    }

    /// Adds `element` to every filter whose position is a one in `code`.
    ///
    /// Every selected filter is checked before any is touched, so a full
    /// counter leaves the bank unchanged.
    pub fn encode(&mut self, element: u64, code: &SetCode) -> Result<()> {
        self.check_code(code)?;
        trace!("encoding {} with code {}", element, code);
        let indices = self.scheme.derive_indices(element);
        for (filter, bit) in self.filters.iter().zip(code.bits()) {
            if bit {
                filter.check_set(&indices)?;
            }
        }
        for (filter, bit) in self.filters.iter_mut().zip(code.bits()) {
            if bit {
                filter.set_slots(&indices);
            }
        }
        Ok(())
    }

    /// Encodes `element` under the code of the 1-based `set`.
    pub fn encode_set(&mut self, element: u64, set: usize) -> Result<()> {
        let code = self.set_code(set)?;
        self.encode(element, &code)
    }

    /// Encodes every element of one set.
    pub fn encode_set_elements<I>(&mut self, set: usize, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = u64>,
    {
        let code = self.set_code(set)?;
        for element in elements {
            self.encode(element, &code)?;
        }
        Ok(())
    }

    /// Probes every filter and reads the answers back as a code.
    pub fn decode(&self, element: u64) -> SetCode {
        let indices = self.scheme.derive_indices(element);
        let value = self.filters.iter().fold(0u64, |acc, filter| {
            (acc << 1) | u64::from(filter.test_slots(&indices))
        });
        SetCode::from_raw(value, self.filters.len())
    }

    /// The set whose code `element` decodes to, if it decodes to one at all.
    pub fn lookup_set(&self, element: u64) -> Option<usize> {
        self.codes.set_for(&self.decode(element))
    }

    pub fn filter(&self, position: usize) -> Option<&F> {
        self.filters.get(position)
    }

    pub fn num_filters(&self) -> usize {
        self.filters.len()
    }

    pub fn code_book(&self) -> &CodeBook {
        &self.codes
    }

    pub fn scheme(&self) -> &HashScheme {
        &self.scheme
    }
}

impl<F: RemovableFilter> CodedFilterBank<F> {
    /// Takes `element` back out of every filter selected by `code`.
    ///
    /// Every selected filter is checked before any is touched, so an
    /// underflow leaves the bank unchanged.
    pub fn remove(&mut self, element: u64, code: &SetCode) -> Result<()> {
        self.check_code(code)?;
        let indices = self.scheme.derive_indices(element);
        for (filter, bit) in self.filters.iter().zip(code.bits()) {
            if bit {
                filter.check_clear(&indices)?;
            }
        }
        for (filter, bit) in self.filters.iter_mut().zip(code.bits()) {
            if bit {
                filter.clear_slots(&indices);
            }
        }
        Ok(())
    }

    /// Removes `element` under the code of the 1-based `set`.
    pub fn remove_set(&mut self, element: u64, set: usize) -> Result<()> {
        let code = self.set_code(set)?;
        self.remove(element, &code)
    }
}
