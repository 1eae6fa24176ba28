//! Minimum-length binary codes for labelling sets.
//!
//! Set `i` (1-based) of `N` gets the binary representation of `i` padded to
//! `ceil(log2(N + 1))` bits, most significant bit first. The all-zero code
//! is never assigned and means "no set".

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

const MAX_CODE_LEN: usize = u64::BITS as usize;

/// A fixed-length bit string, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetCode {
    value: u64,
    len: usize,
}

impl SetCode {
    /// Builds a code of `len` bits holding `value`.
    pub fn new(value: u64, len: usize) -> Result<Self> {
        if len == 0 || len > MAX_CODE_LEN {
            return Err(Error::invalid_code(format!(
                "code length must be between 1 and {MAX_CODE_LEN}, got {len}"
            )));
        }
        if len < MAX_CODE_LEN && value >> len != 0 {
            return Err(Error::invalid_code(format!(
                "value {value} does not fit in {len} bits"
            )));
        }
        Ok(Self { value, len })
    }

    /// Assembles a code from bits given most significant first.
    pub fn from_bits<I>(bits: I) -> Result<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut value = 0u64;
        let mut len = 0;
        for bit in bits {
            if len == MAX_CODE_LEN {
                return Err(Error::invalid_code("code longer than 64 bits"));
            }
            value = (value << 1) | u64::from(bit);
            len += 1;
        }
        Self::new(value, len)
    }

    /// Caller guarantees `1 <= len <= 64` and that `value` fits.
    pub(crate) fn from_raw(value: u64, len: usize) -> Self {
        debug_assert!((1..=MAX_CODE_LEN).contains(&len));
        Self { value, len }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of bits; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the reserved "no set" code.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Bit at `position`, where position 0 is the most significant bit.
    pub fn bit(&self, position: usize) -> Option<bool> {
        if position >= self.len {
            return None;
        }
        Some((self.value >> (self.len - 1 - position)) & 1 == 1)
    }

    /// Bits in position order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |position| (self.value >> (self.len - 1 - position)) & 1 == 1)
    }

    /// Number of one bits.
    pub fn count_ones(&self) -> u32 {
        self.value.count_ones()
    }
}

impl fmt::Display for SetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for SetCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::invalid_code(format!(
                    "unexpected character {other:?} in {s:?}"
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        Self::from_bits(bits)
    }
}

/// Code length needed to give `num_sets` sets distinct non-zero codes.
pub fn code_length(num_sets: usize) -> Result<usize> {
    if num_sets == 0 {
        return Err(Error::invalid_configuration("set count must be at least 1"));
    }
    Ok((usize::BITS - num_sets.leading_zeros()) as usize)
}

/// Codes for sets `1..=num_sets`, in set order.
pub fn assign_codes(num_sets: usize) -> Result<Vec<SetCode>> {
    let len = code_length(num_sets)?;
    (1..=num_sets as u64).map(|set| SetCode::new(set, len)).collect()
}

/// The codes assigned to a fixed number of sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    codes: Vec<SetCode>,
    code_length: usize,
}

impl CodeBook {
    pub fn new(num_sets: usize) -> Result<Self> {
        let code_length = code_length(num_sets)?;
        Ok(Self {
            codes: assign_codes(num_sets)?,
            code_length,
        })
    }

    /// Like [`CodeBook::new`], but the caller fixes the code length up front.
    ///
    /// A length that differs from the one the set count needs is rejected:
    /// shorter codes cannot tell the sets apart and longer ones would not
    /// line up with the assigned values.
    pub fn with_code_length(num_sets: usize, len: usize) -> Result<Self> {
        let required = code_length(num_sets)?;
        if len != required {
            return Err(Error::CodeAssignmentOverflow {
                num_sets,
                required,
                available: len,
            });
        }
        Self::new(num_sets)
    }

    pub fn num_sets(&self) -> usize {
        self.codes.len()
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Code of the 1-based `set`.
    pub fn code_for(&self, set: usize) -> Option<&SetCode> {
        set.checked_sub(1).and_then(|i| self.codes.get(i))
    }

    /// The 1-based set owning `code`, if any.
    pub fn set_for(&self, code: &SetCode) -> Option<usize> {
        if code.len() != self.code_length || code.is_zero() {
            return None;
        }
        let set = code.value() as usize;
        (set <= self.codes.len()).then_some(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetCode> {
        self.codes.iter()
    }
}
