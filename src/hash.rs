//! Salted digit-folding hash shared by every filter variant.
//!
//! An element id is combined with each salt by XOR, then folded: the
//! decimal representation is split after its first four digits and the two
//! halves are summed. The sum modulo the filter capacity is the slot index.
//! The transform is deterministic and reproducible, not collision resistant.

use crate::error::{Error, Result};
use rand::Rng;
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Values below this are lifted so that every folded value has at least
/// five decimal digits.
const FOLD_FLOOR: u64 = 10_000;

/// Number of leading decimal digits that form the first half of the fold.
const HEAD_DIGITS: u32 = 4;

/// Converts a signed id into an element id, rejecting negative values.
pub fn element_id(raw: i64) -> Result<u64> {
    u64::try_from(raw).map_err(|_| Error::InvalidElement(raw))
}

/// Folds a salted value: first four decimal digits plus the remaining digits.
///
/// `fold(42)` lifts 42 to 10042 and returns `1004 + 2 = 1006`.
pub fn fold(value: u64) -> u64 {
    let value = if value < FOLD_FLOOR {
        value + FOLD_FLOOR
    } else {
        value
    };
    let digits = value.ilog10() + 1;
    // splitting at 10^(digits - 4) is the same as slicing the decimal string
    let divisor = 10u64.pow(digits - HEAD_DIGITS);
    value / divisor + value % divisor
}

/// Derives one index per salt for `element`, in salt order.
///
/// Fails when `capacity` is zero.
pub fn derive_indices(element: u64, capacity: usize, salts: &[u64]) -> Result<Vec<usize>> {
    if capacity == 0 {
        return Err(Error::invalid_configuration("capacity must be at least 1"));
    }
    Ok(indices_unchecked(element, capacity, salts))
}

fn indices_unchecked(element: u64, capacity: usize, salts: &[u64]) -> Vec<usize> {
    salts
        .iter()
        .map(|salt| (fold(element ^ salt) % capacity as u64) as usize)
        .collect()
}

/// Ordered salts, one per hash function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltSet {
    salts: Vec<u64>,
}

impl SaltSet {
    /// Wraps explicit salts. At least one salt is required.
    pub fn new(salts: Vec<u64>) -> Result<Self> {
        if salts.is_empty() {
            return Err(Error::invalid_configuration("at least one hash function is required"));
        }
        Ok(Self { salts })
    }

    /// Draws `k` salts uniformly from `0..range`.
    pub fn random<R: Rng>(k: usize, range: u64, rng: &mut R) -> Result<Self> {
        Self::check_range(range)?;
        Self::new((0..k).map(|_| rng.gen_range(0..range)).collect())
    }

    /// Derives `k` salts in `0..range` from `seed`, so runs can be replayed.
    pub fn from_seed(k: usize, seed: u64, range: u64) -> Result<Self> {
        Self::check_range(range)?;
        let seed_bytes = seed.to_le_bytes();
        Self::new(
            (0..k as u64)
                .map(|i| xxh3_64_with_seed(&seed_bytes, i) % range)
                .collect(),
        )
    }

    fn check_range(range: u64) -> Result<()> {
        if range == 0 {
            return Err(Error::invalid_configuration("salt range must be at least 1"));
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.salts
    }

    /// Number of hash functions.
    pub fn len(&self) -> usize {
        self.salts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.salts.is_empty()
    }
}

/// Capacity and salts, validated once and then fixed for the filter's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashScheme {
    capacity: usize,
    salts: SaltSet,
}

impl HashScheme {
    pub fn new(capacity: usize, salts: SaltSet) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_configuration("capacity must be at least 1"));
        }
        Ok(Self { capacity, salts })
    }

    /// Slot indices for `element`, one per salt, each in `0..capacity`.
    pub fn derive_indices(&self, element: u64) -> Vec<usize> {
        indices_unchecked(element, self.capacity, self.salts.as_slice())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn salts(&self) -> &SaltSet {
        &self.salts
    }

    pub fn num_hashes(&self) -> usize {
        self.salts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fold_lifts_short_values() {
        assert_eq!(fold(42), 1006);
        assert_eq!(fold(0), 1000);
        assert_eq!(fold(9_999), 1999 + 9);
    }

    #[test]
    fn fold_splits_after_four_digits() {
        assert_eq!(fold(10_000), 1000);
        assert_eq!(fold(123_456_789), 1234 + 56_789);
        // leading zeros of the tail are dropped, as when parsing the digits
        assert_eq!(fold(100_005), 1000 + 5);
        assert_eq!(fold(u64::MAX), 1844 + 6_744_073_709_551_615);
    }

    #[test]
    fn known_index() {
        let indices = derive_indices(42, 100, &[0]).unwrap();
        assert_eq!(indices, vec![6]);
    }

    #[test]
    fn indices_follow_salt_order() {
        let salts = [0, 1, 7];
        let indices = derive_indices(42, 1_000_000, &salts).unwrap();
        let expected: Vec<usize> = salts.iter().map(|s| fold(42 ^ s) as usize).collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = derive_indices(42, 0, &[1]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));

        let salts = SaltSet::new(vec![1]).unwrap();
        assert!(HashScheme::new(0, salts).is_err());
    }

    #[test]
    fn capacity_one_maps_everything_to_zero() {
        let scheme = HashScheme::new(1, SaltSet::new(vec![3, 99, 12_345]).unwrap()).unwrap();
        for element in [0, 1, 42, 10_000, u64::MAX] {
            assert!(scheme.derive_indices(element).iter().all(|&i| i == 0));
        }
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert_eq!(element_id(-1), Err(Error::InvalidElement(-1)));
        assert_eq!(element_id(0), Ok(0));
        assert_eq!(element_id(i64::MAX), Ok(i64::MAX as u64));
    }

    #[test]
    fn empty_salts_are_rejected() {
        assert!(SaltSet::new(vec![]).is_err());
        assert!(SaltSet::from_seed(0, 1, 100).is_err());
    }

    #[test]
    fn seeded_salts_are_reproducible() {
        let a = SaltSet::from_seed(5, 2024, 10_000_000).unwrap();
        let b = SaltSet::from_seed(5, 2024, 10_000_000).unwrap();
        let c = SaltSet::from_seed(5, 2025, 10_000_000).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_slice().iter().all(|&s| s < 10_000_000));
    }

    #[test]
    fn random_salts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let salts = SaltSet::random(16, 1000, &mut rng).unwrap();
        assert_eq!(salts.len(), 16);
        assert!(salts.as_slice().iter().all(|&s| s < 1000));
        assert!(SaltSet::random(3, 0, &mut rng).is_err());
    }
}
