use crate::bloom_filters::{Filter, SlotStore};
use crate::hash::HashScheme;
use bit_vec::BitVec;
use log::debug;

/// Bloom filter over single-bit slots.
///
/// Bits are never cleared, so an added element is always found again.
#[derive(Debug, Clone)]
pub struct BitFilter {
    scheme: HashScheme,

    storage: BitVec,
}

impl BitFilter {
    /// Number of slots currently set.
    pub fn bits_set(&self) -> usize {
        self.storage.iter().filter(|bit| *bit).count()
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }
}

impl Filter for BitFilter {
    fn with_scheme(scheme: HashScheme) -> Self {
        debug!(
            "creating bit filter: capacity={}, hashes={}",
            scheme.capacity(),
            scheme.num_hashes()
        );
        Self {
            storage: BitVec::from_elem(scheme.capacity(), false),
            scheme,
        }
    }

    fn scheme(&self) -> &HashScheme {
        &self.scheme
    }
}

impl SlotStore for BitFilter {
    fn set_slots(&mut self, indices: &[usize]) {
        for &idx in indices {
            self.storage.set(idx, true);
        }
    }

    fn test_slots(&self, indices: &[usize]) -> bool {
        for &idx in indices {
            if self.storage.get(idx) != Some(true) {
                return false;
            }
        }
        true
    }
}
