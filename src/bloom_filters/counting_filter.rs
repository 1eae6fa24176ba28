use crate::bloom_filters::{ClearSlots, Filter, RemovableFilter, SlotStore};
use crate::error::{Error, Result};
use crate::hash::HashScheme;
use log::{debug, warn};

/// Bloom filter over integer counters, supporting removal.
///
/// Each counter equals the number of live occurrences hashing to its slot.
/// Updates are all-or-nothing: an add or remove that would overflow or
/// underflow any touched counter leaves the whole filter unchanged.
#[derive(Debug, Clone)]
pub struct CountingFilter {
    scheme: HashScheme,

    counters: Vec<u32>,
    // adds minus removes
    live: u64,
}

impl CountingFilter {
    /// Current value of the counter at `index`.
    pub fn counter(&self, index: usize) -> Option<u32> {
        self.counters.get(index).copied()
    }

    /// Occurrences added and not yet removed.
    pub fn live_occurrences(&self) -> u64 {
        self.live
    }

    pub fn clear(&mut self) {
        self.counters.fill(0);
        self.live = 0;
    }

    #[cfg(test)]
    pub(crate) fn set_counter(&mut self, index: usize, value: u32) {
        self.counters[index] = value;
    }
}

/// Groups indices into (index, occurrences) pairs, so that an element
/// hashing twice to one slot is checked against twice the count.
fn tally(indices: &[usize]) -> Vec<(usize, u32)> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    let mut tallies: Vec<(usize, u32)> = Vec::with_capacity(sorted.len());
    for idx in sorted {
        match tallies.last_mut() {
            Some((last, n)) if *last == idx => *n += 1,
            _ => tallies.push((idx, 1)),
        }
    }
    tallies
}

impl Filter for CountingFilter {
    fn with_scheme(scheme: HashScheme) -> Self {
        debug!(
            "creating counting filter: capacity={}, hashes={}",
            scheme.capacity(),
            scheme.num_hashes()
        );
        Self {
            counters: vec![0; scheme.capacity()],
            scheme,
            live: 0,
        }
    }

    fn scheme(&self) -> &HashScheme {
        &self.scheme
    }
}

impl SlotStore for CountingFilter {
    fn check_set(&self, indices: &[usize]) -> Result<()> {
        for (idx, needed) in tally(indices) {
            if self.counters[idx].checked_add(needed).is_none() {
                warn!("rejecting add: counter {} is full", idx);
                return Err(Error::CounterOverflow { index: idx });
            }
        }
        Ok(())
    }

    fn set_slots(&mut self, indices: &[usize]) {
        for &idx in indices {
            self.counters[idx] += 1;
        }
        self.live += 1;
    }

    fn test_slots(&self, indices: &[usize]) -> bool {
        indices.iter().all(|&idx| self.counters[idx] > 0)
    }
}

impl ClearSlots for CountingFilter {
    fn check_clear(&self, indices: &[usize]) -> Result<()> {
        for (idx, needed) in tally(indices) {
            if self.counters[idx] < needed {
                warn!(
                    "rejecting remove: counter {} holds {}, needs {}",
                    idx, self.counters[idx], needed
                );
                return Err(Error::CounterUnderflow { index: idx });
            }
        }
        Ok(())
    }

    fn clear_slots(&mut self, indices: &[usize]) {
        for &idx in indices {
            self.counters[idx] -= 1;
        }
        self.live = self.live.saturating_sub(1);
    }
}

impl RemovableFilter for CountingFilter {}
