use crate::error::Result;
use crate::hash::HashScheme;

pub(crate) mod sealed {
    use crate::error::Result;

    /// Slot storage behind a filter. Indices always come from the filter's
    /// own [`HashScheme`](crate::hash::HashScheme), so they are in bounds.
    pub trait SlotStore {
        /// Checks that `indices` can be recorded without mutating anything.
        fn check_set(&self, _indices: &[usize]) -> Result<()> {
            Ok(())
        }

        /// Records one occurrence in each of `indices`; `check_set` passed.
        fn set_slots(&mut self, indices: &[usize]);

        /// True iff every slot in `indices` is occupied.
        fn test_slots(&self, indices: &[usize]) -> bool;
    }

    pub trait ClearSlots: SlotStore {
        /// Checks that `indices` can be cleared without mutating anything.
        fn check_clear(&self, indices: &[usize]) -> Result<()>;

        /// Takes back one occurrence in each of `indices`; `check_clear` passed.
        fn clear_slots(&mut self, indices: &[usize]);
    }
}

use self::sealed::{ClearSlots, SlotStore};

/// A fixed-capacity filter addressed through a [`HashScheme`].
///
/// Implementors only provide slot storage; index derivation is shared so
/// that every variant hashes elements identically.
pub trait Filter: SlotStore {
    /// Creates an empty filter sized by `scheme`.
    fn with_scheme(scheme: HashScheme) -> Self
    where
        Self: Sized;

    fn scheme(&self) -> &HashScheme;

    /// Adds `element`, or leaves the filter untouched and returns the error
    /// when a slot cannot take another occurrence.
    fn add(&mut self, element: u64) -> Result<()> {
        let indices = self.scheme().derive_indices(element);
        self.check_set(&indices)?;
        self.set_slots(&indices);
        Ok(())
    }

    /// False means `element` was never added; true may be a false positive.
    fn probably_contains(&self, element: u64) -> bool {
        self.test_slots(&self.scheme().derive_indices(element))
    }

    /// Adds each element in turn, stopping at the first failure.
    fn add_all<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = u64>,
        Self: Sized,
    {
        for element in elements {
            self.add(element)?;
        }
        Ok(())
    }

    /// How many of `elements` probably belong to the filter.
    fn count_contained<I>(&self, elements: I) -> usize
    where
        I: IntoIterator<Item = u64>,
        Self: Sized,
    {
        elements
            .into_iter()
            .filter(|&element| self.probably_contains(element))
            .count()
    }

    fn capacity(&self) -> usize {
        self.scheme().capacity()
    }

    fn num_hashes(&self) -> usize {
        self.scheme().num_hashes()
    }

    /// p = (1 - e^(-kn/m))^k for `num_elements` distinct elements.
    fn estimated_false_positive_rate(&self, num_elements: usize) -> f64 {
        if num_elements == 0 {
            return 0.0;
        }
        let k = self.num_hashes() as f64;
        let n = num_elements as f64;
        let m = self.capacity() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }
}

/// A filter that can forget an element it was given.
pub trait RemovableFilter: Filter + ClearSlots {
    /// Removes one occurrence of `element`, or nothing at all when any of
    /// its slots is already empty.
    fn remove(&mut self, element: u64) -> Result<()> {
        let indices = self.scheme().derive_indices(element);
        self.check_clear(&indices)?;
        self.clear_slots(&indices);
        Ok(())
    }

    /// Removes each element in turn, stopping at the first failure.
    fn remove_all<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator<Item = u64>,
        Self: Sized,
    {
        for element in elements {
            self.remove(element)?;
        }
        Ok(())
    }
}
