//! Thread-shared filters with a single writer and many readers.

use crate::bloom_filters::{Filter, RemovableFilter};
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard};

/// A filter behind a read-write lock.
///
/// Writers hold the lock for the whole k-index update, so readers never
/// see an element with only some of its slots set.
#[derive(Debug)]
pub struct SharedFilter<F> {
    inner: RwLock<F>,
}

impl<F: Filter> SharedFilter<F> {
    pub fn new(filter: F) -> Self {
        Self {
            inner: RwLock::new(filter),
        }
    }

    pub fn add(&self, element: u64) -> Result<()> {
        self.inner.write().add(element)
    }

    pub fn probably_contains(&self, element: u64) -> bool {
        self.inner.read().probably_contains(element)
    }

    /// Read access for several queries under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, F> {
        self.inner.read()
    }

    pub fn into_inner(self) -> F {
        self.inner.into_inner()
    }
}

impl<F: RemovableFilter> SharedFilter<F> {
    pub fn remove(&self, element: u64) -> Result<()> {
        self.inner.write().remove(element)
    }
}
