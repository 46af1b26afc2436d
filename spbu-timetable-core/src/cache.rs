use std::future::Future;

use crate::{Error, Result};

/// Whether an operation may answer from a previously fetched catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    UseCache,
    /// Refetch even if a value is cached.
    Reload,
}

/// In-memory state of a lazily fetched value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cached<T> {
    #[default]
    Unfetched,
    Fetched(T),
    /// A reload was forced; the old value is kept until it succeeds.
    Stale(T),
}

impl<T> Cached<T> {
    /// The fresh value, if any.
    pub fn fetched(&self) -> Option<&T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Unfetched | Self::Stale(_) => None,
        }
    }

    /// Any held value, fresh or stale.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Fetched(value) | Self::Stale(value) => Some(value),
            Self::Unfetched => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn store(&mut self, value: T) {
        *self = Self::Fetched(value);
    }

    /// Mark a fetched value stale so the next read refetches it.
    pub fn invalidate(&mut self) {
        *self = match std::mem::replace(self, Self::Unfetched) {
            Self::Fetched(value) | Self::Stale(value) => Self::Stale(value),
            Self::Unfetched => Self::Unfetched,
        };
    }

    /// Answer from the cache when `policy` allows it, otherwise run `fetch`.
    ///
    /// A failed fetch leaves a previously held value in the `Stale` state.
    pub async fn get_or_fetch<F, Fut>(&mut self, policy: CachePolicy, fetch: F) -> Result<&T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if policy == CachePolicy::Reload || !self.is_fetched() {
            self.invalidate();
            let value = fetch().await?;
            self.store(value);
        }
        self.fetched()
            .ok_or_else(|| Error::Internal("cache entry not populated after fetch".to_string()))
    }
}
