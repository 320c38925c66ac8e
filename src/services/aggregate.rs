//! Concurrent fetch of independent reads, joined all-or-nothing.
//!
//! Every read in a set is started together on the calling task. The join
//! completes with every value once all reads succeed, or with the first
//! failure to complete; reads still in flight at that point are dropped.
//! There is no retry and no timeout.

use std::future::Future;

use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Named reads producing values of the same type.
pub struct FetchSet<'a, T, E> {
    pending: IndexMap<&'static str, BoxFuture<'a, Result<T, E>>>,
}

impl<'a, T, E> Default for FetchSet<'a, T, E> {
    fn default() -> Self {
        Self {
            pending: IndexMap::new(),
        }
    }
}

impl<'a, T: 'a, E: 'a> FetchSet<'a, T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a read under `key`. A key added twice keeps its first position
    /// and the last read.
    pub fn fetch<F>(mut self, key: &'static str, read: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
    {
        self.pending.insert(key, read.boxed());
        self
    }

    /// Run every read concurrently and collect the values under their keys.
    pub async fn join(self) -> Result<Bundle<T>, E> {
        let keys: Vec<&'static str> = self.pending.keys().copied().collect();

        let mut running: FuturesUnordered<_> = self
            .pending
            .into_iter()
            .map(|(key, read)| read.map(move |outcome| (key, outcome)))
            .collect();

        let mut done: IndexMap<&'static str, T> = IndexMap::with_capacity(keys.len());
        while let Some((key, outcome)) = running.next().await {
            done.insert(key, outcome?);
        }

        // Completion order is arbitrary; hand values back in declaration order.
        let values = keys
            .into_iter()
            .filter_map(|key| done.swap_remove(key).map(|value| (key, value)))
            .collect();
        Ok(Bundle(values))
    }
}

/// Values produced by a [`FetchSet`], keyed as declared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bundle<T>(IndexMap<&'static str, T>);

impl<T> Bundle<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &T)> {
        self.0.iter().map(|(key, value)| (*key, value))
    }
}

/// Run two reads of different types concurrently, failing fast.
pub async fn fetch_pair<A, B, E, FA, FB>(first: FA, second: FB) -> Result<(A, B), E>
where
    FA: Future<Output = Result<A, E>>,
    FB: Future<Output = Result<B, E>>,
{
    futures::future::try_join(first, second).await
}

/// A primary document and the documents that depend on it.
#[derive(Debug, Clone)]
pub struct Related<P, D> {
    pub primary: Option<P>,
    pub dependents: Vec<D>,
}

/// What a delete request should do after the dependency check.
#[derive(Debug, Clone, PartialEq)]
pub enum Deletion<P, D> {
    /// Nothing to delete
    Missing,
    /// Dependents exist; the primary must stay
    Blocked { primary: P, dependents: Vec<D> },
    /// No dependents; the primary can go
    Clear(P),
}

/// Fetch a primary document and its dependents concurrently.
pub async fn fetch_related<P, D, E, FP, FD>(primary: FP, dependents: FD) -> Result<Related<P, D>, E>
where
    FP: Future<Output = Result<Option<P>, E>>,
    FD: Future<Output = Result<Vec<D>, E>>,
{
    let (primary, dependents) = fetch_pair(primary, dependents).await?;
    Ok(Related {
        primary,
        dependents,
    })
}

impl<P, D> Related<P, D> {
    /// Detail pages: an absent primary is a 404.
    pub fn into_detail(self, what: &str) -> AppResult<(P, Vec<D>)> {
        match self.primary {
            Some(primary) => Ok((primary, self.dependents)),
            None => Err(AppError::NotFound(what.to_string())),
        }
    }

    /// Delete confirmation pages: `None` sends the visitor back to the list.
    pub fn into_confirmation(self) -> Option<(P, Vec<D>)> {
        self.primary.map(|primary| (primary, self.dependents))
    }

    pub fn into_deletion(self) -> Deletion<P, D> {
        match self.primary {
            None => Deletion::Missing,
            Some(primary) if self.dependents.is_empty() => Deletion::Clear(primary),
            Some(primary) => Deletion::Blocked {
                primary,
                dependents: self.dependents,
            },
        }
    }
}
