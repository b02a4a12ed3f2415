//! The structured store the simulator persists into.
//!
//! The store is only ever used through filtered reads, bulk inserts and
//! filtered partial updates. Every call either succeeds or surfaces a
//! persistence error immediately; there is no retry.

mod memory;
mod query;
mod rest;

pub use memory::MemoryStore;
pub use query::*;
pub use rest::RestStore;

use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

pub trait StoreTrait: Send + Sync + 'static {
    /// Rows of `table` matching `query`.
    fn select<T>(&self, table: &str, query: &Query) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send;

    /// Inserts `rows` and returns them as stored.
    fn insert<T, R>(&self, table: &str, rows: &[T]) -> impl Future<Output = Result<Vec<R>>> + Send
    where
        T: Serialize + Sync,
        R: DeserializeOwned + Send;

    /// Updates the fields present in `patch` on every row matching `query`
    /// and returns the updated rows. An empty result means nothing matched.
    fn patch<P, R>(
        &self,
        table: &str,
        query: &Query,
        patch: &P,
    ) -> impl Future<Output = Result<Vec<R>>> + Send
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send;
}
