//! Data providers.
//!
//! A provider answers query specs with `{rows, meta}` results. The trait
//! is async for uniformity with remote providers; the local in-memory
//! implementation resolves synchronously inside the call — there is no
//! suspension point, no shared mutable state, and no cancellation to
//! manage.

mod cache;
mod local;

pub use cache::CachingProvider;
pub use local::LocalProvider;

use async_trait::async_trait;

use crate::error::EngineError;
use crate::query::{QuerySpec, ResultSet};

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, EngineError>;

/// Trait for executing query specs.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Execute one query spec against the provider's bound data.
    async fn execute(&self, spec: &QuerySpec) -> ProviderResult<ResultSet>;

    /// Execute several specs concurrently.
    ///
    /// Default implementation runs them in parallel using `join_all`,
    /// failing if any query failed.
    async fn execute_batch(&self, specs: &[QuerySpec]) -> ProviderResult<Vec<ResultSet>> {
        let futures: Vec<_> = specs.iter().map(|spec| self.execute(spec)).collect();
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}
