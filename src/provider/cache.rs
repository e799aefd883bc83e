// src/provider/cache.rs
//! Fingerprint-keyed result caching.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{DataProvider, ProviderResult};
use crate::query::{fingerprint, QuerySpec, ResultSet};

/// Wraps a provider and memoizes completed results by query fingerprint.
///
/// Identical specs (same measures, dimensions, filters, pagination) hash
/// to the same key, so a dashboard with several panels sharing one query
/// only pays for the execution once. The cache never invalidates on its
/// own — it is scoped to one immutable dataset snapshot; rebind the
/// provider when the data changes.
pub struct CachingProvider<P> {
    inner: P,
    results: Mutex<HashMap<String, ResultSet>>,
}

impl<P> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        CachingProvider {
            inner,
            results: Mutex::new(HashMap::new()),
        }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }

    /// Drop every cached result.
    pub async fn clear(&self) {
        self.results.lock().await.clear();
    }

    /// Number of cached results.
    pub async fn len(&self) -> usize {
        self.results.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.results.lock().await.is_empty()
    }
}

#[async_trait]
impl<P: DataProvider> DataProvider for CachingProvider<P> {
    async fn execute(&self, spec: &QuerySpec) -> ProviderResult<ResultSet> {
        let key = fingerprint(spec)?;
        if let Some(hit) = self.results.lock().await.get(&key) {
            tracing::debug!(%key, "query cache hit");
            return Ok(hit.clone());
        }
        let result = self.inner.execute(spec).await?;
        self.results.lock().await.insert(key, result.clone());
        Ok(result)
    }
}
