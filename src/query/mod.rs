//! Query specs and results.
//!
//! A [`QuerySpec`] is the declarative description of what to fetch —
//! measures, dimensions, filters, pagination — exactly as the composer's
//! panel configuration emits it. Execution happens in
//! [`provider`](crate::provider); this module only defines the contract
//! plus a content fingerprint for caching identical queries.

mod result;
mod spec;

pub use result::{QueryMeta, ResultSet};
pub use spec::{AggregateOp, FilterClause, FilterOp, QuerySpec};

use sha2::{Digest, Sha256};

/// Compute a deterministic fingerprint for a query spec.
///
/// The spec is serialized to JSON before hashing. Two specs with the same
/// content always produce the same 64-character lowercase hex string, so
/// the fingerprint can key caches and de-duplicate in-flight queries.
///
/// # Errors
/// Returns an error if the spec cannot be serialized to JSON.
pub fn fingerprint(spec: &QuerySpec) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(spec)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
