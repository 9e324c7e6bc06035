//! Reference resolution primitives.
//!
//! The store cannot populate cross-collection references, so aggregates
//! dereference them here. Two disciplines apply everywhere:
//!
//! * batching — one `$in` round trip per referenced collection, never one
//!   query per id; `resolve_many` calls its fetch closure at most once;
//! * degradation — a dangling reference, store error, or timed-out lookup
//!   produces an absent entry, never a request failure. Only root entity
//!   fetches (handled by the callers directly) are fatal.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;

use bson::oid::ObjectId;

use crate::errors::AppError;
use crate::models::school::School;
use crate::models::sclass::SchoolClass;
use crate::models::subject::Subject;
use crate::models::teacher::Teacher;

/// Documents addressable by their storage id.
pub trait Keyed {
    fn key(&self) -> ObjectId;
}

impl Keyed for Subject {
    fn key(&self) -> ObjectId {
        self.id
    }
}

impl Keyed for Teacher {
    fn key(&self) -> ObjectId {
        self.id
    }
}

impl Keyed for SchoolClass {
    fn key(&self) -> ObjectId {
        self.id
    }
}

impl Keyed for School {
    fn key(&self) -> ObjectId {
        self.id
    }
}

/// Resolve a set of references in a single batched lookup.
///
/// Ids are deduplicated (first-seen order) before `fetch` is invoked exactly
/// once with the whole set; an empty set returns without calling `fetch` at
/// all. The result maps id to document, omitting ids with no match; callers
/// must treat omission as a dangling reference.
pub async fn resolve_many<T, F, Fut>(
    ids: &[ObjectId],
    timeout: Duration,
    fetch: F,
) -> HashMap<ObjectId, T>
where
    T: Keyed,
    F: FnOnce(Vec<ObjectId>) -> Fut,
    Fut: Future<Output = Result<Vec<T>, AppError>>,
{
    let mut seen = HashSet::with_capacity(ids.len());
    let deduped: Vec<ObjectId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
    if deduped.is_empty() {
        return HashMap::new();
    }

    match tokio::time::timeout(timeout, fetch(deduped)).await {
        Ok(Ok(documents)) => documents.into_iter().map(|d| (d.key(), d)).collect(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Batched reference lookup failed, degrading to empty");
            HashMap::new()
        }
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Batched reference lookup timed out, degrading to empty");
            HashMap::new()
        }
    }
}

/// Resolve a single optional reference, degrading to `None` on a dangling
/// id, store error, or timeout.
pub async fn resolve_one<T, F, Fut>(
    id: Option<ObjectId>,
    timeout: Duration,
    fetch: F,
) -> Option<T>
where
    F: FnOnce(ObjectId) -> Fut,
    Fut: Future<Output = Result<Option<T>, AppError>>,
{
    let id = id?;
    match tokio::time::timeout(timeout, fetch(id)).await {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, %id, "Reference lookup failed, degrading to absent");
            None
        }
        Err(_) => {
            tracing::warn!(%id, "Reference lookup timed out, degrading to absent");
            None
        }
    }
}

/// Resolve a dependent list lookup (e.g. all students of a class), degrading
/// to an empty list on error or timeout.
pub async fn resolve_list<T, F, Fut>(timeout: Duration, fetch: F) -> Vec<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, AppError>>,
{
    match tokio::time::timeout(timeout, fetch()).await {
        Ok(Ok(documents)) => documents,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Dependent list lookup failed, degrading to empty");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("Dependent list lookup timed out, degrading to empty");
            Vec::new()
        }
    }
}
