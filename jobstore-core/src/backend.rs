//! Storage backend abstraction for the document store.
//!
//! [`StoreBackend`] is the narrow capability a typed collection needs from a
//! document database: insert one, insert many, find one, find many, and
//! disconnect. Everything vendor-specific lives behind it, so the collection
//! layer has no direct dependency on any database driver.
//!
//! # Examples
//!
//! ```ignore
//! use jobstore_core::{backend::StoreBackend, query::{Filter, Query}};
//! use bson::doc;
//!
//! let id = backend.insert_one(doc! { "title": "Engineer" }, "jobs").await?;
//! let rows = backend.find(Query::builder().filter(Filter::eq("_id", id)).build(), "jobs").await?;
//! ```

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use std::fmt::Debug;

use crate::{
    error::StoreResult,
    query::{Predicate, Query},
};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be safe to share between concurrent callers. A single
/// backend instance serves every typed collection of a process, and no caller
/// takes a lock around it.
///
/// # Identifiers
///
/// Documents inserted without an `_id` receive a fresh [`ObjectId`]. Ids issued
/// by one process increase monotonically, so sorting on `_id` yields insertion
/// order.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a single document and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`](crate::error::StoreError::Write) on constraint
    /// violation or connectivity loss.
    async fn insert_one(&self, document: Document, collection: &str) -> StoreResult<ObjectId>;

    /// Inserts documents in bulk and returns their identifiers in input order.
    ///
    /// Either every id is returned or an error is raised; a partial insertion is
    /// never reported as success.
    async fn insert_many(
        &self,
        documents: Vec<Document>,
        collection: &str,
    ) -> StoreResult<Vec<ObjectId>>;

    /// Returns the first document matching the predicate, if any.
    async fn find_one(&self, filter: Predicate, collection: &str) -> StoreResult<Option<Bson>>;

    /// Returns every document matching the query, honoring skip, limit and sort.
    ///
    /// No match yields an empty vector, never an error.
    async fn find(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>>;

    /// Releases the underlying connection.
    ///
    /// Calling this more than once, or on a backend that never connected, is a no-op.
    async fn disconnect(&self) -> StoreResult<()>;
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn insert_one(&self, document: Document, collection: &str) -> StoreResult<ObjectId> {
        (*self).insert_one(document, collection).await
    }

    async fn insert_many(
        &self,
        documents: Vec<Document>,
        collection: &str,
    ) -> StoreResult<Vec<ObjectId>> {
        (*self).insert_many(documents, collection).await
    }

    async fn find_one(&self, filter: Predicate, collection: &str) -> StoreResult<Option<Bson>> {
        (*self).find_one(filter, collection).await
    }

    async fn find(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        (*self).find(query, collection).await
    }

    async fn disconnect(&self) -> StoreResult<()> {
        (*self).disconnect().await
    }
}

/// Factory for dialing a backend.
///
/// The [`ConnectionProvider`](crate::connection::ConnectionProvider) consumes a
/// builder at most once per process.
#[async_trait]
pub trait StoreBackendBuilder: Send {
    type Backend: StoreBackend;

    /// Dials the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`](crate::error::StoreError::Connection) when
    /// the connection string is invalid or the store is unreachable.
    async fn build(self) -> StoreResult<Self::Backend>;
}
