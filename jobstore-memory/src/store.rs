//! In-memory storage implementation.
//!
//! Documents are kept as BSON values keyed by their hex `_id` inside async-aware
//! read-write locks.

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use mea::rwlock::RwLock;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use jobstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::ID_FIELD,
    error::{StoreError, StoreResult},
    query::{Predicate, Query, SortDirection},
};

use crate::evaluator::{DocumentEvaluator, compare_field};

type CollectionMap = HashMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and every clone shares the same data. Queries
/// scan the whole collection; there are no indexes.
///
/// After [`disconnect`](StoreBackend::disconnect) every operation fails with
/// [`StoreError::Connection`], mirroring a closed database client.
///
/// # Example
///
/// ```ignore
/// use jobstore_memory::InMemoryStore;
/// use jobstore_core::backend::StoreBackend;
/// use bson::doc;
///
/// let store = InMemoryStore::new();
/// let id = store.insert_one(doc! { "title": "Engineer" }, "jobs").await?;
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> (hex id -> document)
    store: Arc<RwLock<StoreMap>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder usable with a
    /// [`ConnectionProvider`](jobstore_core::connection::ConnectionProvider).
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("in-memory store is disconnected".to_string()));
        }
        Ok(())
    }

    /// Assigns an `_id` when the document has none and returns it.
    fn assign_id(document: &mut Document) -> StoreResult<ObjectId> {
        match document.get(ID_FIELD) {
            Some(Bson::ObjectId(id)) => Ok(*id),
            Some(other) => Err(StoreError::Write(format!(
                "unsupported _id type {:?}",
                other.element_type()
            ))),
            None => {
                let id = ObjectId::new();
                document.insert(ID_FIELD, id);
                Ok(id)
            }
        }
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_one(&self, document: Document, collection: &str) -> StoreResult<ObjectId> {
        let mut ids = self.insert_many(vec![document], collection).await?;
        ids.pop()
            .ok_or_else(|| StoreError::Write("insert acknowledged no document".to_string()))
    }

    async fn insert_many(
        &self,
        documents: Vec<Document>,
        collection: &str,
    ) -> StoreResult<Vec<ObjectId>> {
        self.ensure_open()?;

        let mut prepared = Vec::with_capacity(documents.len());
        for mut document in documents {
            let id = Self::assign_id(&mut document)?;
            prepared.push((id, document));
        }

        let mut store = self.store.write().await;
        let collection_map = store.entry(collection.to_string()).or_default();

        // Validate the whole batch before writing so a duplicate leaves nothing behind.
        let mut batch_keys = Vec::with_capacity(prepared.len());
        for (id, _) in &prepared {
            let key = id.to_hex();
            if collection_map.contains_key(&key) || batch_keys.contains(&key) {
                return Err(StoreError::Write(format!(
                    "duplicate key {key} in collection {collection}"
                )));
            }
            batch_keys.push(key);
        }

        let ids = prepared.iter().map(|(id, _)| *id).collect();
        for (key, (_, document)) in batch_keys.into_iter().zip(prepared) {
            collection_map.insert(key, Bson::Document(document));
        }

        Ok(ids)
    }

    async fn find_one(&self, filter: Predicate, collection: &str) -> StoreResult<Option<Bson>> {
        let mut rows = self
            .find(
                Query::builder()
                    .filter(filter)
                    .sort(ID_FIELD, SortDirection::Asc)
                    .limit(1)
                    .build(),
                collection,
            )
            .await?;

        Ok(rows.pop())
    }

    async fn find(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        self.ensure_open()?;

        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let mut matched = DocumentEvaluator::filter_documents(collection_map.values(), &query.filter)?;

        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| match sort.direction {
                SortDirection::Asc => compare_field(a, b, &sort.field),
                SortDirection::Desc => compare_field(b, a, &sort.field),
            });
        }

        Ok(matched
            .into_iter()
            .skip(query.offset.unwrap_or(0) as usize)
            .take(query.limit.map_or(usize::MAX, |limit| limit as usize))
            .collect())
    }

    async fn disconnect(&self) -> StoreResult<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("in-memory store disconnected");
        }
        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    seed: Option<InMemoryStore>,
}

impl InMemoryStoreBuilder {
    /// Hands out an existing store instead of a fresh one, so several providers
    /// can observe the same data.
    pub fn with_store(mut self, store: InMemoryStore) -> Self {
        self.seed = Some(store);
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(self.seed.unwrap_or_default())
    }
}
