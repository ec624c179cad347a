use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{ClientOptions, FindOptions},
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use jobstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    query::{Predicate, Query, SortDirection},
};

use crate::query::MongoQueryTranslator;

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
    closed: Arc<AtomicBool>,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self {
            client,
            database,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn inserted_id(value: &Bson) -> StoreResult<ObjectId> {
        value
            .as_object_id()
            .ok_or_else(|| StoreError::Write(format!("store returned non-ObjectId id {value}")))
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_one(&self, document: Document, collection: &str) -> StoreResult<ObjectId> {
        let result = self
            .get_collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Self::inserted_id(&result.inserted_id)
    }

    async fn insert_many(
        &self,
        documents: Vec<Document>,
        collection: &str,
    ) -> StoreResult<Vec<ObjectId>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let expected = documents.len();
        let result = self
            .get_collection(collection)
            .insert_many(documents)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        // inserted_ids is keyed by input position
        (0..expected)
            .map(|index| match result.inserted_ids.get(&index) {
                Some(id) => Self::inserted_id(id),
                None => Err(StoreError::Write(format!(
                    "bulk insert into {collection} did not acknowledge document {index}"
                ))),
            })
            .collect()
    }

    async fn find_one(&self, filter: Predicate, collection: &str) -> StoreResult<Option<Bson>> {
        Ok(self
            .get_collection(collection)
            .find_one(MongoQueryTranslator::translate(&filter)?)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .map(Bson::Document))
    }

    async fn find(&self, query: Query, collection: &str) -> StoreResult<Vec<Bson>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(
                i64::try_from(limit)
                    .map_err(|_| StoreError::Validation(format!("limit {limit} out of range")))?,
            );
        }
        if let Some(skip) = query.offset {
            options.skip = Some(skip);
        }
        if let Some(sort) = &query.sort {
            options.sort = Some(doc! {
                sort.field.clone(): match sort.direction {
                    SortDirection::Asc => 1,
                    SortDirection::Desc => -1,
                }
            })
        }

        Ok(self
            .get_collection(collection)
            .find(MongoQueryTranslator::translate(&query.filter)?)
            .with_options(options)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .into_iter()
            .map(Bson::Document)
            .collect())
    }

    async fn disconnect(&self) -> StoreResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // Client handles share one pool; shutting down a clone closes it for all.
        self.client.clone().shutdown().await;
        tracing::info!(database = %self.database, "mongodb client shut down");

        Ok(())
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
    timeout: Option<Duration>,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
            timeout: None,
        }
    }

    /// Bounds both socket connection and server selection.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if let Some(timeout) = self.timeout {
            options.connect_timeout = Some(timeout);
            options.server_selection_timeout = Some(timeout);
        }

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;

        // The driver connects lazily; ping so an unreachable store fails here.
        client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        tracing::info!(database = %self.database, "connected to mongodb");

        Ok(MongoDbStore::new(client, self.database))
    }
}
