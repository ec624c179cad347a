use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    query::{Predicate, Query},
};

/// Scriptable backend recording every call it receives.
#[derive(Debug, Default)]
pub(crate) struct StubBackend {
    pub rows: Vec<Bson>,
    pub delay: Option<Duration>,
    pub fail_queries: bool,
    pub drop_last_insert_id: bool,
    pub queries: Mutex<Vec<Query>>,
    pub lookups: Mutex<Vec<Predicate>>,
    pub inserted: Mutex<Vec<Document>>,
    pub disconnects: AtomicUsize,
}

impl StubBackend {
    pub fn with_rows(rows: Vec<Bson>) -> Self {
        Self { rows, ..Self::default() }
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl StoreBackend for StubBackend {
    async fn insert_one(&self, document: Document, _collection: &str) -> StoreResult<ObjectId> {
        self.inserted.lock().unwrap().push(document);
        Ok(ObjectId::new())
    }

    async fn insert_many(
        &self,
        documents: Vec<Document>,
        _collection: &str,
    ) -> StoreResult<Vec<ObjectId>> {
        let mut ids = documents.iter().map(|_| ObjectId::new()).collect::<Vec<_>>();
        if self.drop_last_insert_id {
            ids.pop();
        }
        self.inserted.lock().unwrap().extend(documents);
        Ok(ids)
    }

    async fn find_one(&self, filter: Predicate, _collection: &str) -> StoreResult<Option<Bson>> {
        self.pause().await;
        self.lookups.lock().unwrap().push(filter);
        if self.fail_queries {
            return Err(StoreError::Query("stub failure".into()));
        }
        Ok(self.rows.first().cloned())
    }

    async fn find(&self, query: Query, _collection: &str) -> StoreResult<Vec<Bson>> {
        self.pause().await;
        self.queries.lock().unwrap().push(query);
        if self.fail_queries {
            return Err(StoreError::Query("stub failure".into()));
        }
        Ok(self.rows.clone())
    }

    async fn disconnect(&self) -> StoreResult<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
