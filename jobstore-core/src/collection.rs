//! Typed collections.
//!
//! A [`TypedCollection`] binds one entity type to one named collection on a
//! shared [`Connection`]. It holds no mutable state of its own, so a single
//! instance can serve every concurrent caller in the process.
//!
//! # Example
//!
//! ```ignore
//! let jobs = connection.typed_collection::<JobDetails>();
//!
//! let id = jobs.add_single(job).await?;
//! let stored = jobs.get_by_id(&id).await?;
//! let page = jobs.get(Filter::eq("location", "NYC"), 10, 1).await?;
//! ```

use bson::oid::ObjectId;
use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    connection::Connection,
    document::{Document, DocumentExt, ID_FIELD},
    error::{StoreError, StoreResult},
    page::PageRequest,
    query::{Filter, Predicate, Query, SortDirection},
};

/// Field holding a user's login name.
pub const USERNAME_FIELD: &str = "username";

#[derive(Debug)]
pub struct TypedCollection<B: StoreBackend, D: Document> {
    name: String,
    connection: Connection<B>,
    _marker: PhantomData<D>,
}

impl<B: StoreBackend, D: Document> Clone for TypedCollection<B, D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            connection: self.connection.clone(),
            _marker: PhantomData,
        }
    }
}

impl<B: StoreBackend, D: Document> TypedCollection<B, D> {
    pub(crate) fn new(name: String, connection: Connection<B>) -> Self {
        Self { name, connection, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the connection this collection runs on.
    pub fn connection(&self) -> &Connection<B> {
        &self.connection
    }

    /// Views the same collection as a different entity type.
    pub fn with_type<T: Document>(&self) -> TypedCollection<B, T> {
        TypedCollection {
            name: self.name.clone(),
            connection: self.connection.clone(),
            _marker: PhantomData,
        }
    }

    /// Inserts one entity and returns the identifier the store assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the store rejects the document.
    pub async fn add_single(&self, value: D) -> StoreResult<ObjectId> {
        let document = value.to_bson_document()?;
        let (backend, context) = self.connection.parts();

        let id = context
            .run("insert_one", backend.insert_one(document, &self.name))
            .await?;
        tracing::debug!(collection = %self.name, %id, "inserted document");

        Ok(id)
    }

    /// Inserts entities in bulk, returning their identifiers in input order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the store rejects the batch or
    /// acknowledges fewer documents than were sent.
    pub async fn add_many(&self, values: Vec<D>) -> StoreResult<Vec<ObjectId>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let documents = values
            .iter()
            .map(DocumentExt::to_bson_document)
            .collect::<StoreResult<Vec<_>>>()?;
        let expected = documents.len();
        let (backend, context) = self.connection.parts();

        let ids = context
            .run("insert_many", backend.insert_many(documents, &self.name))
            .await?;

        if ids.len() != expected {
            return Err(StoreError::Write(format!(
                "bulk insert into {} acknowledged {} of {} documents",
                self.name,
                ids.len(),
                expected
            )));
        }
        tracing::debug!(collection = %self.name, count = expected, "inserted documents");

        Ok(ids)
    }

    /// Looks up one entity by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no document has this id, which
    /// callers can tell apart from a failed query.
    pub async fn get_by_id(&self, id: &ObjectId) -> StoreResult<D> {
        let (backend, context) = self.connection.parts();

        match context
            .run("find_one", backend.find_one(Filter::eq(ID_FIELD, *id), &self.name))
            .await?
        {
            Some(document) => D::from_bson(document),
            None => Err(StoreError::NotFound {
                id: id.to_hex(),
                collection: self.name.clone(),
            }),
        }
    }

    /// Looks up an entity by username, falling back to `D::default()`.
    ///
    /// Zero matches is not an error here, unlike [`get_by_id`](Self::get_by_id).
    pub async fn get_by_user_name(&self, user_name: &str) -> StoreResult<D>
    where
        D: Default,
    {
        let (backend, context) = self.connection.parts();

        match context
            .run(
                "find_one",
                backend.find_one(Filter::eq(USERNAME_FIELD, user_name), &self.name),
            )
            .await?
        {
            Some(document) => {
                tracing::warn!(collection = %self.name, user_name, "username already exists");
                D::from_bson(document)
            }
            None => Ok(D::default()),
        }
    }

    /// Runs a filtered, paged query ordered by identifier.
    ///
    /// See [`PageRequest::window`] for how `page_size` and `page_number` map
    /// to skip and limit. No match yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for negative paging parameters before
    /// the store is contacted, and [`StoreError::Query`] if the find fails.
    pub async fn get(
        &self,
        filter: Predicate,
        page_size: i64,
        page_number: i64,
    ) -> StoreResult<Vec<D>> {
        let window = PageRequest::new(page_size, page_number).window()?;
        tracing::debug!(
            collection = %self.name,
            skip = window.skip,
            limit = window.limit,
            "querying page"
        );

        let query = Query::builder()
            .filter(filter)
            .window(window)
            .sort(ID_FIELD, SortDirection::Asc)
            .build();
        let (backend, context) = self.connection.parts();

        context
            .run("find", backend.find(query, &self.name))
            .await?
            .into_iter()
            .map(D::from_bson)
            .collect()
    }

    /// Releases the underlying connection. Safe to call repeatedly.
    pub async fn disconnect(&self) -> StoreResult<()> {
        self.connection.backend().disconnect().await
    }
}
