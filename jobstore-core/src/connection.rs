//! Connection lifecycle and execution context.
//!
//! A process dials its document store once through a [`ConnectionProvider`] and
//! hands the resulting [`Connection`] to every component that needs it. The
//! provider serializes initialization behind an async mutex, so concurrent first
//! callers still produce exactly one dial.
//!
//! # Example
//!
//! ```ignore
//! use jobstore_core::connection::ConnectionProvider;
//! use std::time::Duration;
//!
//! let provider = ConnectionProvider::new();
//! let conn = provider.init(MongoDbStore::builder(dsn, "jobs"), Duration::from_secs(10)).await?;
//! let again = provider.init(MongoDbStore::builder(dsn, "jobs"), Duration::from_secs(10)).await?;
//! assert!(conn.same_backend(&again));
//! ```

use mea::mutex::Mutex;
use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    backend::{StoreBackend, StoreBackendBuilder},
    collection::TypedCollection,
    document::Document,
    error::{StoreError, StoreResult},
};

/// Deadline applied to every store call made through a [`Connection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecContext {
    timeout: Option<Duration>,
}

impl ExecContext {
    /// A context without a deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that fails store calls running longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout) }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Runs a store call under this context's deadline.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the deadline passes first, otherwise
    /// whatever the call itself returned.
    pub async fn run<F, T>(&self, operation: &'static str, call: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(operation, ?limit, "store call exceeded deadline");
                    Err(StoreError::Timeout(limit))
                }
            },
            None => call.await,
        }
    }
}

/// A live handle to a document store plus the context its calls run under.
///
/// Cloning is cheap and every clone shares the same backend.
#[derive(Debug)]
pub struct Connection<B: StoreBackend> {
    backend: Arc<B>,
    context: ExecContext,
}

impl<B: StoreBackend> Clone for Connection<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            context: self.context,
        }
    }
}

impl<B: StoreBackend> Connection<B> {
    /// Wraps an already dialed backend.
    pub fn new(backend: B, context: ExecContext) -> Self {
        Self { backend: Arc::new(backend), context }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn context(&self) -> &ExecContext {
        &self.context
    }

    /// Returns the live handle together with its execution context.
    pub fn parts(&self) -> (&B, &ExecContext) {
        (&self.backend, &self.context)
    }

    /// Derives a connection sharing this backend but with another deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            context: ExecContext::with_timeout(timeout),
        }
    }

    /// Returns `true` if both connections share one backend instance.
    pub fn same_backend(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend)
    }

    /// Binds `D` to its default collection.
    pub fn typed_collection<D: Document>(&self) -> TypedCollection<B, D> {
        self.typed_collection_named(D::collection_name())
    }

    /// Binds `D` to an explicitly named collection.
    pub fn typed_collection_named<D: Document>(&self, name: &str) -> TypedCollection<B, D> {
        TypedCollection::new(name.to_string(), self.clone())
    }
}

/// Construct-once holder for the process-wide [`Connection`].
#[derive(Debug)]
pub struct ConnectionProvider<B: StoreBackend> {
    slot: Mutex<Option<Connection<B>>>,
}

impl<B: StoreBackend> Default for ConnectionProvider<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: StoreBackend> ConnectionProvider<B> {
    pub fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    /// Dials the store unless a connection already exists, in which case that
    /// connection is returned and `builder` is dropped unused.
    ///
    /// `timeout` bounds the dial and becomes the deadline of the returned
    /// connection's execution context.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if dialing fails or does not finish
    /// within `timeout`. A failed dial leaves the provider uninitialized.
    pub async fn init<F>(&self, builder: F, timeout: Duration) -> StoreResult<Connection<B>>
    where
        F: StoreBackendBuilder<Backend = B>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(connection) = slot.as_ref() {
            tracing::debug!("reusing established store connection");
            return Ok(connection.clone());
        }

        let backend = match tokio::time::timeout(timeout, builder.build()).await {
            Ok(Ok(backend)) => backend,
            Ok(Err(StoreError::Connection(reason))) => {
                return Err(StoreError::Connection(reason));
            }
            Ok(Err(other)) => return Err(StoreError::Connection(other.to_string())),
            Err(_) => {
                return Err(StoreError::Connection(format!(
                    "store unreachable within {timeout:?}"
                )));
            }
        };

        let connection = Connection::new(backend, ExecContext::with_timeout(timeout));
        tracing::info!(?timeout, "store connection established");
        *slot = Some(connection.clone());

        Ok(connection)
    }

    /// Returns the established connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if [`init`](Self::init) has not succeeded yet.
    pub async fn connection(&self) -> StoreResult<Connection<B>> {
        self.slot
            .lock()
            .await
            .as_ref()
            .cloned()
            .ok_or_else(|| StoreError::Connection("store connection not initialized".to_string()))
    }

    /// Disconnects and forgets the established connection, if any.
    pub async fn disconnect(&self) -> StoreResult<()> {
        let taken = self.slot.lock().await.take();

        if let Some(connection) = taken {
            connection.backend().disconnect().await?;
            tracing::info!("store connection released");
        }

        Ok(())
    }
}
