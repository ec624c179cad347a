//! Process-wide wiring of connection, repository and service.
//!
//! A [`JobStoreContext`] is built once at startup and handed to whatever
//! serves requests. It owns the [`ConnectionProvider`], so shutting the
//! context down releases the store for every clone of its connection.

use jobstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    connection::{Connection, ConnectionProvider},
    error::StoreResult,
};

use crate::{config::JobStoreConfig, repository::JobDetailsRepository, service::JobService};

pub struct JobStoreContext<B: StoreBackend + 'static> {
    provider: ConnectionProvider<B>,
    connection: Connection<B>,
    service: JobService<JobDetailsRepository<B>>,
}

impl<B: StoreBackend + 'static> JobStoreContext<B> {
    /// Dials the store through `builder` and wires the job service on top.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`](jobstore_core::error::StoreError::Connection)
    /// if the store cannot be reached within the configured timeout.
    pub async fn init<F>(builder: F, config: &JobStoreConfig) -> StoreResult<Self>
    where
        F: StoreBackendBuilder<Backend = B>,
    {
        let provider = ConnectionProvider::new();
        let connection = provider.init(builder, config.timeout()).await?;
        let service = JobService::from_connection(&connection, &config.collection_name)
            .with_keyword_match(config.keyword_match);

        tracing::info!(
            database = %config.database_name,
            collection = %config.collection_name,
            "job store ready"
        );

        Ok(Self { provider, connection, service })
    }

    pub fn connection(&self) -> &Connection<B> {
        &self.connection
    }

    pub fn service(&self) -> &JobService<JobDetailsRepository<B>> {
        &self.service
    }

    /// Releases the store connection. Later calls are no-ops.
    pub async fn shutdown(&self) -> StoreResult<()> {
        self.provider.disconnect().await
    }
}

#[cfg(feature = "mongodb")]
impl JobStoreContext<jobstore_mongodb::MongoDbStore> {
    /// Connects to the MongoDB deployment named by `config`.
    pub async fn connect(config: &JobStoreConfig) -> StoreResult<Self> {
        let builder = jobstore_mongodb::MongoDbStore::builder(
            &config.connection_string,
            &config.database_name,
        )
        .with_timeout(config.timeout());

        Self::init(builder, config).await
    }
}
