//! Read access to stored job postings.

use async_trait::async_trait;
use bson::oid::ObjectId;

use jobstore_core::{
    backend::StoreBackend,
    collection::TypedCollection,
    connection::Connection,
    error::{StoreError, StoreResult},
    query::Predicate,
};

use crate::models::JobDetails;

/// Job lookups used by the service layer.
///
/// Implemented by [`JobDetailsRepository`] on top of a store connection. Tests
/// substitute their own implementation to drive the service directly.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Returns one page of jobs matching `filter`, ordered by identifier.
    async fn get_job(
        &self,
        filter: Predicate,
        page_size: i64,
        page_number: i64,
    ) -> StoreResult<Vec<JobDetails>>;

    /// Returns the job with the given hex identifier, or `None` if no such job
    /// exists.
    async fn get_job_detail(&self, id: &str) -> StoreResult<Option<JobDetails>>;
}

#[derive(Debug, Clone)]
pub struct JobDetailsRepository<B: StoreBackend> {
    jobs: TypedCollection<B, JobDetails>,
}

impl<B: StoreBackend> JobDetailsRepository<B> {
    /// Binds the repository to `collection` on `connection`.
    pub fn new(connection: &Connection<B>, collection: &str) -> Self {
        Self::from_collection(connection.typed_collection_named(collection))
    }

    pub fn from_collection(jobs: TypedCollection<B, JobDetails>) -> Self {
        Self { jobs }
    }

    pub fn collection(&self) -> &TypedCollection<B, JobDetails> {
        &self.jobs
    }
}

#[async_trait]
impl<B: StoreBackend + 'static> JobRepository for JobDetailsRepository<B> {
    async fn get_job(
        &self,
        filter: Predicate,
        page_size: i64,
        page_number: i64,
    ) -> StoreResult<Vec<JobDetails>> {
        self.jobs.get(filter, page_size, page_number).await
    }

    async fn get_job_detail(&self, id: &str) -> StoreResult<Option<JobDetails>> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|e| StoreError::Validation(format!("invalid job id {id:?}: {e}")))?;

        match self.jobs.get_by_id(&object_id).await {
            Ok(job) => Ok(Some(job)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(collection = %self.jobs.name(), id, "job not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
