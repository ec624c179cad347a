//! Job search service.
//!
//! [`JobService`] turns caller-facing search requests into store predicates
//! and hands them to a [`JobRepository`]. Store errors are returned unchanged.

use serde::{Deserialize, Serialize};

use jobstore_core::{
    backend::StoreBackend,
    connection::Connection,
    error::StoreResult,
    page::{Page, PageRequest},
};

use crate::{
    filter::{KeywordMatch, build_filter_with},
    models::{JobDetails, SearchCriteria},
    repository::{JobDetailsRepository, JobRepository},
};

/// Incoming job search, as received from an HTTP query or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetJobsRequest {
    pub location: Option<String>,
    pub keywords: Option<String>,
    pub page_size: i64,
    pub page_number: i64,
}

impl GetJobsRequest {
    /// Search criteria carried by this request, `None` when neither term is set.
    pub fn criteria(&self) -> Option<SearchCriteria> {
        if self.location.is_none() && self.keywords.is_none() {
            return None;
        }

        Some(SearchCriteria::new(
            self.location.clone().unwrap_or_default(),
            self.keywords.clone().unwrap_or_default(),
        ))
    }

    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_size, self.page_number)
    }
}

/// One page of search results, echoing the requested paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<JobDetails>,
    pub page_size: i64,
    pub page_number: i64,
}

impl From<Page<JobDetails>> for JobPage {
    fn from(page: Page<JobDetails>) -> Self {
        Self {
            jobs: page.items,
            page_size: page.page_size,
            page_number: page.page_number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobService<R: JobRepository> {
    repo: R,
    keyword_match: KeywordMatch,
}

impl<R: JobRepository> JobService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo, keyword_match: KeywordMatch::default() }
    }

    /// Selects how keywords are matched against titles and company names.
    pub fn with_keyword_match(mut self, keyword_match: KeywordMatch) -> Self {
        self.keyword_match = keyword_match;
        self
    }

    pub fn keyword_match(&self) -> KeywordMatch {
        self.keyword_match
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists one page of jobs matching `criteria`; `None` lists every job.
    pub async fn get_jobs(
        &self,
        criteria: Option<&SearchCriteria>,
        page_size: i64,
        page_number: i64,
    ) -> StoreResult<JobPage> {
        let filter = build_filter_with(criteria, self.keyword_match);
        let jobs = self.repo.get_job(filter, page_size, page_number).await?;

        Ok(Page::new(jobs, PageRequest::new(page_size, page_number)).into())
    }

    pub async fn handle(&self, request: &GetJobsRequest) -> StoreResult<JobPage> {
        let page = request.page();
        self.get_jobs(request.criteria().as_ref(), page.page_size, page.page_number)
            .await
    }

    pub async fn get_job_detail(&self, id: &str) -> StoreResult<Option<JobDetails>> {
        self.repo.get_job_detail(id).await
    }
}

impl<B: StoreBackend + 'static> JobService<JobDetailsRepository<B>> {
    /// Builds a service reading jobs from `collection` on `connection`.
    pub fn from_connection(connection: &Connection<B>, collection: &str) -> Self {
        Self::new(JobDetailsRepository::new(connection, collection))
    }
}
