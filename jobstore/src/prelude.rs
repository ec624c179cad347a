//! Convenient re-exports of commonly used types from jobstore.
//!
//! ```ignore
//! use jobstore::prelude::*;
//! ```

pub use jobstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    collection::TypedCollection,
    connection::{Connection, ConnectionProvider, ExecContext},
    document::{Document, DocumentExt},
    error::{StoreError, StoreResult},
    page::{Page, PageRequest, PageWindow},
    query::{FieldOp, Filter, Predicate, PredicateVisitor, Query, QueryBuilder, Sort, SortDirection},
};

pub use crate::{
    config::JobStoreConfig,
    context::JobStoreContext,
    filter::{KeywordMatch, build_filter, build_filter_with},
    models::{JobDetails, SearchCriteria, User},
    repository::{JobDetailsRepository, JobRepository},
    service::{GetJobsRequest, JobPage, JobService},
};
