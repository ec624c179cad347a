//! Paginated, filterable job listings over a document store.
//!
//! This crate is the entry point for the job-listing data layer. It defines
//! the stored entities, turns search criteria into store predicates, and
//! wires a [`JobService`](service::JobService) on top of a shared store
//! connection. The storage primitives are re-exported from `jobstore-core`.
//!
//! # Features
//!
//! - **Typed collections** - insert and look up serde types by store-assigned id
//! - **Search filters** - location plus keywords over title or company name
//! - **Paging** - page size and page number mapped to skip and limit
//! - **Backends** - in-memory out of the box, MongoDB behind the `mongodb` feature
//!
//! # Quick Start
//!
//! ```ignore
//! use jobstore::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> StoreResult<()> {
//!     let config = JobStoreConfig::new("memory://", "jobcrawler", "jobdetails");
//!     let context = JobStoreContext::init(InMemoryStore::builder(), &config).await?;
//!
//!     let jobs = context.connection().typed_collection_named::<JobDetails>("jobdetails");
//!     jobs.add_single(JobDetails {
//!         title: "Engineer".to_string(),
//!         company_name: "Acme".to_string(),
//!         location: "NYC".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//!     let page = context
//!         .service()
//!         .get_jobs(Some(&SearchCriteria::new("NYC", "Engineer")), 10, 1)
//!         .await?;
//!     println!("found {} jobs", page.jobs.len());
//!
//!     context.shutdown().await
//! }
//! ```
//!
//! # MongoDB
//!
//! With the `mongodb` feature enabled, settings come from the environment
//! (`DbConnectionString`, `DatabaseName`, `CollectionName`):
//!
//! ```ignore
//! let config = JobStoreConfig::from_env()?;
//! let context = JobStoreContext::connect(&config).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as jobstore;

pub mod config;
pub mod context;
pub mod filter;
pub mod models;
pub mod prelude;
pub mod repository;
pub mod service;

pub use jobstore_core::{backend, collection, connection, document, error, page, query};

/// In-memory storage backend.
pub mod memory {
    pub use jobstore_memory::*;
}

/// MongoDB storage backend.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use jobstore_mongodb::*;
}
