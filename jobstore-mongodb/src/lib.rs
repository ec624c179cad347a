//! MongoDB backend implementation for jobstore.
//!
//! This crate implements the `StoreBackend` capability on top of the official
//! MongoDB driver. Predicates are translated into native filter documents and
//! skip/limit/sort are pushed down to the server.
//!
//! To use this backend, enable the `mongodb` feature of the facade crate:
//!
//! ```toml
//! [dependencies]
//! jobstore = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use jobstore_core::connection::ConnectionProvider;
//! use jobstore_mongodb::MongoDbStore;
//! use std::time::Duration;
//!
//! let timeout = Duration::from_secs(10);
//! let provider = ConnectionProvider::new();
//! let connection = provider
//!     .init(MongoDbStore::builder("mongodb://localhost:27017", "jobcrawler").with_timeout(timeout), timeout)
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as jobstore_mongodb;

pub mod query;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
