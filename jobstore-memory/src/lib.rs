//! In-memory document storage backend for jobstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `StoreBackend` trait. It is used by the test suites and for local
//! development without a database.
//!
//! # Quick Start
//!
//! ```ignore
//! use jobstore_core::connection::ConnectionProvider;
//! use jobstore_memory::InMemoryStore;
//! use std::time::Duration;
//!
//! let provider = ConnectionProvider::new();
//! let connection = provider.init(InMemoryStore::builder(), Duration::from_secs(5)).await?;
//! let jobs = connection.typed_collection::<JobDetails>();
//! ```

#[allow(unused_extern_crates)]
extern crate self as jobstore_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
