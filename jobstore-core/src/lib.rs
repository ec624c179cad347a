//! Typed document-repository layer over a pluggable document store.
//!
//! This crate is the core of the jobstore project and provides:
//!
//! - **Entity traits** ([`document`]) - Defining and serializing stored entities
//! - **Store capability** ([`backend`]) - The narrow interface a backend implements
//! - **Predicates and queries** ([`query`]) - A store-independent filter algebra
//! - **Pagination** ([`page`]) - Page requests, skip/limit windows and result pages
//! - **Connections** ([`connection`]) - Construct-once connection provider and execution context
//! - **Typed collections** ([`collection`]) - Entity-typed CRUD and paged queries
//! - **Error handling** ([`error`]) - The error taxonomy shared by every layer
//!
//! # Example
//!
//! ```ignore
//! use jobstore_core::{connection::ConnectionProvider, query::Filter};
//! use std::time::Duration;
//!
//! let provider = ConnectionProvider::new();
//! let connection = provider.init(InMemoryStore::builder(), Duration::from_secs(5)).await?;
//! let users = connection.typed_collection::<User>();
//!
//! let id = users.add_single(User { id: None, username: "ada".into() }).await?;
//! let page = users.get(Filter::eq("username", "ada"), 10, 1).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as jobstore_core;

pub mod backend;
pub mod collection;
pub mod connection;
pub mod document;
pub mod error;
pub mod page;
pub mod query;

#[cfg(test)]
mod testing;
