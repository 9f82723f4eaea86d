//! Core of the autores service: an author collection with books nested under each author.
//!
//! This crate provides:
//!
//! - **Records** ([`model`]) - The `Author` and `Book` records, kept as the client sent them
//! - **Identifiers** ([`id`]) - Stored ids and the loose comparison used by every lookup
//! - **Payload checks** ([`resource`]) - Required-field presence checks on request bodies
//! - **Backend abstraction** ([`backend`]) - Traits for implementing author storage
//! - **Store** ([`store`]) - The interface request handlers call, with author-scoped book views
//! - **Error handling** ([`error`]) - The error taxonomy and result type
//! - **Seed data** ([`seed`]) - The collection the service starts with
//!
//! # Example
//!
//! ```ignore
//! use autores_core::{seed, store::AuthorStore};
//! use autores_memory::InMemoryBackend;
//! use serde_json::json;
//!
//! let backend = InMemoryBackend::builder().with_authors(seed::authors()).build().await?;
//! let store = AuthorStore::new(backend);
//!
//! let aleph = store.books("1").get("2").await?;
//! assert_eq!(aleph.titulo(), "El Aleph");
//! ```

#[allow(unused_extern_crates)]
extern crate self as autores_core;

pub mod backend;
pub mod error;
pub mod id;
pub mod model;
pub mod resource;
pub mod seed;
pub mod store;
