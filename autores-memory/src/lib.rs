//! In-memory storage backend for autores.
//!
//! This crate provides a thread-safe, in-memory implementation of the `AuthorBackend` trait.
//! It uses async-aware read-write locks so that every mutation runs with exclusive access to
//! the whole collection. Nothing is persisted: a restart resets the collection to whatever
//! the backend was built with.
//!
//! # Quick Start
//!
//! ```ignore
//! use autores_core::{backend::AuthorBackendBuilder, seed, store::AuthorStore};
//! use autores_memory::InMemoryBackend;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryBackend::builder()
//!         .with_authors(seed::authors())
//!         .build()
//!         .await?;
//!     let store = AuthorStore::new(backend);
//!
//!     let libros = store.books("1").list().await?;
//!     println!("{} libros", libros.len());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as autores_memory;

pub mod store;

pub use store::{InMemoryBackend, InMemoryBackendBuilder};
