//! HTTP surface of the autores service.
//!
//! - [`routes`] - The axum router over a shared [`AuthorStore`](autores_core::store::AuthorStore)
//! - [`error`] - Mapping of store errors to status codes and JSON bodies
//! - [`config`] - Listener, logging and seed configuration read from the environment
//! - [`telemetry`] - `tracing` subscriber setup
//!
//! # Usage
//!
//! ```ignore
//! use autores_core::{seed, store::AuthorStore};
//! use autores_memory::InMemoryBackend;
//! use std::sync::Arc;
//!
//! let store = Arc::new(AuthorStore::new(InMemoryBackend::with_authors(seed::authors())));
//! let app = autores_server::routes::router(store);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

pub use config::{ConfigError, ServerConfig};
pub use routes::router;
