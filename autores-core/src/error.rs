//! Error types and result types for store operations.
//!
//! Every failure a request can run into is a [`StoreError`] variant. The HTTP layer maps each
//! variant to a status code; the messages here are what clients read.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

use crate::resource::ResourceKind;

/// Represents all possible errors raised by the author store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A creation payload lacks one or more required fields.
    #[error("Faltan datos del {kind}: {}", .fields.join(", "))]
    MissingFields {
        kind: ResourceKind,
        fields: Vec<String>,
    },
    /// The record is not a JSON object.
    #[error("Datos inválidos: {0}")]
    InvalidPayload(String),
    /// An author with the same first and last name already exists.
    #[error("El autor {nombre} {apellido} ya existe")]
    DuplicateAuthor { nombre: String, apellido: String },
    /// The author already has a book with this title.
    #[error("El libro {titulo} ya existe")]
    DuplicateBook { titulo: String },
    /// No author matches the given id.
    #[error("No se encontró el autor {0}, el id no existe")]
    AuthorNotFound(String),
    /// The author exists but has no book matching the given id.
    #[error("No se encontró el libro {0}, el id no existe")]
    BookNotFound(String),
    /// An error occurred in the underlying storage backend.
    #[error("Error interno: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true for failures caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StoreError::Backend(_))
    }
}

/// A specialized `Result` type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::InvalidPayload(err.to_string())
    }
}
