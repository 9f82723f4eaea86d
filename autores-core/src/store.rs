//! Main store interface used by request handlers.
//!
//! [`AuthorStore`] wraps a backend and adds the payload checks that gate each operation.
//! Books are reached through a [`BookCollection`], a view scoped to one author id.
//!
//! # Example
//!
//! ```ignore
//! use autores_core::store::AuthorStore;
//! use serde_json::json;
//!
//! let store = AuthorStore::new(backend);
//! let borges = store.get_author("1").await?;
//! let libros = store.books("1").list().await?;
//! ```

use serde_json::Value;
use tracing::info;

use crate::{
    backend::AuthorBackend,
    error::StoreResult,
    model::{Author, Book},
    resource::ResourceExt,
};

/// The author store, bound to a specific backend.
///
/// Construct one per process and share it (usually behind an `Arc`) with every handler.
#[derive(Debug)]
pub struct AuthorStore<B: AuthorBackend> {
    backend: B,
}

impl<B: AuthorBackend> AuthorStore<B> {
    /// Creates a new store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Lists every author, or an empty list.
    pub async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        self.backend.list_authors().await
    }

    /// Creates an author from a decoded request body.
    ///
    /// # Errors
    ///
    /// `MissingFields` if any of `id`, `nombre`, `apellido`, `fechaDeNacimiento`, `libros`
    /// is absent, `DuplicateAuthor` if the name pair is taken.
    pub async fn create_author(&self, payload: Value) -> StoreResult<Author> {
        let author = Author::from_payload(payload)?;
        let author = self.backend.insert_author(author).await?;

        info!(nombre = %author.nombre(), apellido = %author.apellido(), "author created");

        Ok(author)
    }

    /// Looks up an author by id.
    pub async fn get_author(&self, id: &str) -> StoreResult<Author> {
        self.backend.get_author(id).await
    }

    /// Replaces the whole author record with the payload. No field-level merge happens and
    /// the required fields are not re-checked.
    ///
    /// # Errors
    ///
    /// `AuthorNotFound` if no author matches, checked before the payload is looked at;
    /// `InvalidPayload` if the payload is not a JSON object.
    pub async fn replace_author(&self, id: &str, payload: Value) -> StoreResult<Author> {
        self.backend.get_author(id).await?;

        let author = Author::from_record(payload)?;
        let author = self.backend.replace_author(id, author).await?;

        info!(id, nombre = %author.nombre(), apellido = %author.apellido(), "author replaced");

        Ok(author)
    }

    /// Deletes an author and all of its books.
    pub async fn delete_author(&self, id: &str) -> StoreResult<()> {
        self.backend.delete_author(id).await?;

        info!(id, "author deleted");

        Ok(())
    }

    /// Returns the book collection of the author with the given id.
    ///
    /// The author is not looked up until an operation runs on the collection.
    pub fn books<'a>(&'a self, author_id: &'a str) -> BookCollection<'a, B> {
        BookCollection::new(author_id, &self.backend)
    }
}

/// The books of a single author.
///
/// Every operation fails with `AuthorNotFound` before any book-level check when the
/// owning author does not exist.
#[derive(Debug)]
pub struct BookCollection<'a, B: AuthorBackend> {
    author_id: &'a str,
    backend: &'a B,
}

impl<'a, B: AuthorBackend> BookCollection<'a, B> {
    pub(crate) fn new(author_id: &'a str, backend: &'a B) -> Self {
        Self { author_id, backend }
    }

    /// Lists the author's books, or an empty list.
    pub async fn list(&self) -> StoreResult<Vec<Book>> {
        self.backend.list_books(self.author_id).await
    }

    /// Adds a book from a decoded request body.
    ///
    /// # Errors
    ///
    /// Checked in order: `AuthorNotFound`, `MissingFields` (any of `id`, `titulo`,
    /// `descripcion`, `anioPublicacion`), `DuplicateBook`.
    pub async fn create(&self, payload: Value) -> StoreResult<Book> {
        self.backend.get_author(self.author_id).await?;

        let book = Book::from_payload(payload)?;
        let book = self.backend.insert_book(self.author_id, book).await?;

        info!(author_id = self.author_id, titulo = %book.titulo(), "book created");

        Ok(book)
    }

    /// Looks up one book by id.
    pub async fn get(&self, book_id: &str) -> StoreResult<Book> {
        self.backend.get_book(self.author_id, book_id).await
    }

    /// Replaces a book in place with the given record.
    ///
    /// # Errors
    ///
    /// `AuthorNotFound`, then `BookNotFound`, both checked before the payload is looked at;
    /// then `InvalidPayload` if the payload is not a JSON object.
    pub async fn replace(&self, book_id: &str, payload: Value) -> StoreResult<Book> {
        self.backend.get_book(self.author_id, book_id).await?;

        let book = Book::from_record(payload)?;
        let book = self
            .backend
            .replace_book(self.author_id, book_id, book)
            .await?;

        info!(author_id = self.author_id, id = book_id, titulo = %book.titulo(), "book replaced");

        Ok(book)
    }

    /// Removes a book from the author's list.
    pub async fn delete(&self, book_id: &str) -> StoreResult<()> {
        self.backend
            .delete_book(self.author_id, book_id)
            .await?;

        info!(author_id = self.author_id, id = book_id, "book deleted");

        Ok(())
    }
}
