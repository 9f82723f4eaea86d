//! Storage backend abstraction for the author store.
//!
//! The [`AuthorBackend`] trait provides a unified async interface over the author collection
//! and the book lists nested under each author. Identifiers are passed as raw strings (usually
//! path segments) and compared with [`ResourceId::matches`](crate::id::ResourceId::matches).
//!
//! # Atomicity
//!
//! Each method performs its existence and duplicate checks together with the mutation it
//! guards. Implementations must hold exclusive access to the whole collection for the
//! duration of every mutating call; no interleaved writes are permitted.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::StoreResult,
    model::{Author, Book},
};

/// Abstract interface for author storage backends.
///
/// Methods return [`StoreResult`]; the error variants each one may produce are listed
/// on the method.
#[async_trait]
pub trait AuthorBackend: Send + Sync + Debug {
    /// Returns every author in insertion order.
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;

    /// Returns the first author whose id matches `id`.
    ///
    /// Fails with `AuthorNotFound`.
    async fn get_author(&self, id: &str) -> StoreResult<Author>;

    /// Appends an author after checking no author has the same name pair.
    ///
    /// Fails with `DuplicateAuthor`.
    async fn insert_author(&self, author: Author) -> StoreResult<Author>;

    /// Replaces the author matching `id` in place with `author`.
    ///
    /// Fails with `AuthorNotFound`.
    async fn replace_author(&self, id: &str, author: Author) -> StoreResult<Author>;

    /// Removes the author matching `id` together with its books.
    ///
    /// Fails with `AuthorNotFound`.
    async fn delete_author(&self, id: &str) -> StoreResult<()>;

    /// Returns the books of the author matching `author_id`.
    ///
    /// Fails with `AuthorNotFound`.
    async fn list_books(&self, author_id: &str) -> StoreResult<Vec<Book>>;

    /// Returns one book of one author.
    ///
    /// Fails with `AuthorNotFound` or `BookNotFound`.
    async fn get_book(&self, author_id: &str, book_id: &str) -> StoreResult<Book>;

    /// Appends a book to an author's list after checking the title is not taken.
    ///
    /// Fails with `AuthorNotFound` or `DuplicateBook`.
    async fn insert_book(&self, author_id: &str, book: Book) -> StoreResult<Book>;

    /// Replaces a book in place within its author's list.
    ///
    /// Fails with `AuthorNotFound` or `BookNotFound`.
    async fn replace_book(&self, author_id: &str, book_id: &str, book: Book) -> StoreResult<Book>;

    /// Removes a book from its author's list.
    ///
    /// Fails with `AuthorNotFound` or `BookNotFound`.
    async fn delete_book(&self, author_id: &str, book_id: &str) -> StoreResult<()>;
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait AuthorBackendBuilder: Send {
    /// The backend type this builder produces.
    type Backend: AuthorBackend;

    /// Builds the backend.
    async fn build(self) -> StoreResult<Self::Backend>;
}
