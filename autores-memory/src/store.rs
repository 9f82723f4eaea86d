//! In-memory storage implementation for the author store.
//!
//! Authors are kept in an ordered `Vec` behind an async-aware read-write lock. Reads share
//! the lock; every mutating call holds the write lock from its first check to its last write.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::sync::Arc;

use autores_core::{
    backend::{AuthorBackend, AuthorBackendBuilder},
    error::{StoreError, StoreResult},
    model::{Author, Book},
};

type AuthorList = Vec<Author>;

/// Thread-safe in-memory author storage backend.
///
/// # Thread Safety
///
/// `InMemoryBackend` is cloneable and uses an `Arc`-wrapped internal state. Multiple clones
/// of the same instance share the same underlying collection.
///
/// # Lookups
///
/// Lookups scan the list and take the first author whose id matches, so if two authors were
/// created with the same id only the earlier one is reachable by id.
///
/// # Example
///
/// ```ignore
/// use autores_memory::InMemoryBackend;
/// use autores_core::{backend::AuthorBackend, seed};
///
/// let backend = InMemoryBackend::with_authors(seed::authors());
/// let libros = backend.list_books("1").await?;
/// assert_eq!(libros.len(), 2);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryBackend {
    authors: Arc<RwLock<AuthorList>>,
}

impl InMemoryBackend {
    /// Creates a new backend with no authors.
    pub fn new() -> Self {
        Self::with_authors(Vec::new())
    }

    /// Creates a backend holding the given authors, in order.
    pub fn with_authors(authors: Vec<Author>) -> Self {
        Self {
            authors: Arc::new(RwLock::new(authors)),
        }
    }

    /// Creates a builder for constructing an `InMemoryBackend`.
    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::default()
    }
}

fn author_position(authors: &[Author], id: &str) -> StoreResult<usize> {
    authors
        .iter()
        .position(|author| author.matches_id(id))
        .ok_or_else(|| StoreError::AuthorNotFound(id.to_string()))
}

#[async_trait]
impl AuthorBackend for InMemoryBackend {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        Ok(self.authors.read().await.clone())
    }

    async fn get_author(&self, id: &str) -> StoreResult<Author> {
        let authors = self.authors.read().await;
        let idx = author_position(&authors, id)?;

        Ok(authors[idx].clone())
    }

    async fn insert_author(&self, author: Author) -> StoreResult<Author> {
        let mut authors = self.authors.write().await;

        if authors.iter().any(|existing| existing.same_name(&author)) {
            return Err(StoreError::DuplicateAuthor {
                nombre: author.nombre(),
                apellido: author.apellido(),
            });
        }

        authors.push(author.clone());

        Ok(author)
    }

    async fn replace_author(&self, id: &str, author: Author) -> StoreResult<Author> {
        let mut authors = self.authors.write().await;
        let idx = author_position(&authors, id)?;

        authors[idx] = author.clone();

        Ok(author)
    }

    async fn delete_author(&self, id: &str) -> StoreResult<()> {
        let mut authors = self.authors.write().await;
        let idx = author_position(&authors, id)?;

        authors.remove(idx);

        Ok(())
    }

    async fn list_books(&self, author_id: &str) -> StoreResult<Vec<Book>> {
        let authors = self.authors.read().await;
        let idx = author_position(&authors, author_id)?;

        authors[idx].books()
    }

    async fn get_book(&self, author_id: &str, book_id: &str) -> StoreResult<Book> {
        let authors = self.authors.read().await;
        let idx = author_position(&authors, author_id)?;

        authors[idx].book(book_id)
    }

    async fn insert_book(&self, author_id: &str, book: Book) -> StoreResult<Book> {
        let mut authors = self.authors.write().await;
        let idx = author_position(&authors, author_id)?;

        authors[idx].add_book(book.clone())?;

        Ok(book)
    }

    async fn replace_book(&self, author_id: &str, book_id: &str, book: Book) -> StoreResult<Book> {
        let mut authors = self.authors.write().await;
        let idx = author_position(&authors, author_id)?;

        authors[idx].replace_book(book_id, book.clone())?;

        Ok(book)
    }

    async fn delete_book(&self, author_id: &str, book_id: &str) -> StoreResult<()> {
        let mut authors = self.authors.write().await;
        let idx = author_position(&authors, author_id)?;

        authors[idx].remove_book(book_id)
    }
}

/// Builder for constructing [`InMemoryBackend`] instances.
///
/// # Example
///
/// ```ignore
/// use autores_memory::InMemoryBackend;
/// use autores_core::{backend::AuthorBackendBuilder, seed};
///
/// let backend = InMemoryBackend::builder()
///     .with_authors(seed::authors())
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct InMemoryBackendBuilder {
    authors: Vec<Author>,
}

impl InMemoryBackendBuilder {
    /// Sets the authors the backend starts with.
    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }
}

#[async_trait]
impl AuthorBackendBuilder for InMemoryBackendBuilder {
    type Backend = InMemoryBackend;

    /// Builds the backend. This always succeeds.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryBackend::with_authors(self.authors))
    }
}
