//! The author and book records served by the API.
//!
//! Records are stored exactly as the client sent them: every key is kept, including ones
//! the service never reads, and values keep their JSON type (`anioPublicacion` may be a
//! number or a string). The service only interprets `id`, the name pair, `titulo` and the
//! `libros` list, through the accessors below.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{StoreError, StoreResult},
    id::ResourceId,
    resource::{Resource, ResourceKind},
};

const LIBROS: &str = "libros";

/// A top-level resource owning an ordered list of books.
///
/// An author is always a JSON object. Its books live in the `libros` array; a record
/// without `libros` (possible after a replacement) has no books until one is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Author(Map<String, Value>);

impl Author {
    /// Returns true when `raw` names this author's id.
    pub fn matches_id(&self, raw: &str) -> bool {
        matches_id(self.0.get("id"), raw)
    }

    pub fn nombre(&self) -> String {
        text(self.0.get("nombre"))
    }

    pub fn apellido(&self) -> String {
        text(self.0.get("apellido"))
    }

    /// Returns true when both authors carry the same `nombre` and `apellido` values.
    pub fn same_name(&self, other: &Author) -> bool {
        self.0.get("nombre") == other.0.get("nombre")
            && self.0.get("apellido") == other.0.get("apellido")
    }

    /// The author's books, in list order.
    ///
    /// # Errors
    ///
    /// `Backend` if the stored `libros` value is not a list.
    pub fn books(&self) -> StoreResult<Vec<Book>> {
        Ok(self.book_values()?.iter().cloned().map(Book).collect())
    }

    /// Returns the first book whose id matches `book_id`.
    pub fn book(&self, book_id: &str) -> StoreResult<Book> {
        let libros = self.book_values()?;
        let pos = book_position(libros, book_id)?;

        Ok(Book(libros[pos].clone()))
    }

    /// Appends a book unless one with the same title is already listed.
    ///
    /// # Errors
    ///
    /// `DuplicateBook`, or `Backend` if `libros` is not a list.
    pub fn add_book(&mut self, book: Book) -> StoreResult<()> {
        let libros = self.book_values_mut()?;

        if libros.iter().any(|existing| same_title(existing, &book.0)) {
            return Err(StoreError::DuplicateBook {
                titulo: book.titulo(),
            });
        }

        libros.push(book.0);

        Ok(())
    }

    /// Replaces the first book whose id matches `book_id`, keeping its position.
    pub fn replace_book(&mut self, book_id: &str, book: Book) -> StoreResult<()> {
        let libros = self.book_values_mut()?;
        let pos = book_position(libros, book_id)?;

        libros[pos] = book.0;

        Ok(())
    }

    /// Removes the first book whose id matches `book_id`.
    pub fn remove_book(&mut self, book_id: &str) -> StoreResult<()> {
        let libros = self.book_values_mut()?;
        let pos = book_position(libros, book_id)?;

        libros.remove(pos);

        Ok(())
    }

    fn book_values(&self) -> StoreResult<&[Value]> {
        match self.0.get(LIBROS) {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(libros)) => Ok(libros.as_slice()),
            Some(_) => Err(self.malformed_books()),
        }
    }

    fn book_values_mut(&mut self) -> StoreResult<&mut Vec<Value>> {
        let malformed = self.malformed_books();
        let slot = self.0.entry(LIBROS).or_insert(Value::Null);

        if slot.is_null() {
            *slot = Value::Array(Vec::new());
        }

        match slot {
            Value::Array(libros) => Ok(libros),
            _ => Err(malformed),
        }
    }

    fn malformed_books(&self) -> StoreError {
        StoreError::Backend(format!(
            "los libros del autor {} no son una lista",
            text(self.0.get("id"))
        ))
    }
}

impl From<Map<String, Value>> for Author {
    fn from(record: Map<String, Value>) -> Self {
        Author(record)
    }
}

impl Resource for Author {
    const KIND: ResourceKind = ResourceKind::Author;
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["id", "nombre", "apellido", "fechaDeNacimiento", "libros"];
}

/// A book, owned by exactly one author.
///
/// Books added or replaced through the API are JSON objects. A book that arrived nested in
/// an author record is kept as given, whatever its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Book(Value);

impl Book {
    pub fn titulo(&self) -> String {
        text(self.0.get("titulo"))
    }
}

impl Resource for Book {
    const KIND: ResourceKind = ResourceKind::Book;
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["id", "titulo", "descripcion", "anioPublicacion"];
}

fn matches_id(value: Option<&Value>, raw: &str) -> bool {
    value
        .and_then(ResourceId::from_value)
        .is_some_and(|id| id.matches(raw))
}

fn book_position(libros: &[Value], book_id: &str) -> StoreResult<usize> {
    libros
        .iter()
        .position(|book| matches_id(book.get("id"), book_id))
        .ok_or_else(|| StoreError::BookNotFound(book_id.to_string()))
}

fn same_title(a: &Value, b: &Value) -> bool {
    matches!((a.get("titulo"), b.get("titulo")), (Some(x), Some(y)) if x == y)
}

/// Renders a field for messages and logs: strings without quotes, anything else as JSON.
fn text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
