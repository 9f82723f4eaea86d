//! Resource identifiers and the loose matching used for every lookup.
//!
//! Identifiers arrive in two shapes: as whatever JSON value the client stored in the
//! record (usually a number, sometimes a string) and as a raw path segment. Both are
//! reduced to an [`IdKey`] before comparison so that `1`, `"1"` and `"01"` all name the
//! same resource.

use serde_json::{Number, Value};

/// Identifier carried by an author or a book.
///
/// This is a read-only view of the record's `id` field; the record itself keeps the value
/// exactly as the client supplied it. Equality is loose: see [`ResourceId::matches`].
#[derive(Debug, Clone)]
pub enum ResourceId {
    /// A JSON number, e.g. `1`.
    Number(Number),
    /// A JSON string, e.g. `"1"` or `"borges"`.
    Text(String),
}

/// Normalized form of an identifier used for comparison.
#[derive(Debug, Clone, PartialEq)]
enum IdKey {
    Numeric(f64),
    Text(String),
    Blank,
}

impl IdKey {
    fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return IdKey::Blank;
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => IdKey::Numeric(n),
            _ => IdKey::Text(trimmed.to_string()),
        }
    }

    fn same_as(&self, other: &IdKey) -> bool {
        match (self, other) {
            (IdKey::Numeric(a), IdKey::Numeric(b)) => a == b,
            (IdKey::Text(a), IdKey::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl ResourceId {
    /// Reads an identifier out of a stored JSON value.
    ///
    /// Only numbers and strings identify a resource; any other value yields `None` and the
    /// record cannot be addressed by id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(ResourceId::Number(n.clone())),
            Value::String(s) => Some(ResourceId::Text(s.clone())),
            _ => None,
        }
    }

    fn key(&self) -> IdKey {
        match self {
            ResourceId::Number(n) => n
                .as_f64()
                .map(IdKey::Numeric)
                .unwrap_or_else(|| IdKey::from_text(&n.to_string())),
            ResourceId::Text(s) => IdKey::from_text(s),
        }
    }

    /// Returns true when `raw` (typically a path segment) names this identifier.
    ///
    /// Both sides are trimmed; text that parses as a finite number is compared numerically,
    /// anything else is compared as text. A blank string never matches.
    ///
    /// ```
    /// use autores_core::id::ResourceId;
    /// use serde_json::json;
    ///
    /// let id = ResourceId::from_value(&json!(1)).unwrap();
    /// assert!(id.matches("1"));
    /// assert!(id.matches(" 01 "));
    /// assert!(!id.matches("2"));
    /// assert!(!id.matches(""));
    /// ```
    pub fn matches(&self, raw: &str) -> bool {
        self.key().same_as(&IdKey::from_text(raw))
    }
}
