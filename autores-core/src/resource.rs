//! Core traits for records exposed by the API and the checks applied to incoming payloads.
//!
//! Request bodies reach the store as decoded JSON records ([`serde_json::Value`]). Before a
//! record becomes an [`Author`](crate::model::Author) or [`Book`](crate::model::Book) it goes
//! through one of two paths:
//!
//! - [`ResourceExt::from_payload`] for creation: every required field must be present.
//! - [`ResourceExt::from_record`] for replacement: the record is taken as-is.
//!
//! Neither path checks value types. A present field may hold any JSON value and unknown
//! keys are kept.

use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value};
use std::fmt;

use crate::error::{StoreError, StoreResult};

/// The two kinds of resource served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Author,
    Book,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Author => f.write_str("autor"),
            ResourceKind::Book => f.write_str("libro"),
        }
    }
}

/// Trait implemented by every record the store holds.
///
/// `REQUIRED_FIELDS` lists wire names in the order they are reported when missing.
pub trait Resource: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Which kind of resource this is, used in error messages.
    const KIND: ResourceKind;

    /// Wire names of the fields a creation payload must carry.
    const REQUIRED_FIELDS: &'static [&'static str];
}

/// Extension trait turning decoded request bodies into resources.
///
/// Automatically implemented for every [`Resource`].
pub trait ResourceExt: Resource {
    /// Checks that every required field is present, then takes the payload as the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingFields`] naming every absent field.
    fn from_payload(payload: Value) -> StoreResult<Self>;

    /// Takes a full replacement record without re-running the presence checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPayload`] if the record is not a JSON object.
    fn from_record(record: Value) -> StoreResult<Self>;
}

impl<R: Resource> ResourceExt for R {
    fn from_payload(payload: Value) -> StoreResult<Self> {
        let missing = missing_fields(&payload, R::REQUIRED_FIELDS);

        if !missing.is_empty() {
            return Err(StoreError::MissingFields {
                kind: R::KIND,
                fields: missing,
            });
        }

        Self::from_record(payload)
    }

    fn from_record(record: Value) -> StoreResult<Self> {
        if !record.is_object() {
            return Err(StoreError::InvalidPayload(format!(
                "el {} debe ser un objeto JSON",
                R::KIND
            )));
        }

        Ok(from_value(record)?)
    }
}

/// Returns the required fields absent from `payload`, in declaration order.
///
/// A field is present when its key exists and is not `null`; strings must also be non-blank.
/// Numbers (including `0`), booleans and arrays (including `[]`) count as present.
pub fn missing_fields(payload: &Value, required: &[&str]) -> Vec<String> {
    let Some(record) = payload.as_object() else {
        return required.iter().map(|f| f.to_string()).collect();
    };

    required
        .iter()
        .filter(|field| match record.get(**field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .map(|field| field.to_string())
        .collect()
}
