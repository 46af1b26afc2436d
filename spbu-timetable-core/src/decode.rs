//! Conversion of raw JSON values into typed entities.
//!
//! Entities implement [`Decode`] by pulling each field out of a [`Fields`]
//! accessor. Every failure is a [`DecodeError`] naming the entity, the key and
//! the JSON fragment that could not be converted, so a broken payload can be
//! traced back to the exact field.

use std::{any::type_name, fmt};

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// A decode rule: JSON in, entity or failure out.
pub type DecodeRule<T> = fn(&Value) -> Result<T, DecodeError>;

/// Build `Self` from a generic JSON value, all-or-nothing.
pub trait Decode: Sized {
    fn decode(json: &Value) -> Result<Self, DecodeError>;
}

/// A required field was missing or had the wrong type.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    /// Type being decoded when the failure happened.
    pub entity: &'static str,
    /// Offending key; `None` when the value itself had the wrong shape.
    pub key: Option<String>,
    /// Type the key was expected to hold.
    pub expected: &'static str,
    /// JSON found at the key; `None` when the key was missing.
    pub fragment: Option<Value>,
}

impl DecodeError {
    fn shape(entity: &'static str, expected: &'static str, fragment: &Value) -> Self {
        Self {
            entity,
            key: None,
            expected,
            fragment: Some(fragment.clone()),
        }
    }

    /// Failure for an envelope key that the response did not contain.
    pub(crate) fn missing_envelope(key: &str, fragment: &Value) -> Self {
        Self {
            entity: "response",
            key: Some(key.to_string()),
            expected: "object",
            fragment: Some(fragment.clone()),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}.{}: expected {}", self.entity, key, self.expected)?,
            None => write!(f, "{}: expected {}", self.entity, self.expected)?,
        }
        match &self.fragment {
            Some(fragment) => write!(f, ", found {}", fragment),
            None => write!(f, ", key is missing"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Keyed access to the members of a JSON object being decoded as `entity`.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Open `json` as the object form of `T`.
    pub fn of<T>(json: &'a Value) -> Result<Self, DecodeError> {
        let entity = type_name::<T>();
        json.as_object()
            .map(|map| Self { entity, map })
            .ok_or_else(|| DecodeError::shape(entity, "object", json))
    }

    /// A field that must be present and convertible.
    pub fn required<V: DeserializeOwned>(&self, key: &str) -> Result<V, DecodeError> {
        let fragment = self.get::<V>(key)?;
        self.convert(key, fragment)
    }

    /// A field that must be present but may be JSON `null`.
    pub fn nullable<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, DecodeError> {
        self.required::<Option<V>>(key)
    }

    /// A field that may be missing or `null`; a present value must still convert.
    pub fn optional<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, DecodeError> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(fragment) => self.convert(key, fragment).map(Some),
        }
    }

    /// A required nested entity. Its own failures propagate unchanged.
    pub fn entity<E: Decode>(&self, key: &str) -> Result<E, DecodeError> {
        E::decode(self.get::<E>(key)?)
    }

    /// A list of entities where undecodable elements are dropped.
    pub fn list<E: Decode>(&self, key: &str) -> Result<Vec<E>, DecodeError> {
        Ok(decode_lenient(self.array::<E>(key)?))
    }

    /// A list of entities where the first undecodable element fails the parent.
    pub fn strict_list<E: Decode>(&self, key: &str) -> Result<Vec<E>, DecodeError> {
        self.array::<E>(key)?.iter().map(E::decode).collect()
    }

    fn get<V>(&self, key: &str) -> Result<&'a Value, DecodeError> {
        self.map.get(key).ok_or_else(|| DecodeError {
            entity: self.entity,
            key: Some(key.to_string()),
            expected: type_name::<V>(),
            fragment: None,
        })
    }

    fn array<E>(&self, key: &str) -> Result<&'a [Value], DecodeError> {
        let fragment = self.get::<Vec<E>>(key)?;
        fragment
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mistyped::<Vec<E>>(key, fragment))
    }

    fn convert<V: DeserializeOwned>(&self, key: &str, fragment: &Value) -> Result<V, DecodeError> {
        V::deserialize(fragment).map_err(|_| self.mistyped::<V>(key, fragment))
    }

    fn mistyped<V>(&self, key: &str, fragment: &Value) -> DecodeError {
        DecodeError {
            entity: self.entity,
            key: Some(key.to_string()),
            expected: type_name::<V>(),
            fragment: Some(fragment.clone()),
        }
    }
}

fn decode_lenient<E: Decode>(items: &[Value]) -> Vec<E> {
    items
        .iter()
        .filter_map(|item| match E::decode(item) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Dropping undecodable list element: {}", err);
                None
            }
        })
        .collect()
}

/// Top-level arrays decode leniently, like list fields.
impl<T: Decode> Decode for Vec<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        json.as_array()
            .map(|items| decode_lenient(items))
            .ok_or_else(|| DecodeError::shape(type_name::<Self>(), "array", json))
    }
}

/// Escape hatch for callers who want the raw payload.
impl Decode for Value {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        Ok(json.clone())
    }
}
