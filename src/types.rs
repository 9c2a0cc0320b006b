//! Core types for langmodel: the live attribute tree and the wire-format
//! locale dictionary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Model;

/// Wire-format locale dictionary: locale code → output key → string.
///
/// This is the exact shape exchanged at the serialization boundary:
///
/// ```json
/// {
///   "en": { "header": "Hello", "subHeader": "World" },
///   "fr": { "header": "Bonjour", "subHeader": "Monde" }
/// }
/// ```
///
/// [`Model::inflate`](crate::model::Model::inflate) guarantees that every
/// locale present carries the full set of declared output keys, defaulting
/// absent values to `""`.
pub type LocaleDict = BTreeMap<String, BTreeMap<String, String>>;

/// A live attribute value.
///
/// Models hold a schemaless tree of these: translatable strings, nested
/// plain objects, arrays, and embedded [`Model`]s. Serialized forms are
/// untagged, so an attribute tree reads and writes as plain JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Attr {
    Null,
    Text(String),
    Array(Vec<Attr>),
    Model(Box<Model>),
    Object(BTreeMap<String, Attr>),
}

impl Attr {
    /// The string value, if this is a text attribute.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Attr::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The elements, if this is an array attribute.
    pub fn as_array(&self) -> Option<&[Attr]> {
        match self {
            Attr::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The field map, if this is a plain object attribute.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Attr>> {
        match self {
            Attr::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The embedded model, if this attribute holds one.
    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Attr::Model(model) => Some(model),
            _ => None,
        }
    }
}

impl Default for Attr {
    fn default() -> Self {
        Attr::Null
    }
}

impl From<&str> for Attr {
    fn from(value: &str) -> Self {
        Attr::Text(value.to_string())
    }
}

impl From<String> for Attr {
    fn from(value: String) -> Self {
        Attr::Text(value)
    }
}

impl From<Model> for Attr {
    fn from(model: Model) -> Self {
        Attr::Model(Box::new(model))
    }
}

impl From<Vec<Attr>> for Attr {
    fn from(items: Vec<Attr>) -> Self {
        Attr::Array(items)
    }
}

impl From<BTreeMap<String, Attr>> for Attr {
    fn from(map: BTreeMap<String, Attr>) -> Self {
        Attr::Object(map)
    }
}
