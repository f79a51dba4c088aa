//! Generic document tree shared by every stage of the extraction.
//!
//! Documents are handled as [`serde_json::Value`] trees whatever their text format.
//! The `preserve_order` feature of `serde_json` is enabled so mappings keep their
//! insertion order, which is what allows [`sort_by_order`] to impose a canonical
//! key order on the output.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed document fragment: null, scalar, sequence or mapping.
pub type TreeValue = Value;

/// A mapping node with unique string keys, in insertion order.
pub type Mapping = Map<String, Value>;

/// Top-level key holding the API endpoints.
pub const PATHS: &str = "paths";

/// A dot separated path into nested mappings, like `components.schemas`.
///
/// Lookups through a `KeyPath` never fail: a missing segment, or a segment
/// that does not hold a mapping, simply yields `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Parses a dot separated path. Empty segments are ignored.
    pub fn new(path: &str) -> Self {
        let segments = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();
        Self(segments)
    }

    /// Returns the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the value found at this path, if any.
    pub fn get<'a>(&self, root: &'a Mapping) -> Option<&'a Value> {
        let (last, parents) = self.0.split_last()?;
        let mut current = root;
        for segment in parents {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    /// Returns the mapping found at this path, if any.
    pub fn get_mapping<'a>(&self, root: &'a Mapping) -> Option<&'a Mapping> {
        self.get(root)?.as_object()
    }

    /// Inserts a value at this path, creating intermediate mappings on the way.
    ///
    /// An intermediate value that is not a mapping is replaced by one.
    pub fn insert(&self, root: &mut Mapping, value: Value) {
        let Some((last, parents)) = self.0.split_last() else {
            return;
        };
        let mut current = root;
        for segment in parents {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Mapping::new()));
            if !entry.is_object() {
                *entry = Value::Object(Mapping::new());
            }
            let Value::Object(next) = entry else {
                return;
            };
            current = next;
        }
        current.insert(last.clone(), value);
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for KeyPath {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<KeyPath> for String {
    fn from(value: KeyPath) -> Self {
        value.to_string()
    }
}

/// Rebuilds a mapping with its keys in the order given by `order`.
///
/// Keys missing from `order` sink to the end and keep their relative order.
pub fn sort_by_order<S: AsRef<str>>(mapping: Mapping, order: &[S]) -> Mapping {
    let mut entries: Vec<(String, Value)> = mapping.into_iter().collect();
    entries.sort_by_key(|(key, _)| order_key(order, key));
    entries.into_iter().collect()
}

fn order_key<S: AsRef<str>>(order: &[S], key: &str) -> usize {
    order
        .iter()
        .position(|known| known.as_ref() == key)
        .unwrap_or(usize::MAX)
}

/// Short name of the kind of a value, for diagnostics.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
