//! Annotation and serialization tags attached to model objects.
//!
//! Tags are free-form `key -> [values]` metadata carried over from source
//! annotations (e.g. `desc`, `example`, `format`) or struct tags
//! (e.g. `json:"name,omitempty"`). Lookups never fail: an absent key yields
//! an empty slice, `None`, or the caller's documented default.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered, read-only-by-convention map of tag keys to their values.
///
/// Insertion order is preserved so that anything derived from the tags
/// (generated code, schema output) stays deterministic.
///
/// ## Examples
///
/// ```
/// use ifacegen_define::Tags;
///
/// let tags = Tags::new()
///     .with("desc", ["User identifier"])
///     .with("json", ["id", "omitempty"]);
///
/// assert_eq!(tags.value("desc"), Some("User identifier"));
/// assert_eq!(tags.values("json"), ["id", "omitempty"]);
/// assert_eq!(tags.value_or("format", "uuid"), "uuid");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(IndexMap<String, Vec<String>>);

impl Tags {
    /// Creates an empty tag map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, returning the updated map.
    pub fn with<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(key, values);
        self
    }

    /// Inserts (or replaces) the values for `key`.
    pub fn insert<K, I, V>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.0
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    /// Returns every value recorded for `key`, or an empty slice.
    pub fn values(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first value recorded for `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// Returns the first value recorded for `key`, or `default` when absent.
    pub fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Vec<V>)>>(iter: T) -> Self {
        let mut tags = Tags::new();
        for (key, values) in iter {
            tags.insert(key, values);
        }
        tags
    }
}
