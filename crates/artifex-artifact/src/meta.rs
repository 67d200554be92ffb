//! Open, extensible artifact metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known metadata keys
pub mod keys {
    /// Source language of a code artifact
    pub const LANGUAGE: &str = "language";
    /// Suggested file name
    pub const FILENAME: &str = "filename";
    /// Target platform hint
    pub const PLATFORM: &str = "platform";
}

/// String-keyed attribute map
///
/// Keeps insertion order so serialized fences are stable. Unknown keys are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactMeta(IndexMap<String, String>);

impl ArtifactMeta {
    /// Create empty metadata
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a value, preserving the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Check whether a key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[inline]
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.get(keys::LANGUAGE)
    }

    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.get(keys::FILENAME)
    }

    #[inline]
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.get(keys::PLATFORM)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ArtifactMeta
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
