//! Sparse query mapping shared between the controller and the address bar.
//!
//! `QueryMap` mirrors the address-bar query parameters as an
//! insertion-ordered string mapping. Keys the controller does not own pass
//! through untouched, so hosts can keep their own parameters alongside.

pub mod codec;

pub use codec::QueryCodec;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical query keys owned by the controller.
pub mod keys {
    pub const TRANSACTION_TYPE: &str = "transaction-type";
    pub const TRANSACTION_NAME: &str = "transaction-name";
    pub const LAST: &str = "last";
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const SORT_ORDER: &str = "sort-order";
}

/// Insertion-ordered string mapping of query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap {
    entries: IndexMap<String, String>,
}

impl QueryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn set_millis(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Reads a value as epoch milliseconds.
    ///
    /// Missing or non-numeric values coerce to zero, which the window
    /// resolution rules treat as absent.
    #[must_use]
    pub fn millis(&self, key: &str) -> i64 {
        self.get(key)
            .map_or(0, |value| value.trim().parse::<i64>().unwrap_or(0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        }
    }
}
