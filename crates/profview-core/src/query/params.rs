//! Multi-valued query parameter map.
//!
//! A query string may repeat a key (`?f=a&f=b`).  [`QueryParams`] keeps every
//! value but, like most web frameworks, [`QueryParams::get`] only looks at the
//! first one and [`QueryParams::set`] replaces them all.
//!
//! Keys are kept sorted so that [`QueryParams::encode`] always produces the
//! same string for the same parameters, whatever order they arrived in.

use std::collections::BTreeMap;

use url::{form_urlencoded, Url};

/// Decoded query parameters, keyed and sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the query parameters of `url`.
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Parses a raw `application/x-www-form-urlencoded` query string
    /// (without the leading `?`).
    pub fn parse(query: &str) -> Self {
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    fn from_pairs<K, V>(pairs: impl Iterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.values.entry(key.into()).or_default().push(value.into());
        }
        params
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Replaces every value of `key` with `value`.
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), vec![value.to_string()]);
    }

    /// Removes every value of `key`.
    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encodes the parameters as a query string, sorted by key.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.values {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}
