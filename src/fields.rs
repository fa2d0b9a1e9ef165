//! Loosely-typed inputs shared by every operation

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Caller-supplied properties that this crate does not know about.
///
/// They are written verbatim after the known properties, sorted by name.
/// When deserialized, JSON values that are not strings are kept as their JSON text, and `null`s are dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraProperties {
    properties: BTreeMap<String, String>,
}

impl ExtraProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> std::iter::FromIterator<(K, V)> for ExtraProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extra = Self::new();
        for (k, v) in iter {
            extra.insert(k, v);
        }
        extra
    }
}

impl<'de> Deserialize<'de> for ExtraProperties {
    fn deserialize<D>(deserializer: D) -> Result<ExtraProperties, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw.into_iter()
            .filter_map(|(name, value)| json_to_text(value).map(|text| (name, text)))
            .collect())
    }
}


/// The outcome of assembling a record from its fields
#[derive(Clone, Debug, PartialEq)]
pub struct Assembled<T> {
    pub record: T,
    /// Non-fatal problems the caller should be told about
    pub warnings: Vec<String>,
}

impl<T> Assembled<T> {
    pub fn new(record: T) -> Self {
        Self { record, warnings: Vec::new() }
    }
}


/// Keep a value only if it is present and not empty
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Deserialize an optional text field, accepting numbers and booleans as well (e.g. `"sequence": 2`)
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(json_to_text))
}

fn json_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
