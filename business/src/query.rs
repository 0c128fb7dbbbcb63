//! List query parameters as sent to the backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Sort direction. Serialises as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n >= 0 => Ok(Self::Asc),
            Raw::Number(_) => Ok(Self::Desc),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSortError {
    #[error("unknown sort direction `{0}`, expected asc or desc")]
    Direction(String),
    #[error("sort must look like `field:asc` or `field:desc`, got `{0}`")]
    Format(String),
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "1" => Ok(Self::Asc),
            "desc" | "-1" => Ok(Self::Desc),
            other => Err(ParseSortError::Direction(other.to_owned())),
        }
    }
}

/// Parses `field:asc` / `field:desc`. A bare field sorts ascending.
pub fn parse_sort(spec: &str) -> Result<(String, SortOrder), ParseSortError> {
    match spec.split_once(':') {
        Some((field, order)) if !field.trim().is_empty() => {
            Ok((field.trim().to_owned(), order.parse()?))
        }
        None if !spec.trim().is_empty() => Ok((spec.trim().to_owned(), SortOrder::Asc)),
        _ => Err(ParseSortError::Format(spec.to_owned())),
    }
}

/// Body of every list request: `{ page, limit, filterBy, sortBy }`.
///
/// Maps are ordered so the serialised form, and therefore the cache key, does not
/// depend on insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "filterBy", default)]
    pub filter_by: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "sortBy", default)]
    pub sort_by: BTreeMap<String, SortOrder>,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl QueryParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            filter_by: BTreeMap::new(),
            sort_by: BTreeMap::new(),
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.set_sort(field, order);
        self
    }

    pub fn filtered_by(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.filter_by.insert(key.into(), value.into());
        self
    }

    /// Replaces the sort with a single field.
    pub fn set_sort(&mut self, field: impl Into<String>, order: SortOrder) {
        self.sort_by.clear();
        self.sort_by.insert(field.into(), order);
    }

    pub fn sort(&self) -> Option<(&str, SortOrder)> {
        self.sort_by
            .iter()
            .next()
            .map(|(field, order)| (field.as_str(), *order))
    }

    /// Stable identity of these parameters for `resource`.
    ///
    /// Keys are owned strings: filters carry free text, so they are never interned.
    pub fn cache_key(&self, resource: &str) -> String {
        let body = serde_json::to_string(self).unwrap_or_default();
        format!("{resource}:{body}")
    }
}

/// Interprets a CLI/form filter value: booleans and integers keep their JSON type.
pub fn filter_value(raw: &str) -> serde_json::Value {
    let raw = raw.trim();
    match raw {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => raw
            .parse::<i64>()
            .map(serde_json::Value::from)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_owned())),
    }
}
