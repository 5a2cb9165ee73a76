//! TMDB API request parameter types.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde_json::Number;

/// A single query parameter value.
///
/// `Null` means "omit this parameter"; it is never sent as the text `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// String value.
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Omitted from the request.
    Null,
}

impl QueryValue {
    /// Renders the value for the query string. `Null` renders as `None`.
    #[must_use]
    pub fn to_query_string(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Null => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<f64> for QueryValue {
    /// Non-finite floats have no query representation and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered set of query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: Vec<(String, QueryValue)>,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Adds a parameter, replacing any earlier value with the same name.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a parameter in place, replacing any earlier value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.params.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.params.push((name, value));
        }
    }

    /// Returns the value for `name`, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders name/value pairs in insertion order, dropping `Null` values.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_query_string()?)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (name, value) in iter {
            query.insert(name, value);
        }
        query
    }
}

/// Resource type for `find/{external_id}` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// Movie.
    Movie,
    /// Person.
    Person,
    /// TV series.
    Tv,
}

impl ResourceType {
    /// Returns the lowercase name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Person => "person",
            Self::Tv => "tv",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "movie" => Ok(Self::Movie),
            "person" => Ok(Self::Person),
            "tv" => Ok(Self::Tv),
            other => bail!("unknown resource type: {other}"),
        }
    }
}

/// External ID source for `find/{external_id}` lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalSource {
    /// IMDb (`tt…` / `nm…`).
    Imdb,
    /// TheTVDB.
    Tvdb,
    /// Facebook.
    Facebook,
    /// Twitter.
    Twitter,
    /// Instagram.
    Instagram,
}

impl ExternalSource {
    /// Returns the lowercase name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imdb => "imdb",
            Self::Tvdb => "tvdb",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
        }
    }

    /// Returns the `external_source` query value (e.g. `imdb_id`).
    #[must_use]
    pub fn query_value(self) -> String {
        format!("{}_id", self.as_str())
    }
}

impl fmt::Display for ExternalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExternalSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "imdb" => Ok(Self::Imdb),
            "tvdb" => Ok(Self::Tvdb),
            "facebook" => Ok(Self::Facebook),
            "twitter" => Ok(Self::Twitter),
            "instagram" => Ok(Self::Instagram),
            other => bail!("unknown external source: {other}"),
        }
    }
}
