use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity-type classification that drives all field-mapping decisions.
///
/// Unknown names are kept as [`RegisterKind::Other`] so that configuration for
/// registers added later still parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegisterKind {
    Person,
    Organisation,
    Place,
    Term,
    Abbreviation,
    Other(String),
}

impl RegisterKind {
    pub fn as_str(&self) -> &str {
        match self {
            RegisterKind::Person => "person",
            RegisterKind::Organisation => "organisation",
            RegisterKind::Place => "place",
            RegisterKind::Term => "term",
            RegisterKind::Abbreviation => "abbreviation",
            RegisterKind::Other(name) => name.as_str(),
        }
    }
}

impl FromStr for RegisterKind {
    type Err = ProviderError;

    /// Case-insensitive; surrounding whitespace is ignored. Blank names are rejected
    /// since every register must address a non-empty API segment.
    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProviderError::Config("register name must not be empty".into()));
        }
        Ok(match name.to_lowercase().as_str() {
            "person" => RegisterKind::Person,
            "organisation" => RegisterKind::Organisation,
            "place" => RegisterKind::Place,
            "term" => RegisterKind::Term,
            "abbreviation" => RegisterKind::Abbreviation,
            _ => RegisterKind::Other(name.to_string()),
        })
    }
}

impl TryFrom<String> for RegisterKind {
    type Error = ProviderError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

impl From<RegisterKind> for String {
    fn from(kind: RegisterKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub register: RegisterKind,
    pub id: String,
    pub label: String,
    pub details: String,
    pub link: String,
    pub strings: Vec<String>,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Total reported by the provider; may exceed `items.len()` when paginated
    pub total_items: u64,
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Register-specific part of an [`AuthorityRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuthorityDetails {
    Place {
        country: Option<String>,
        location: Option<GeoPoint>,
        links: Vec<String>,
    },
    Person {
        birth: Option<String>,
        death: Option<String>,
        note: Option<String>,
        links: Vec<String>,
    },
    Basic,
}

/// Normalized detail record, carrying the raw payload it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityRecord {
    pub id: String,
    pub name: String,
    pub details: AuthorityDetails,
    pub raw: serde_json::Value,
}

impl AuthorityRecord {
    pub fn links(&self) -> &[String] {
        match &self.details {
            AuthorityDetails::Place { links, .. } | AuthorityDetails::Person { links, .. } => links.as_slice(),
            AuthorityDetails::Basic => &[],
        }
    }
}

/// Identity payload returned by `info`; the default value is the empty result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InfoResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub strings: Vec<String>,
}

impl InfoResult {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.strings.is_empty()
    }
}
