use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::value::Mapping;

/// The specification versions a document can be read from or converted to.
///
/// Each version is identified in a document by its marker key: `swagger` for
/// Swagger 2.0, `openapi` for OpenAPI 3.0.
///
/// # Parsing
///
/// Version selectors are parsed case-insensitively and accept the usual
/// spellings:
///
/// ```rust
/// use specslice_core::SpecVersion;
///
/// assert_eq!("2".parse::<SpecVersion>().ok(), Some(SpecVersion::Swagger2));
/// assert_eq!("swagger".parse::<SpecVersion>().ok(), Some(SpecVersion::Swagger2));
/// assert_eq!("V3_0".parse::<SpecVersion>().ok(), Some(SpecVersion::OpenApi3));
/// assert_eq!("3.0.1".parse::<SpecVersion>().ok(), Some(SpecVersion::OpenApi3));
/// assert!("4".parse::<SpecVersion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SpecVersion {
    /// Swagger 2.0, marked by `swagger: "2.0"`.
    #[display("Swagger 2.0")]
    Swagger2,

    /// OpenAPI 3.0, marked by `openapi: "3.0.1"`.
    #[display("OpenAPI 3.0")]
    OpenApi3,
}

impl SpecVersion {
    /// All supported versions, in detection order.
    pub const ALL: [Self; 2] = [Self::Swagger2, Self::OpenApi3];

    /// The top-level key holding the version string.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Swagger2 => "swagger",
            Self::OpenApi3 => "openapi",
        }
    }

    /// The literal version string written under the marker key.
    pub fn number(self) -> &'static str {
        match self {
            Self::Swagger2 => "2.0",
            Self::OpenApi3 => "3.0.1",
        }
    }

    /// Detects the version of a document from the marker key it carries.
    pub fn detect(document: &Mapping) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|version| document.contains_key(version.marker()))
    }

    /// Returns `true` when every version marker present in `document` is this
    /// version's marker.
    ///
    /// A document without any marker is considered to be of every version.
    pub fn matches(self, document: &Mapping) -> bool {
        Self::ALL
            .into_iter()
            .map(Self::marker)
            .filter(|marker| document.contains_key(*marker))
            .all(|marker| marker.eq_ignore_ascii_case(self.marker()))
    }
}

impl FromStr for SpecVersion {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', ".");
        let normalized = match normalized.strip_prefix('v') {
            Some(rest) if rest.starts_with(|ch: char| ch.is_ascii_digit()) => rest,
            _ => normalized.as_str(),
        };

        match normalized {
            "2" | "2.0" | "2.0.0" | "swagger" => Ok(Self::Swagger2),
            "3" | "3.0" | "3.0.0" | "3.0.1" | "openapi" => Ok(Self::OpenApi3),
            _ => Err(Error::UnsupportedVersion {
                version: value.to_owned(),
            }),
        }
    }
}

impl Serialize for SpecVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.number())
    }
}

impl<'de> Deserialize<'de> for SpecVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SpecVersionVisitor)
    }
}

/// Accepts `"3.0"` as well as the bare numbers `3` or `3.0` that YAML
/// configuration files tend to produce.
struct SpecVersionVisitor;

impl Visitor<'_> for SpecVersionVisitor {
    type Value = SpecVersion;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a specification version like \"2.0\" or \"3.0\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        self.visit_str(&value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        self.visit_str(&value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        self.visit_str(&format!("{value:.1}"))
    }
}
