//! Extraction configuration.
//!
//! The configuration can be built programmatically or loaded from a JSON or
//! YAML file. Every field is optional in a file:
//!
//! ```yaml
//! endpoints:
//!   - /v4/involved-parties/search/agreementIdentifiers
//! targetVersion: "2.0"
//! widenResponses: true
//! ```

use serde::{Deserialize, Serialize};

use crate::convention::Convention;
use crate::error::{Error, Result};
use crate::format::SpecFormat;
use crate::value::TreeValue;
use crate::version::SpecVersion;

/// Settings driving an [`Extractor`](crate::Extractor).
///
/// # Example
///
/// ```rust
/// use specslice_core::{ExtractConfig, SpecVersion};
///
/// let config = ExtractConfig::default()
///     .with_endpoint("/pets")
///     .with_endpoint("/pets/{id}")
///     .with_target_version(SpecVersion::OpenApi3);
///
/// assert_eq!(config.endpoints, ["/pets", "/pets/{id}"]);
/// assert!(config.widen_responses);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractConfig {
    /// Endpoints of interest, keys of the `paths` section, in output order.
    pub endpoints: Vec<String>,

    /// Version of the input document, detected from its marker when unset.
    pub source_version: Option<SpecVersion>,

    /// Version of the output document, same as the input when unset.
    pub target_version: Option<SpecVersion>,

    /// Keep every reference found in the responses dictionary.
    pub widen_responses: bool,

    /// Swagger 2.0 layout and output rules.
    pub swagger2: Convention,

    /// OpenAPI 3.0 layout and output rules.
    pub openapi3: Convention,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            source_version: None,
            target_version: None,
            widen_responses: true,
            swagger2: Convention::swagger2(),
            openapi3: Convention::openapi3(),
        }
    }
}

impl ExtractConfig {
    /// Reads a configuration from an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] with the path of the offending field.
    pub fn from_value(value: TreeValue) -> Result<Self> {
        serde_path_to_error::deserialize(value).map_err(|err| Error::InvalidConfig {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    /// Parses a configuration file content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] when `text` is not valid for `format`,
    /// or [`Error::InvalidConfig`] when its structure is wrong.
    pub fn parse(format: SpecFormat, text: &str) -> Result<Self> {
        Self::from_value(format.parse(text)?)
    }

    /// Adds an endpoint of interest.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    /// Adds several endpoints of interest.
    #[must_use]
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints.extend(endpoints.into_iter().map(Into::into));
        self
    }

    /// Forces the version of the input document.
    #[must_use]
    pub fn with_source_version(mut self, version: SpecVersion) -> Self {
        self.source_version = Some(version);
        self
    }

    /// Converts the output document to `version`.
    #[must_use]
    pub fn with_target_version(mut self, version: SpecVersion) -> Self {
        self.target_version = Some(version);
        self
    }

    /// Enables or disables the responses widening.
    #[must_use]
    pub fn with_widen_responses(mut self, widen_responses: bool) -> Self {
        self.widen_responses = widen_responses;
        self
    }

    /// Replaces the convention of the version it describes.
    #[must_use]
    pub fn with_convention(mut self, convention: Convention) -> Self {
        match convention.version {
            SpecVersion::Swagger2 => self.swagger2 = convention,
            SpecVersion::OpenApi3 => self.openapi3 = convention,
        }
        self
    }

    /// The convention used for documents of `version`.
    pub fn convention(&self, version: SpecVersion) -> &Convention {
        match version {
            SpecVersion::Swagger2 => &self.swagger2,
            SpecVersion::OpenApi3 => &self.openapi3,
        }
    }
}
