//! The extraction pipeline: scan, resolve, assemble and optionally convert.

use serde_json::Value;
use tracing::{debug, warn};

use crate::assemble::Assembler;
use crate::config::ExtractConfig;
use crate::convert::convert;
use crate::error::{Error, Result};
use crate::scan::Pointer;
use crate::value::{Mapping, TreeValue, kind_of};
use crate::version::SpecVersion;

/// The result of an extraction.
///
/// Besides the output document, it reports what the extraction tolerated:
/// references that matched no definition and endpoints of interest that were
/// not found. Neither prevents the document from being produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The extracted document, converted when a target version was configured.
    pub document: TreeValue,

    /// The version the input document was read as.
    pub source_version: SpecVersion,

    /// References that matched no dictionary entry.
    pub dropped: Vec<Pointer>,

    /// Endpoints of interest absent from the input `paths`.
    pub missing_endpoints: Vec<String>,
}

impl Extraction {
    /// Returns `true` if every reference and every endpoint of interest was found.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty() && self.missing_endpoints.is_empty()
    }
}

/// Extracts the endpoints of interest of a document.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use specslice_core::{ExtractConfig, Extractor, SpecVersion};
///
/// # fn main() -> Result<(), specslice_core::Error> {
/// let document = json!({
///     "swagger": "2.0",
///     "info": { "title": "Pets", "version": "1.0.0" },
///     "paths": {
///         "/foo": { "requestBody": { "$ref": "#/definitions/Foo" } },
///         "/other": {}
///     },
///     "definitions": {
///         "Foo": { "properties": { "bar": { "$ref": "#/definitions/Bar" } } },
///         "Bar": { "type": "string" }
///     }
/// });
///
/// let extractor = Extractor::new(ExtractConfig::default().with_endpoint("/foo"));
/// let extraction = extractor.extract(&document)?;
///
/// assert_eq!(extraction.source_version, SpecVersion::Swagger2);
/// assert_eq!(extraction.document["definitions"]["Bar"], json!({ "type": "string" }));
/// assert!(extraction.document["paths"].get("/other").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor from its configuration.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// The extractor configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// The version `document` is read as.
    ///
    /// The configured source version wins, then the document marker. A document
    /// without marker is read as Swagger 2.0.
    pub fn source_version(&self, document: &Mapping) -> SpecVersion {
        if let Some(version) = self.config.source_version {
            return version;
        }
        SpecVersion::detect(document).unwrap_or_else(|| {
            warn!("no version marker found, reading document as Swagger 2.0");
            SpecVersion::Swagger2
        })
    }

    /// Runs the extraction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAMapping`] if the document root is not a mapping.
    pub fn extract(&self, document: &TreeValue) -> Result<Extraction> {
        let Value::Object(input) = document else {
            return Err(Error::NotAMapping {
                kind: kind_of(document),
            });
        };

        let source_version = self.source_version(input);
        debug!(%source_version, endpoints = ?self.config.endpoints, "extracting");

        let assembled = Assembler::new(self.config.convention(source_version))
            .with_widen_responses(self.config.widen_responses)
            .assemble(input, &self.config.endpoints);

        let document = match self.config.target_version {
            Some(target) => convert(assembled.document, self.config.convention(target)),
            None => assembled.document,
        };

        Ok(Extraction {
            document,
            source_version,
            dropped: assembled.dropped,
            missing_endpoints: assembled.missing_endpoints,
        })
    }
}

/// Extension trait for convenient extraction from a document.
pub trait ExtractExt {
    /// Extracts from this document using the provided extractor.
    ///
    /// This is a convenience method that calls `extractor.extract(self)`.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract`].
    fn extract_with(&self, extractor: &Extractor) -> Result<Extraction>;
}

impl ExtractExt for TreeValue {
    fn extract_with(&self, extractor: &Extractor) -> Result<Extraction> {
        extractor.extract(self)
    }
}
