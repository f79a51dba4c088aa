//! Per-version layout of a specification document.
//!
//! A [`Convention`] tells the rest of the crate where a given specification
//! version keeps its reusable definitions, which `$ref` prefix points into each
//! of them, which top-level keys are copied verbatim, and in which order the
//! top-level keys of an output document are written.

use serde::{Deserialize, Serialize};

use crate::resolve::Dictionary;
use crate::scan::RefPrefixes;
use crate::value::{KeyPath, Mapping};
use crate::version::SpecVersion;

/// Category of a pointer-target dictionary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// Schema definitions (`definitions`, `components.schemas`).
    #[display("definitions")]
    Definitions,
    /// Reusable parameters.
    #[display("parameters")]
    Parameters,
    /// Reusable responses.
    #[display("responses")]
    Responses,
    /// Reusable request bodies, OpenAPI 3.0 only.
    #[display("requestBodies")]
    RequestBodies,
}

/// Where a [`Section`] lives in a document and how a `$ref` points into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayout {
    /// The dictionary category.
    pub section: Section,
    /// Location of the dictionary in the document.
    pub location: KeyPath,
    /// Prefix of the `$ref` strings that target this dictionary.
    pub ref_prefix: String,
}

impl SectionLayout {
    /// Creates a new section layout.
    pub fn new(section: Section, location: &str, ref_prefix: impl Into<String>) -> Self {
        Self {
            section,
            location: KeyPath::new(location),
            ref_prefix: ref_prefix.into(),
        }
    }
}

/// Layout and output rules of one specification version.
///
/// # Example
///
/// ```rust
/// use specslice_core::{Convention, Section, SpecVersion};
///
/// let convention = Convention::swagger2();
/// assert_eq!(convention.version, SpecVersion::Swagger2);
/// let layout = convention.layout(Section::Definitions).expect("definitions layout");
/// assert_eq!(layout.ref_prefix, "#/definitions/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Convention {
    /// The specification version this convention describes.
    pub version: SpecVersion,
    /// Top-level keys copied verbatim from the input document.
    pub const_keys: Vec<String>,
    /// Canonical order of the top-level keys of an output document.
    pub key_order: Vec<String>,
    /// The pointer-target dictionaries, in output order.
    pub sections: Vec<SectionLayout>,
}

impl Convention {
    /// The Swagger 2.0 convention: top-level `definitions`, `parameters` and `responses`.
    pub fn swagger2() -> Self {
        Self {
            version: SpecVersion::Swagger2,
            const_keys: to_strings(&[
                "swagger", "info", "consumes", "produces", "schemes", "host", "basePath",
            ]),
            key_order: to_strings(&[
                "swagger",
                "info",
                "consumes",
                "produces",
                "schemes",
                "host",
                "basePath",
                "paths",
                "definitions",
                "parameters",
                "responses",
            ]),
            sections: vec![
                SectionLayout::new(Section::Definitions, "definitions", "#/definitions/"),
                SectionLayout::new(Section::Parameters, "parameters", "#/parameters/"),
                SectionLayout::new(Section::Responses, "responses", "#/responses/"),
            ],
        }
    }

    /// The OpenAPI 3.0 convention: dictionaries nested under `components`.
    pub fn openapi3() -> Self {
        Self {
            version: SpecVersion::OpenApi3,
            const_keys: to_strings(&["openapi", "info", "servers"]),
            key_order: to_strings(&["openapi", "info", "servers", "paths", "components"]),
            sections: vec![
                SectionLayout::new(
                    Section::Definitions,
                    "components.schemas",
                    "#/components/schemas/",
                ),
                SectionLayout::new(
                    Section::Parameters,
                    "components.parameters",
                    "#/components/parameters/",
                ),
                SectionLayout::new(
                    Section::Responses,
                    "components.responses",
                    "#/components/responses/",
                ),
                SectionLayout::new(
                    Section::RequestBodies,
                    "components.requestBodies",
                    "#/components/requestBodies/",
                ),
            ],
        }
    }

    /// The default convention of a version.
    pub fn for_version(version: SpecVersion) -> Self {
        match version {
            SpecVersion::Swagger2 => Self::swagger2(),
            SpecVersion::OpenApi3 => Self::openapi3(),
        }
    }

    /// Returns the layout of a section, if this convention recognizes it.
    pub fn layout(&self, section: Section) -> Option<&SectionLayout> {
        self.sections.iter().find(|layout| layout.section == section)
    }

    /// The `$ref` prefixes of every section.
    pub fn ref_prefixes(&self) -> RefPrefixes {
        self.sections
            .iter()
            .fold(RefPrefixes::new(), |prefixes, layout| {
                prefixes.with(layout.ref_prefix.clone(), layout.section)
            })
    }

    /// The pointer-target dictionaries found in `document`.
    ///
    /// Sections absent from the document, or not holding a mapping, are skipped.
    pub fn dictionaries<'a>(&self, document: &'a Mapping) -> Vec<Dictionary<'a>> {
        self.sections
            .iter()
            .filter_map(|layout| {
                let entries = layout.location.get_mapping(document)?;
                Some(Dictionary::new(layout.section, entries))
            })
            .collect()
    }
}

fn to_strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| (*key).to_owned()).collect()
}
