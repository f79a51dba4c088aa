//! Structural conversion between Swagger 2.0 and OpenAPI 3.0 documents.
//!
//! The conversion relocates the four structurally analogous top-level sections
//! (version marker, `info`, `paths`, and `definitions` / `components`). Schema
//! syntax is left untouched.

use serde_json::Value;
use tracing::debug;

use crate::convention::Convention;
use crate::value::{KeyPath, Mapping, TreeValue, sort_by_order};
use crate::version::SpecVersion;

/// Fills a top-level key of the converted document from a path of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapRule {
    /// Key written in the converted document.
    pub target_key: &'static str,
    /// Dot separated path read from the source document.
    pub source_path: &'static str,
}

impl RemapRule {
    const fn new(target_key: &'static str, source_path: &'static str) -> Self {
        Self {
            target_key,
            source_path,
        }
    }
}

const TO_SWAGGER2: &[RemapRule] = &[
    RemapRule::new("swagger", "openapi"),
    RemapRule::new("info", "info"),
    RemapRule::new("paths", "paths"),
    RemapRule::new("definitions", "components"),
];

const TO_OPENAPI3: &[RemapRule] = &[
    RemapRule::new("openapi", "swagger"),
    RemapRule::new("info", "info"),
    RemapRule::new("paths", "paths"),
    RemapRule::new("components", "definitions"),
];

/// The rules producing a document of the `target` version.
pub fn remap_rules(target: SpecVersion) -> &'static [RemapRule] {
    match target {
        SpecVersion::Swagger2 => TO_SWAGGER2,
        SpecVersion::OpenApi3 => TO_OPENAPI3,
    }
}

/// Converts a document to the version of `target`.
///
/// A document whose version markers all match the target is returned
/// unchanged, as is a document whose root is not a mapping. Otherwise each
/// [`RemapRule`] of the target is applied (a missing source becomes an empty
/// mapping), the version marker is overwritten with the target version number
/// and the keys are sorted in the target's canonical order.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use specslice_core::{Convention, convert};
///
/// let swagger = json!({
///     "swagger": "2.0",
///     "info": { "title": "Pets" },
///     "paths": {},
///     "definitions": { "Pet": { "type": "object" } }
/// });
///
/// let openapi = convert(swagger, &Convention::openapi3());
///
/// assert_eq!(openapi, json!({
///     "openapi": "3.0.1",
///     "info": { "title": "Pets" },
///     "paths": {},
///     "components": { "Pet": { "type": "object" } }
/// }));
/// ```
pub fn convert(document: TreeValue, target: &Convention) -> TreeValue {
    let Value::Object(input) = document else {
        return document;
    };
    let version = target.version;
    if version.matches(&input) {
        return Value::Object(input);
    }
    debug!(%version, "converting document");

    let mut output = Mapping::new();
    for rule in remap_rules(version) {
        let value = KeyPath::new(rule.source_path)
            .get(&input)
            .cloned()
            .unwrap_or_else(|| Value::Object(Mapping::new()));
        output.insert(rule.target_key.to_owned(), value);
    }
    output.insert(
        version.marker().to_owned(),
        Value::String(version.number().to_owned()),
    );

    Value::Object(sort_by_order(output, &target.key_order))
}
