//! Discovery of `$ref` pointers in arbitrary document fragments.

use std::fmt;

use indexmap::IndexSet;
use serde_json::Value;

use crate::convention::Section;
use crate::value::TreeValue;

/// Key marking an indirection, compared case-insensitively.
pub const REF_KEY: &str = "$ref";

/// A reference to an entry of a pointer-target dictionary.
///
/// The pointer remembers which dictionary its `$ref` prefix designated, so a
/// `#/parameters/Limit` is never resolved against a definition named `Limit`.
/// A pointer whose `$ref` matched no known prefix is *bare*: its name is the raw
/// `$ref` string and it may match an entry of any dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pointer {
    section: Option<Section>,
    name: String,
}

impl Pointer {
    /// Creates a pointer to an entry of the given section.
    pub fn new(section: Section, name: impl Into<String>) -> Self {
        Self {
            section: Some(section),
            name: name.into(),
        }
    }

    /// Creates a pointer that may match an entry of any section.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            section: None,
            name: name.into(),
        }
    }

    /// The targeted section, `None` for a bare pointer.
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    /// The targeted entry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this pointer may target an entry of `section`.
    pub fn accepts(&self, section: Section) -> bool {
        self.section.is_none_or(|own| own == section)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            Some(section) => write!(f, "{section}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Insertion-ordered set of pointers.
pub type PointerSet = IndexSet<Pointer>;

/// Known `$ref` prefixes and the section each one designates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefPrefixes(Vec<(String, Section)>);

impl RefPrefixes {
    /// Creates an empty prefix table: every pointer will be bare.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prefix designating `section`.
    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>, section: Section) -> Self {
        self.0.push((prefix.into(), section));
        self
    }

    /// Turns a raw `$ref` string into a pointer by stripping the first known prefix.
    pub fn pointer(&self, reference: &str) -> Pointer {
        self.0
            .iter()
            .find_map(|(prefix, section)| {
                let name = reference.strip_prefix(prefix.as_str())?;
                Some(Pointer::new(*section, name))
            })
            .unwrap_or_else(|| Pointer::bare(reference))
    }
}

/// Collects every `$ref` found under `node` into `accumulator`.
///
/// Mappings are walked entry by entry and sequences element by element; only
/// mappings can hold a `$ref`, so scalars found in sequences are skipped.
/// Referenced targets are never expanded here.
pub fn scan(node: &TreeValue, prefixes: &RefPrefixes, accumulator: &mut PointerSet) {
    match node {
        Value::Object(mapping) => {
            for (key, value) in mapping {
                if key.eq_ignore_ascii_case(REF_KEY)
                    && let Value::String(reference) = value
                {
                    accumulator.insert(prefixes.pointer(reference));
                } else if value.is_object() || value.is_array() {
                    scan(value, prefixes, accumulator);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter().filter(|item| item.is_object()) {
                scan(item, prefixes, accumulator);
            }
        }
        _ => {}
    }
}

/// Returns the pointers found under `node`.
pub fn scan_value(node: &TreeValue, prefixes: &RefPrefixes) -> PointerSet {
    let mut result = PointerSet::new();
    scan(node, prefixes, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn swagger_prefixes() -> RefPrefixes {
        RefPrefixes::new()
            .with("#/definitions/", Section::Definitions)
            .with("#/parameters/", Section::Parameters)
            .with("#/responses/", Section::Responses)
    }

    #[test]
    fn should_find_nested_refs() {
        let node = json!({
            "get": {
                "parameters": [
                    { "$ref": "#/parameters/Limit" },
                    { "name": "id", "in": "path", "type": "string" }
                ],
                "responses": {
                    "200": { "schema": { "$ref": "#/definitions/Pet" } },
                    "default": { "$ref": "#/responses/Error" }
                }
            }
        });

        let pointers = scan_value(&node, &swagger_prefixes());

        assert_eq!(
            pointers.into_iter().collect::<Vec<_>>(),
            [
                Pointer::new(Section::Parameters, "Limit"),
                Pointer::new(Section::Definitions, "Pet"),
                Pointer::new(Section::Responses, "Error"),
            ]
        );
    }

    #[test]
    fn should_match_ref_key_case_insensitively() {
        let node = json!({ "schema": { "$REF": "#/definitions/Pet" } });

        let pointers = scan_value(&node, &swagger_prefixes());

        assert!(pointers.contains(&Pointer::new(Section::Definitions, "Pet")));
    }

    #[test]
    fn should_ignore_non_string_refs_and_scalar_sequences() {
        let node = json!({
            "enum": ["#/definitions/Nope", ["#/definitions/Nested"]],
            "$ref": { "$ref": "#/definitions/Inner" },
            "description": "see #/definitions/Other"
        });

        let pointers = scan_value(&node, &swagger_prefixes());

        assert_eq!(
            pointers.into_iter().collect::<Vec<_>>(),
            [Pointer::new(Section::Definitions, "Inner")]
        );
    }

    #[test]
    fn should_keep_unknown_prefixes_as_bare_pointers() {
        let node = json!({ "allOf": [
            { "$ref": "common.yaml#/definitions/Error" },
            { "$ref": "Pet" }
        ]});

        let pointers = scan_value(&node, &swagger_prefixes());

        assert_eq!(
            pointers.into_iter().collect::<Vec<_>>(),
            [
                Pointer::bare("common.yaml#/definitions/Error"),
                Pointer::bare("Pet")
            ]
        );
    }

    #[test]
    fn should_scan_top_level_sequences() {
        let node = json!([{ "$ref": "#/definitions/A" }, 1, { "items": { "$ref": "#/definitions/B" } }]);

        let pointers = scan_value(&node, &swagger_prefixes());

        assert_eq!(pointers.len(), 2);
    }

    #[test]
    fn should_display_pointer() {
        assert_eq!(
            Pointer::new(Section::Definitions, "Pet").to_string(),
            "definitions/Pet"
        );
        assert_eq!(Pointer::bare("Pet").to_string(), "Pet");
    }

    #[test]
    fn should_accept_sections() {
        let bare = Pointer::bare("Pet");
        let definition = Pointer::new(Section::Definitions, "Pet");

        assert!(bare.accepts(Section::Responses));
        assert!(definition.accepts(Section::Definitions));
        assert!(!definition.accepts(Section::Parameters));
    }
}
