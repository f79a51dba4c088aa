//! Construction of the filtered output document.

use serde_json::Value;
use tracing::{debug, warn};

use crate::convention::{Convention, Section};
use crate::resolve::resolve;
use crate::scan::{Pointer, PointerSet, RefPrefixes, scan};
use crate::value::{Mapping, PATHS, TreeValue, sort_by_order};

/// Builds an output document holding only the endpoints of interest and the
/// definitions they need.
///
/// The assembler copies the convention's constant keys, keeps the selected
/// entries of `paths`, resolves every dictionary entry they transitively
/// reference and writes the result in the convention's canonical key order.
///
/// # Responses widening
///
/// Reusable responses are often shared by unrelated endpoints. Unless disabled
/// with [`Assembler::with_widen_responses`], every `$ref` found in a non-empty
/// responses dictionary is added to the initial pointers, so the output keeps
/// what those responses reference even when no selected endpoint reaches them.
/// The responses themselves are only kept when referenced.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use specslice_core::{Assembler, Convention};
///
/// let input = json!({
///     "swagger": "2.0",
///     "paths": { "/foo": { "get": { "$ref": "#/definitions/Foo" } }, "/other": {} },
///     "definitions": { "Foo": { "type": "string" }, "Other": { "type": "string" } }
/// });
/// let convention = Convention::swagger2();
///
/// let assembled = Assembler::new(&convention).assemble(input.as_object().expect("a mapping"), &["/foo"]);
///
/// assert_eq!(
///     assembled.document,
///     json!({
///         "swagger": "2.0",
///         "paths": { "/foo": { "get": { "$ref": "#/definitions/Foo" } } },
///         "definitions": { "Foo": { "type": "string" } }
///     })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Assembler<'c> {
    convention: &'c Convention,
    widen_responses: bool,
}

/// The assembled document with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    /// The filtered document.
    pub document: TreeValue,
    /// Pointers that matched no dictionary entry.
    pub dropped: Vec<Pointer>,
    /// Endpoints of interest absent from the input `paths`.
    pub missing_endpoints: Vec<String>,
}

impl<'c> Assembler<'c> {
    /// Creates an assembler for documents following `convention`.
    pub fn new(convention: &'c Convention) -> Self {
        Self {
            convention,
            widen_responses: true,
        }
    }

    /// Enables or disables the responses widening, enabled by default.
    #[must_use]
    pub fn with_widen_responses(mut self, widen_responses: bool) -> Self {
        self.widen_responses = widen_responses;
        self
    }

    /// Assembles the output document for the given endpoints of interest.
    pub fn assemble<S: AsRef<str>>(&self, input: &Mapping, root_keys: &[S]) -> Assembled {
        let prefixes = self.convention.ref_prefixes();
        let mut output = Mapping::new();

        for key in &self.convention.const_keys {
            if let Some(value) = input.get(key) {
                output.insert(key.clone(), value.clone());
            }
        }

        let source_paths = input.get(PATHS).and_then(Value::as_object);
        let mut paths = Mapping::new();
        let mut initial = PointerSet::new();
        let mut missing_endpoints = Vec::new();
        for key in root_keys {
            let key = key.as_ref();
            if let Some(entry) = source_paths.and_then(|source| source.get(key)) {
                scan(entry, &prefixes, &mut initial);
                paths.insert(key.to_owned(), entry.clone());
            } else {
                warn!(endpoint = key, "endpoint of interest not found in paths");
                missing_endpoints.push(key.to_owned());
                paths.insert(key.to_owned(), Value::Object(Mapping::new()));
            }
        }

        if self.widen_responses {
            self.widen_with_responses(input, &prefixes, &mut initial);
        }

        let dictionaries = self.convention.dictionaries(input);
        let resolved = resolve(&dictionaries, &prefixes, initial);
        debug!(
            endpoints = paths.len(),
            dropped = resolved.dropped().len(),
            "references resolved"
        );

        output.insert(PATHS.to_owned(), Value::Object(paths));
        for layout in &self.convention.sections {
            let entries = resolved.to_mapping(layout.section);
            if !entries.is_empty() {
                layout.location.insert(&mut output, Value::Object(entries));
            }
        }

        Assembled {
            document: Value::Object(sort_by_order(output, &self.convention.key_order)),
            dropped: resolved.dropped().to_vec(),
            missing_endpoints,
        }
    }

    fn widen_with_responses(
        &self,
        input: &Mapping,
        prefixes: &RefPrefixes,
        initial: &mut PointerSet,
    ) {
        let Some(responses) = self
            .convention
            .layout(Section::Responses)
            .and_then(|layout| layout.location.get_mapping(input))
        else {
            return;
        };
        for response in responses.values() {
            scan(response, prefixes, initial);
        }
    }
}
