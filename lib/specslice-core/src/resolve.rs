//! Transitive resolution of pointers against the document dictionaries.
//!
//! Starting from an initial set of pointers, the resolver repeatedly looks up a
//! pending pointer, records the entry it designates and scans that entry for
//! further pointers, until nothing is left pending. Every pointer is expanded at
//! most once, so self-referencing or mutually referencing entries are safe.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::convention::Section;
use crate::scan::{Pointer, PointerSet, RefPrefixes, scan};
use crate::value::Mapping;

/// A pointer-target dictionary borrowed from a document.
#[derive(Debug, Clone, Copy)]
pub struct Dictionary<'a> {
    section: Section,
    entries: &'a Mapping,
}

impl<'a> Dictionary<'a> {
    /// Wraps the entries of a section.
    pub fn new(section: Section, entries: &'a Mapping) -> Self {
        Self { section, entries }
    }

    /// The section of this dictionary.
    pub fn section(&self) -> Section {
        self.section
    }

    /// The dictionary entries.
    pub fn entries(&self) -> &'a Mapping {
        self.entries
    }

    fn lookup(&self, pointer: &Pointer) -> Option<&'a Value> {
        if !pointer.accepts(self.section) {
            return None;
        }
        self.entries.get(pointer.name())
    }
}

/// The working state of one resolution run.
#[derive(Debug, Default)]
struct Closure {
    pending: PointerSet,
    visited: HashSet<Pointer>,
    found: BTreeMap<Section, HashSet<String>>,
    dropped: Vec<Pointer>,
}

impl Closure {
    fn new(initial: PointerSet) -> Self {
        Self {
            pending: initial,
            ..Self::default()
        }
    }

    fn expand(
        &mut self,
        pointer: &Pointer,
        dictionaries: &[Dictionary<'_>],
        prefixes: &RefPrefixes,
    ) -> bool {
        let mut found = false;
        for dictionary in dictionaries {
            let Some(value) = dictionary.lookup(pointer) else {
                continue;
            };
            found = true;
            self.found
                .entry(dictionary.section)
                .or_default()
                .insert(pointer.name().to_owned());
            scan(value, prefixes, &mut self.pending);
        }
        found
    }

    fn into_resolved<'a>(self, dictionaries: &[Dictionary<'a>]) -> Resolved<'a> {
        let mut sections: BTreeMap<Section, Vec<(&'a str, &'a Value)>> = BTreeMap::new();
        for dictionary in dictionaries {
            let Some(names) = self.found.get(&dictionary.section) else {
                continue;
            };
            let entries = dictionary
                .entries
                .iter()
                .filter(|(name, _)| names.contains(name.as_str()))
                .map(|(name, value)| (name.as_str(), value));
            sections.entry(dictionary.section).or_default().extend(entries);
        }

        Resolved {
            sections,
            dropped: self.dropped,
        }
    }
}

/// The outcome of a resolution: resolved entries per section, plus dropped pointers.
///
/// Entries are borrowed from the source document and listed in the order of
/// their source dictionary.
#[derive(Debug, Clone, Default)]
pub struct Resolved<'a> {
    sections: BTreeMap<Section, Vec<(&'a str, &'a Value)>>,
    dropped: Vec<Pointer>,
}

impl<'a> Resolved<'a> {
    /// Resolved entries of a section.
    pub fn entries(&self, section: Section) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.sections.get(&section).into_iter().flatten().copied()
    }

    /// Names of the resolved entries of a section.
    pub fn names(&self, section: Section) -> Vec<&'a str> {
        self.entries(section).map(|(name, _)| name).collect()
    }

    /// Clones the resolved entries of a section into a new mapping.
    pub fn to_mapping(&self, section: Section) -> Mapping {
        self.entries(section)
            .map(|(name, value)| (name.to_owned(), value.clone()))
            .collect()
    }

    /// Pointers that matched no dictionary entry.
    pub fn dropped(&self) -> &[Pointer] {
        &self.dropped
    }

    /// Returns `true` if nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(Vec::is_empty)
    }
}

/// Resolves the transitive closure of `initial` against `dictionaries`.
///
/// A sectioned pointer is only looked up in dictionaries of its section, a bare
/// pointer in all of them. Pointers found nowhere are dropped without error and
/// reported by [`Resolved::dropped`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use specslice_core::{Convention, PointerSet, Section, resolve};
///
/// let document = json!({
///     "definitions": {
///         "Foo": { "properties": { "bar": { "$ref": "#/definitions/Bar" } } },
///         "Bar": { "type": "string" },
///         "Unused": { "type": "integer" }
///     }
/// });
/// let document = document.as_object().expect("a mapping");
/// let convention = Convention::swagger2();
/// let prefixes = convention.ref_prefixes();
///
/// let initial = PointerSet::from_iter([prefixes.pointer("#/definitions/Foo")]);
/// let resolved = resolve(&convention.dictionaries(document), &prefixes, initial);
///
/// assert_eq!(resolved.names(Section::Definitions), ["Foo", "Bar"]);
/// ```
pub fn resolve<'a>(
    dictionaries: &[Dictionary<'a>],
    prefixes: &RefPrefixes,
    initial: PointerSet,
) -> Resolved<'a> {
    let mut closure = Closure::new(initial);

    while let Some(pointer) = closure.pending.pop() {
        if !closure.visited.insert(pointer.clone()) {
            continue;
        }
        if !closure.expand(&pointer, dictionaries, prefixes) {
            debug!(%pointer, "reference not found in any dictionary, dropped");
            closure.dropped.push(pointer);
        }
    }

    closure.into_resolved(dictionaries)
}
