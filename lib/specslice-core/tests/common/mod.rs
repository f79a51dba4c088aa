use std::collections::BTreeSet;

use rstest::fixture;
use specslice_core::{Convention, Section, SpecFormat, TreeValue};
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub fn petstore() -> TreeValue {
    init_tracing();
    match SpecFormat::Json.parse(include_str!("../fixtures/petstore-v2.json")) {
        Ok(document) => document,
        Err(error) => {
            panic!("fail to parse petstore fixture: {error}");
        }
    }
}

#[fixture]
pub fn shop() -> TreeValue {
    init_tracing();
    match SpecFormat::Yaml.parse(include_str!("../fixtures/shop-v3.yaml")) {
        Ok(document) => document,
        Err(error) => {
            panic!("fail to parse shop fixture: {error}");
        }
    }
}

/// Top-level keys of a mapping, in order.
pub fn keys(value: &TreeValue) -> Vec<String> {
    value
        .as_object()
        .map(|mapping| mapping.keys().cloned().collect())
        .unwrap_or_default()
}

/// Entry names of a section of `document`, in order.
pub fn section_names(document: &TreeValue, convention: &Convention, section: Section) -> Vec<String> {
    document
        .as_object()
        .and_then(|mapping| convention.layout(section)?.location.get_mapping(mapping))
        .map(|entries| entries.keys().cloned().collect())
        .unwrap_or_default()
}

/// Entry names of every section of `document`, tagged with their section.
pub fn all_entries(document: &TreeValue, convention: &Convention) -> BTreeSet<(Section, String)> {
    convention
        .sections
        .iter()
        .flat_map(|layout| {
            section_names(document, convention, layout.section)
                .into_iter()
                .map(move |name| (layout.section, name))
        })
        .collect()
}
