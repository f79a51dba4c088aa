#![allow(missing_docs)]

use rstest::rstest;

use specslice_core::{
    Convention, ExtractConfig, Extractor, Section, SpecFormat, SpecVersion, TreeValue,
};

mod common;
pub use self::common::*;

#[rstest]
fn should_extract_nested_components(shop: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(ExtractConfig::default().with_endpoint("/orders"));
    let convention = Convention::openapi3();

    let extraction = extractor.extract(&shop)?;

    assert_eq!(extraction.source_version, SpecVersion::OpenApi3);
    assert!(extraction.is_complete());
    assert_eq!(
        keys(&extraction.document),
        ["openapi", "info", "servers", "paths", "components"]
    );
    assert_eq!(
        keys(&extraction.document["components"]),
        ["schemas", "responses", "requestBodies"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Definitions),
        ["Order", "OrderLine", "Customer"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::RequestBodies),
        ["NewOrder"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Responses),
        ["OrderCreated"]
    );

    Ok(())
}

#[rstest]
fn should_keep_parameters_of_selected_endpoint(shop: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(ExtractConfig::default().with_endpoint("/orders/{id}"));
    let convention = Convention::openapi3();

    let extraction = extractor.extract(&shop)?;

    assert_eq!(
        keys(&extraction.document["components"]),
        ["schemas", "parameters"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Parameters),
        ["OrderId"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Definitions),
        ["Order", "OrderLine", "Customer"]
    );

    Ok(())
}

#[rstest]
fn should_round_trip_through_yaml(shop: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(ExtractConfig::default().with_endpoint("/customers"));

    let extraction = extractor.extract(&shop)?;
    let yaml = SpecFormat::Yaml.render(&extraction.document)?;
    let parsed = SpecFormat::Yaml.parse(&yaml)?;

    assert_eq!(parsed, extraction.document);
    assert_eq!(keys(&parsed["components"]["schemas"]), ["Order", "OrderLine", "Customer"]);

    Ok(())
}

#[rstest]
fn should_extract_then_convert_to_swagger2(shop: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(
        ExtractConfig::default()
            .with_endpoint("/orders/{id}")
            .with_target_version(SpecVersion::Swagger2),
    );

    let extraction = extractor.extract(&shop)?;

    assert_eq!(
        keys(&extraction.document),
        ["swagger", "info", "paths", "definitions"]
    );
    assert_eq!(extraction.document["swagger"], "2.0");
    assert_eq!(
        keys(&extraction.document["definitions"]),
        ["schemas", "parameters"]
    );

    Ok(())
}
