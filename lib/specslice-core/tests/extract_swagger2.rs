#![allow(missing_docs)]

use insta::assert_snapshot;
use rstest::rstest;
use serde_json::json;

use specslice_core::{
    Convention, ExtractConfig, Extractor, Pointer, Section, SpecFormat, SpecVersion, TreeValue,
};

mod common;
pub use self::common::*;

#[rstest]
fn should_extract_single_endpoint_with_its_closure(petstore: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(ExtractConfig::default().with_endpoint("/pets/{id}"));

    let extraction = extractor.extract(&petstore)?;

    assert!(extraction.is_complete());
    let json = SpecFormat::Json.render(&extraction.document)?;
    assert_snapshot!(json, @r##"
    {
      "swagger": "2.0",
      "info": {
        "title": "Petstore",
        "version": "1.0.0"
      },
      "consumes": [
        "application/json"
      ],
      "produces": [
        "application/json"
      ],
      "schemes": [
        "https"
      ],
      "host": "petstore.example.com",
      "basePath": "/v1",
      "paths": {
        "/pets/{id}": {
          "get": {
            "operationId": "getPet",
            "parameters": [
              {
                "$ref": "#/parameters/PetId"
              }
            ],
            "responses": {
              "200": {
                "description": "A pet",
                "schema": {
                  "$ref": "#/definitions/Pet"
                }
              },
              "404": {
                "$ref": "#/responses/NotFound"
              }
            }
          }
        }
      },
      "definitions": {
        "Pet": {
          "type": "object",
          "properties": {
            "id": {
              "type": "integer"
            },
            "name": {
              "type": "string"
            },
            "owner": {
              "$ref": "#/definitions/Owner"
            },
            "parent": {
              "$ref": "#/definitions/Pet"
            }
          }
        },
        "Owner": {
          "type": "object",
          "properties": {
            "pets": {
              "type": "array",
              "items": {
                "$ref": "#/definitions/Pet"
              }
            },
            "address": {
              "$ref": "#/definitions/Address"
            }
          }
        },
        "Address": {
          "type": "string"
        },
        "Problem": {
          "type": "object",
          "properties": {
            "detail": {
              "type": "string"
            }
          }
        },
        "AuditEntry": {
          "type": "object"
        }
      },
      "parameters": {
        "PetId": {
          "name": "id",
          "in": "path",
          "required": true,
          "type": "integer"
        }
      },
      "responses": {
        "NotFound": {
          "description": "Not found"
        }
      }
    }
    "##);

    Ok(())
}

#[rstest]
fn should_keep_endpoints_in_configured_order(petstore: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(
        ExtractConfig::default()
            .with_endpoints(["/stores", "/pets"])
            .with_widen_responses(false),
    );

    let extraction = extractor.extract(&petstore)?;

    assert_eq!(keys(&extraction.document["paths"]), ["/stores", "/pets"]);
    let convention = Convention::swagger2();
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Definitions),
        ["Pet", "NewPet", "PetBase", "PetPage", "Owner", "Address", "Store", "Problem"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Parameters),
        ["Limit"]
    );
    assert_eq!(
        section_names(&extraction.document, &convention, Section::Responses),
        ["Problem"]
    );

    Ok(())
}

#[rstest]
fn should_widen_closure_with_every_response_reference(petstore: TreeValue) -> anyhow::Result<()> {
    let strict = Extractor::new(
        ExtractConfig::default()
            .with_endpoint("/stores")
            .with_widen_responses(false),
    );
    let widened = Extractor::new(ExtractConfig::default().with_endpoint("/stores"));
    let convention = Convention::swagger2();

    let strict = strict.extract(&petstore)?;
    let widened = widened.extract(&petstore)?;

    assert_eq!(
        section_names(&strict.document, &convention, Section::Definitions),
        ["Address", "Store"]
    );
    assert_eq!(
        section_names(&widened.document, &convention, Section::Definitions),
        ["Address", "Store", "Problem", "AuditEntry"]
    );

    Ok(())
}

#[rstest]
fn should_tolerate_unknown_endpoint_and_reference(petstore: TreeValue) -> anyhow::Result<()> {
    let mut document = petstore;
    document["paths"]["/ghosts"] = json!({
        "get": { "responses": { "200": { "schema": { "$ref": "#/definitions/Ghost" } } } }
    });
    let extractor = Extractor::new(
        ExtractConfig::default()
            .with_endpoints(["/ghosts", "/nowhere"])
            .with_widen_responses(false),
    );

    let extraction = extractor.extract(&document)?;

    assert_eq!(extraction.missing_endpoints, ["/nowhere"]);
    assert_eq!(
        extraction.dropped,
        [Pointer::new(Section::Definitions, "Ghost")]
    );
    assert_eq!(extraction.document["paths"]["/nowhere"], json!({}));
    assert_eq!(extraction.document.get("definitions"), None);

    Ok(())
}

#[rstest]
fn should_resolve_concrete_scenario() -> anyhow::Result<()> {
    init_tracing();
    let document = json!({
        "swagger": "2.0",
        "paths": { "/foo": { "requestBody": { "$ref": "#/definitions/Foo" } } },
        "definitions": {
            "Foo": { "bar": { "$ref": "#/definitions/Bar" } },
            "Bar": { "type": "string" }
        }
    });
    let extractor = Extractor::new(ExtractConfig::default().with_endpoint("/foo"));

    let extraction = extractor.extract(&document)?;

    assert_eq!(
        extraction.document["definitions"],
        json!({
            "Foo": { "bar": { "$ref": "#/definitions/Bar" } },
            "Bar": { "type": "string" }
        })
    );

    Ok(())
}

#[rstest]
fn should_extract_then_convert_to_openapi3(petstore: TreeValue) -> anyhow::Result<()> {
    let extractor = Extractor::new(
        ExtractConfig::default()
            .with_endpoint("/stores")
            .with_widen_responses(false)
            .with_target_version(SpecVersion::OpenApi3),
    );

    let extraction = extractor.extract(&petstore)?;

    assert_eq!(extraction.source_version, SpecVersion::Swagger2);
    assert_eq!(keys(&extraction.document), ["openapi", "info", "paths", "components"]);
    assert_eq!(extraction.document["openapi"], "3.0.1");
    assert_eq!(extraction.document["info"], petstore["info"]);
    assert_eq!(
        extraction.document["paths"]["/stores"],
        petstore["paths"]["/stores"]
    );
    assert_eq!(keys(&extraction.document["components"]), ["Address", "Store"]);

    Ok(())
}
