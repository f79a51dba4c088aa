//! # Specslice Core
//!
//! Extract a minimal, self-contained subset of a Swagger 2.0 or OpenAPI 3.0
//! specification.
//!
//! Given a handful of *endpoints of interest*, the extraction keeps those
//! entries of `paths` and every definition, parameter, response or request body
//! they transitively reference through `$ref`. The result can optionally be
//! re-expressed in the other specification version.
//!
//! ## Quick Start
//!
//! ```rust
//! use specslice_core::{ExtractConfig, Extractor, SpecFormat, SpecVersion};
//!
//! # fn main() -> Result<(), specslice_core::Error> {
//! let yaml = r##"
//! swagger: "2.0"
//! info:
//!   title: Petstore
//!   version: "1.0.0"
//! paths:
//!   /pets:
//!     get:
//!       responses:
//!         "200":
//!           schema:
//!             $ref: "#/definitions/Pets"
//!   /stores:
//!     get:
//!       responses:
//!         "200":
//!           schema:
//!             $ref: "#/definitions/Store"
//! definitions:
//!   Pets:
//!     type: array
//!     items:
//!       $ref: "#/definitions/Pet"
//!   Pet:
//!     type: object
//!   Store:
//!     type: object
//! "##;
//!
//! let document = SpecFormat::Yaml.parse(yaml)?;
//!
//! let config = ExtractConfig::default()
//!     .with_endpoint("/pets")
//!     .with_target_version(SpecVersion::OpenApi3);
//! let extraction = Extractor::new(config).extract(&document)?;
//!
//! let components = &extraction.document["components"];
//! assert!(components.get("Pets").is_some());
//! assert!(components.get("Pet").is_some());
//! assert!(components.get("Store").is_none());
//!
//! let output = SpecFormat::Yaml.render(&extraction.document)?;
//! # assert!(output.contains("openapi"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`scan`] walks the selected `paths` entries and collects their `$ref` as
//!    [`Pointer`]s, each tagged with the [`Section`] its prefix designates.
//! 2. [`resolve`] follows those pointers through the document dictionaries
//!    until no new pointer shows up. Cycles are safe, unknown references are
//!    dropped and reported.
//! 3. [`Assembler`] writes the retained paths and resolved entries in the
//!    canonical key order of the document's [`Convention`].
//! 4. [`convert`] optionally remaps the top-level sections to the other version.
//!
//! [`Extractor`] runs the whole pipeline from an [`ExtractConfig`].
//!
//! ## Tolerance
//!
//! The extraction is best-effort: a `$ref` to a missing definition or an
//! endpoint of interest absent from `paths` does not fail the run. Both are
//! listed in the returned [`Extraction`] and logged with `tracing`.

mod assemble;
mod config;
mod convention;
mod convert;
mod error;
mod extract;
mod format;
mod resolve;
mod scan;
mod value;
mod version;

pub use self::assemble::{Assembled, Assembler};
pub use self::config::ExtractConfig;
pub use self::convention::{Convention, Section, SectionLayout};
pub use self::convert::{RemapRule, convert, remap_rules};
pub use self::error::{Error, Result};
pub use self::extract::{ExtractExt, Extraction, Extractor};
pub use self::format::{SpecFormat, ToYaml, YamlError};
pub use self::resolve::{Dictionary, Resolved, resolve};
pub use self::scan::{Pointer, PointerSet, REF_KEY, RefPrefixes, scan, scan_value};
pub use self::value::{KeyPath, Mapping, PATHS, TreeValue, sort_by_order};
pub use self::version::SpecVersion;
