//! JSON and YAML codecs for specification documents.
//!
//! The format of a document is decided from its file extension. Documents are
//! always written back in the format they were read from.
//!
//! # Example
//!
//! ```rust
//! use specslice_core::SpecFormat;
//!
//! # fn main() -> Result<(), specslice_core::Error> {
//! let format = SpecFormat::from_file_name("petstore.YML")?;
//! assert_eq!(format, SpecFormat::Yaml);
//!
//! let document = SpecFormat::Json.parse(r#"{ "swagger": "2.0" }"#)?;
//! assert_eq!(document["swagger"], "2.0");
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::TreeValue;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Text format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SpecFormat {
    /// JSON, `.json` files.
    #[display("JSON")]
    Json,
    /// YAML, `.yaml` and `.yml` files.
    #[display("YAML")]
    Yaml,
}

impl SpecFormat {
    /// Selects the format from a file name extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] when the extension is neither JSON nor YAML.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        Self::from_path(Path::new(file_name))
    }

    /// Selects the format from the extension of a path, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] when the extension is neither JSON nor YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                file_name: path.display().to_string(),
            }),
        }
    }

    /// The canonical file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] with the codec message when `text` is invalid.
    pub fn parse(self, text: &str) -> Result<TreeValue> {
        let result = match self {
            Self::Json => serde_json::from_str(text).map_err(|err| err.to_string()),
            Self::Yaml => serde_saphyr::from_str_with_options(text, yaml_options())
                .map_err(|err| err.to_string()),
        };
        result.map_err(|message| Error::ParseFailure {
            format: self,
            message,
        })
    }

    /// Renders a document.
    ///
    /// JSON output is pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RenderFailure`] when the codec rejects the value.
    pub fn render(self, value: &TreeValue) -> Result<String> {
        let result = match self {
            Self::Json => serde_json::to_string_pretty(value).map_err(|err| err.to_string()),
            Self::Yaml => value.to_yaml().map_err(|err| err.to_string()),
        };
        result.map_err(|message| Error::RenderFailure {
            format: self,
            message,
        })
    }
}

/// YAML reader options with no node budget, large API descriptions go past the default one.
fn yaml_options() -> serde_saphyr::Options {
    serde_saphyr::Options {
        budget: None,
        ..serde_saphyr::Options::default()
    }
}

/// Extension trait for serializing types to YAML.
///
/// This trait is implemented for all types that implement [`Serialize`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use specslice_core::ToYaml;
///
/// let yaml = json!({ "info": { "title": "Pets" } }).to_yaml().expect("should serialize");
/// assert!(yaml.contains("title: Pets"));
/// ```
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}
