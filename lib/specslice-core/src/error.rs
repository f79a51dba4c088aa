use crate::format::SpecFormat;

/// Errors that can occur while extracting a specification subset.
///
/// Only fatal conditions are represented here. A `$ref` pointing to a missing
/// definition or an endpoint of interest absent from `paths` are tolerated and
/// reported through [`Extraction`](crate::Extraction) instead.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum Error {
    /// The input file extension matches neither JSON nor YAML.
    #[display("Unsupported file type '{file_name}', ensure to supply either a JSON or a YAML file")]
    UnsupportedFormat {
        /// The rejected file name.
        file_name: String,
    },

    /// The version selector does not name a supported specification version.
    #[display("Unsupported specification version '{version}', expected one of 2.0 or 3.0")]
    UnsupportedVersion {
        /// The rejected version selector.
        version: String,
    },

    /// The document text is not valid for its declared format.
    #[display("Failed to parse {format} document: {message}")]
    ParseFailure {
        /// The codec that was used.
        format: SpecFormat,
        /// The underlying codec message.
        message: String,
    },

    /// The document could not be serialized back to text.
    #[display("Failed to render {format} document: {message}")]
    RenderFailure {
        /// The codec that was used.
        format: SpecFormat,
        /// The underlying codec message.
        message: String,
    },

    /// The configuration does not match the expected structure.
    #[display("Invalid configuration at '{path}': {message}")]
    InvalidConfig {
        /// Path of the offending field, e.g. `openapi3.sections[0].section`.
        path: String,
        /// The underlying deserialization message.
        message: String,
    },

    /// The document root is not a mapping.
    #[display("Expected the document root to be a mapping, got {kind}")]
    NotAMapping {
        /// Kind of value found at the root.
        kind: &'static str,
    },
}

/// Result alias used across this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unsupported_format() {
        let error = Error::UnsupportedFormat {
            file_name: "openapi.toml".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Unsupported file type 'openapi.toml', ensure to supply either a JSON or a YAML file"
        );
    }

    #[test]
    fn should_display_invalid_config_with_path() {
        let error = Error::InvalidConfig {
            path: "endpoints[0]".to_string(),
            message: "invalid type: integer `1`, expected a string".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Invalid configuration at 'endpoints[0]': invalid type: integer `1`, expected a string"
        );
    }
}
