use thiserror::Error;

use crate::config::ConfigError;

/// An attempted node field value violates its grammar.
///
/// Raised at the point of construction or mutation. Nothing is changed when
/// one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid tag text: {0:?} (must be non-blank and contain no '<')")]
    InvalidTagText(String),

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    #[error("Invalid attribute value: {0:?} (must be non-blank and contain no '\"')")]
    InvalidAttributeValue(String),

    #[error("Node {0} cannot be a document root while it has a parent")]
    NotARoot(u32),
}

/// A mapped type is missing schema metadata or declares it inconsistently.
///
/// Always raised during pre-validation, before any node exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Type {type_name} has no schema descriptor")]
    MissingSchema { type_name: String },

    #[error("Field {type_name}.{field} declares more than one role")]
    ConflictingRoles { type_name: String, field: String },

    #[error("Type {type_name} declares tag text on more than one field: {}", .fields.join(", "))]
    MultipleTagText {
        type_name: String,
        fields: Vec<String>,
    },

    #[error("Field {type_name}.{field} holds a {found} value where a scalar is required")]
    UnsupportedValue {
        type_name: String,
        field: String,
        found: &'static str,
    },
}

/// Failure of a single mapping call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Schema configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Validation error while mapping: {0}")]
    Validation(#[from] ValidationError),
}

/// Main library error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Mapping result type alias
pub type MappingResult<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidTagName("3plano".to_string());
        assert!(err.to_string().contains("Invalid tag name"));
        assert!(err.to_string().contains("3plano"));

        let err = ValidationError::InvalidAttributeValue("a\"b".to_string());
        assert!(err.to_string().contains("Invalid attribute value"));
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::MissingSchema {
            type_name: "String".to_string(),
        };
        assert_eq!(err.to_string(), "Type String has no schema descriptor");

        let err = ConfigurationError::MultipleTagText {
            type_name: "Fuc".to_string(),
            fields: vec!["nome".to_string(), "ects".to_string()],
        };
        assert!(err.to_string().contains("nome, ects"));

        let err = ConfigurationError::ConflictingRoles {
            type_name: "Fuc".to_string(),
            field: "codigo".to_string(),
        };
        assert!(err.to_string().contains("Fuc.codigo"));
    }

    #[test]
    fn test_mapping_error_conversion() {
        let err: MappingError = ValidationError::InvalidTagName(String::new()).into();
        assert!(matches!(err, MappingError::Validation(_)));

        let err: MappingError = ConfigurationError::MissingSchema {
            type_name: "X".to_string(),
        }
        .into();
        assert!(matches!(err, MappingError::Configuration(_)));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);

        assert!(error.source().is_some());
        assert_eq!(error.source().unwrap().to_string(), "File not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let error: Error = io_error.into();

        match error {
            Error::Io(_) => (),
            _ => panic!("Expected Error::Io"),
        }
    }
}
