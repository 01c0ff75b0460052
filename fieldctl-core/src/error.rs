/// Structured error types for fieldctl-core.
///
/// Uses `thiserror` so the CLI can match on the failure class (exit codes,
/// messages) while still wrapping everything in `anyhow` at the top level.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scaffolding operations
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Base component document does not exist
    #[error("Base component '{identifier}' not found at {path:?}")]
    NotFound { identifier: String, path: PathBuf },

    /// Base component document is structurally unusable
    #[error("Invalid schema for '{component}': {reason}")]
    InvalidSchema { component: String, reason: String },

    /// A component directory for the target name already exists
    #[error("Component '{name}' already exists at {path:?}")]
    NameConflict { name: String, path: PathBuf },

    /// Malformed request (bad name, empty custom name, unknown component)
    #[error("{reason}")]
    Validation { reason: String },

    /// Synthesis failed for the given target name
    #[error("Failed to generate '{target}': {source}")]
    Synthesis {
        target: String,
        #[source]
        source: Box<ScaffoldError>,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Project configuration could not be read
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for fieldctl-core operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

impl ScaffoldError {
    pub fn not_found(identifier: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
            path: path.into(),
        }
    }

    pub fn invalid_schema(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            component: component.into(),
            reason: reason.into(),
        }
    }

    pub fn name_conflict(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NameConflict {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Wrap a synthesis failure with the name of the component being generated
    pub fn synthesis(target: impl Into<String>, source: ScaffoldError) -> Self {
        Self::Synthesis {
            target: target.into(),
            source: Box::new(source),
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScaffoldError::invalid_schema("radio-group", "definitions array is empty");
        assert_eq!(
            err.to_string(),
            "Invalid schema for 'radio-group': definitions array is empty"
        );

        let err = ScaffoldError::name_conflict("icon-radio", "/tmp/icon-radio");
        assert!(err.to_string().contains("already exists"));
        assert!(err.to_string().contains("/tmp/icon-radio"));
    }

    #[test]
    fn test_synthesis_wraps_source() {
        let inner = ScaffoldError::invalid_schema("panel", "missing template");
        let err = ScaffoldError::synthesis("survey", inner);

        assert!(err.to_string().starts_with("Failed to generate 'survey'"));
        assert!(err.to_string().contains("panel"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: ScaffoldError = io_err.into();

        assert!(matches!(err, ScaffoldError::Io { .. }));
    }
}
