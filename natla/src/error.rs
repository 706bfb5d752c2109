//! Error type for backend loading, dispatch, construction and mapping

use natla_core::{
    BackendKind, CoreError, ElementType, MapMode, RangeViolation, Shape, ShapeError,
    StructureKind, Uplo,
};
use thiserror::Error;

/// Errors that can occur anywhere in natla
#[derive(Debug, Error)]
pub enum Error {
    /// Backend symbol not recognized
    #[error("unknown backend `{requested}`; expected one of: {}", .supported.join(", "))]
    UnknownBackend {
        requested: String,
        supported: Vec<&'static str>,
    },

    /// Explicitly requested backend could not be loaded
    #[error("backend `{requested}` is unavailable: {reason}. {remediation}")]
    BackendUnavailable {
        requested: BackendKind,
        reason: String,
        remediation: &'static str,
    },

    /// The process-wide registry was already bound
    #[error("backend already initialized with `{active}`; rebinding is not allowed")]
    AlreadyInitialized { active: BackendKind },

    /// Malformed configuration input
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Type tag not in the supported set
    #[error("unsupported element type `{requested}`; supported tags: {}", .supported.join(", "))]
    UnsupportedType {
        requested: String,
        supported: Vec<&'static str>,
    },

    /// No engine is bound for the element type
    #[error("no {} engine available (active backend: {backend})", .element_type.map_or("native", |t| t.name()))]
    EngineUnavailable {
        element_type: Option<ElementType>,
        backend: BackendKind,
    },

    /// Shape parameters inconsistent with the structure kind
    #[error("invalid shape: {0}")]
    Shape(ShapeError),

    /// Source data does not fill the storage exactly
    #[error("source holds {actual} elements, storage needs {expected}")]
    SourceMismatch { expected: usize, actual: usize },

    /// Matrix source of a different structure kind
    #[error("cannot build a {expected} matrix from a {actual} source")]
    IncompatibleSource {
        expected: StructureKind,
        actual: StructureKind,
    },

    /// Matrix source whose shape differs from the requested one
    #[error("{kind} source has shape {actual:?}, requested {expected:?}")]
    SourceShape {
        kind: StructureKind,
        expected: Shape,
        actual: Shape,
    },

    /// Matrix source that stores the other triangle
    #[error("{kind} source stores the {actual:?} triangle, requested {expected:?}")]
    SourceTriangle {
        kind: StructureKind,
        expected: Uplo,
        actual: Uplo,
    },

    /// Unknown option key or value
    #[error("invalid option `{key}` = `{value}`")]
    InvalidOption { key: String, value: String },

    /// Opening, inspecting or mapping the channel failed
    #[error("channel error while {context}: {source}")]
    Channel {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Requested window does not fit the channel
    #[error("cannot map length {length:?} at offset {offset} from a {available}-byte channel: {violation}")]
    MappingRange {
        offset: u64,
        length: Option<usize>,
        available: u64,
        violation: RangeViolation,
    },

    /// Mapping mode flag not recognized
    #[error("invalid mapping mode `{0}`; expected one of: {}", MapMode::ACCEPTED.join(", "))]
    InvalidMode(String),

    /// Mutation attempted on read-only storage
    #[error("storage is read-only")]
    ReadOnly,

    /// Element index outside the storage
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl Error {
    /// Whether this error aborts backend initialization
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownBackend { .. }
                | Error::BackendUnavailable { .. }
                | Error::AlreadyInitialized { .. }
                | Error::Config(_)
        )
    }

    pub(crate) fn unsupported_type(requested: impl Into<String>) -> Self {
        Error::UnsupportedType {
            requested: requested.into(),
            supported: ElementType::SUPPORTED_TAGS.to_vec(),
        }
    }

    pub(crate) fn unknown_backend(requested: impl Into<String>) -> Self {
        Error::UnknownBackend {
            requested: requested.into(),
            supported: BackendKind::ACCEPTED.to_vec(),
        }
    }

    pub(crate) fn channel(context: &'static str, source: std::io::Error) -> Self {
        Error::Channel { context, source }
    }
}

/// Channel errors carry an `io::Error`, which is rebuilt from its kind and
/// message. Everything else is copied field by field.
impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Error::UnknownBackend {
                requested,
                supported,
            } => Error::UnknownBackend {
                requested: requested.clone(),
                supported: supported.clone(),
            },
            Error::BackendUnavailable {
                requested,
                reason,
                remediation,
            } => Error::BackendUnavailable {
                requested: *requested,
                reason: reason.clone(),
                remediation: *remediation,
            },
            Error::AlreadyInitialized { active } => Error::AlreadyInitialized { active: *active },
            Error::Config(message) => Error::Config(message.clone()),
            Error::UnsupportedType {
                requested,
                supported,
            } => Error::UnsupportedType {
                requested: requested.clone(),
                supported: supported.clone(),
            },
            Error::EngineUnavailable {
                element_type,
                backend,
            } => Error::EngineUnavailable {
                element_type: *element_type,
                backend: *backend,
            },
            Error::Shape(e) => Error::Shape(*e),
            Error::SourceMismatch { expected, actual } => Error::SourceMismatch {
                expected: *expected,
                actual: *actual,
            },
            Error::IncompatibleSource { expected, actual } => Error::IncompatibleSource {
                expected: *expected,
                actual: *actual,
            },
            Error::SourceShape {
                kind,
                expected,
                actual,
            } => Error::SourceShape {
                kind: *kind,
                expected: *expected,
                actual: *actual,
            },
            Error::SourceTriangle {
                kind,
                expected,
                actual,
            } => Error::SourceTriangle {
                kind: *kind,
                expected: *expected,
                actual: *actual,
            },
            Error::InvalidOption { key, value } => Error::InvalidOption {
                key: key.clone(),
                value: value.clone(),
            },
            Error::Channel { context, source } => Error::Channel {
                context: *context,
                source: std::io::Error::new(source.kind(), source.to_string()),
            },
            Error::MappingRange {
                offset,
                length,
                available,
                violation,
            } => Error::MappingRange {
                offset: *offset,
                length: *length,
                available: *available,
                violation: *violation,
            },
            Error::InvalidMode(flag) => Error::InvalidMode(flag.clone()),
            Error::ReadOnly => Error::ReadOnly,
            Error::IndexOutOfBounds { index, len } => Error::IndexOutOfBounds {
                index: *index,
                len: *len,
            },
        }
    }
}

impl From<ShapeError> for Error {
    fn from(e: ShapeError) -> Self {
        Error::Shape(e)
    }
}

impl From<CoreError> for Error {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Shape(shape) => Error::Shape(shape),
            CoreError::UnknownElementType => Error::unsupported_type("<unknown>"),
            CoreError::UnknownBackend => Error::unknown_backend("<unknown>"),
            CoreError::UnknownMode => Error::InvalidMode("<unknown>".to_string()),
            CoreError::UnknownOption => Error::InvalidOption {
                key: "<unknown>".to_string(),
                value: e.to_string(),
            },
        }
    }
}

/// Result type for natla operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_lists_tags() {
        let err = Error::unsupported_type("float16");
        let msg = err.to_string();
        assert!(msg.contains("float16"));
        for tag in ["float32", "float64", "int32", "int64", "int16", "int8", "uint8"] {
            assert!(msg.contains(tag), "missing {tag} in {msg}");
        }
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::unknown_backend("cuda").is_configuration());
        assert!(Error::AlreadyInitialized {
            active: BackendKind::Mkl
        }
        .is_configuration());
        assert!(!Error::ReadOnly.is_configuration());
    }

    #[test]
    fn test_clone_keeps_payload() {
        let err = Error::unknown_backend("cuda");
        match err.clone() {
            Error::UnknownBackend {
                requested,
                supported,
            } => {
                assert_eq!(requested, "cuda");
                assert_eq!(supported, BackendKind::ACCEPTED.to_vec());
            }
            other => panic!("unexpected {other:?}"),
        }

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let cloned = Error::channel("opening the file", io).clone();
        match cloned {
            Error::Channel { context, source } => {
                assert_eq!(context, "opening the file");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
                assert_eq!(source.to_string(), "gone");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_mode_lists_every_flag() {
        let msg = Error::InvalidMode("append".to_string()).to_string();
        for flag in MapMode::ACCEPTED {
            assert!(msg.contains(flag), "missing {flag} in {msg}");
        }
    }
}
