//! Error taxonomy for tree construction, kind dispatch and persistence.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiModelResult<T> = Result<T, ApiModelError>;

/// Errors raised while building, dispatching or persisting an API item tree.
#[derive(Debug)]
pub enum ApiModelError {
    /// Structural violation, e.g. attaching an already-parented item.
    InvalidOperation(String),
    /// Persisted record names a kind with no registered factory.
    UnknownKind(String),
    /// A factory is already registered for this kind.
    DuplicateKind(String),
    /// Kind tag is not a well-formed identifier.
    InvalidKindTag(String),
    /// Record is missing a field or the field has the wrong shape.
    InvalidRecord {
        field: &'static str,
        message: String,
    },
    /// Failure while rebuilding a nested member.
    DeserializationFailed {
        kind: String,
        path: String,
        source: Box<ApiModelError>,
    },
    /// Package file was written by a newer schema.
    UnsupportedSchemaVersion {
        file_version: u32,
        latest_supported: u32,
    },
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl ApiModelError {
    pub(crate) fn invalid_record(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            field,
            message: message.into(),
        }
    }

    /// Wraps a member failure with its position under the current container.
    ///
    /// Nested failures keep the innermost kind and grow the path outward, so
    /// the final error reads like `members[0].members[3]`.
    pub(crate) fn within_member(self, index: usize, kind: &str) -> Self {
        let segment = format!("members[{index}]");
        match self {
            Self::DeserializationFailed { kind, path, source } => Self::DeserializationFailed {
                kind,
                path: format!("{segment}.{path}"),
                source,
            },
            other => Self::DeserializationFailed {
                kind: kind.to_string(),
                path: segment,
                source: Box::new(other),
            },
        }
    }

    /// Innermost error, skipping any `DeserializationFailed` wrappers.
    pub fn root_cause(&self) -> &ApiModelError {
        match self {
            Self::DeserializationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl Display for ApiModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperation(message) => write!(f, "invalid operation: {message}"),
            Self::UnknownKind(kind) => write!(f, "no factory registered for kind: {kind}"),
            Self::DuplicateKind(kind) => write!(f, "kind already registered: {kind}"),
            Self::InvalidKindTag(kind) => write!(f, "kind tag is invalid: `{kind}`"),
            Self::InvalidRecord { field, message } => {
                write!(f, "invalid record field `{field}`: {message}")
            }
            Self::DeserializationFailed { kind, path, source } => {
                write!(f, "failed to deserialize {kind} at {path}: {source}")
            }
            Self::UnsupportedSchemaVersion {
                file_version,
                latest_supported,
            } => write!(
                f,
                "package file schema version {file_version} is newer than supported {latest_supported}"
            ),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DeserializationFailed { source, .. } => Some(source.as_ref()),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ApiModelError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ApiModelError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
