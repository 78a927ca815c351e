//! Error types surfaced when persisting progress.
use std::{fmt, io, path::PathBuf};

/// Failures raised by progress backends and the save record codec.
#[derive(Debug)]
pub enum ProgressError {
    Io { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
    Corrupt { key: String, message: String },
}

impl ProgressError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Self::Serialize(err) => write!(f, "failed to encode save record: {}", err),
            Self::Corrupt { key, message } => {
                write!(f, "saved data under '{}' is unreadable: {}", key, message)
            }
        }
    }
}

impl std::error::Error for ProgressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Corrupt { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
