use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No key line in the deck carries the parameter as a token.
    #[error("{}: parameter '{parameter}' not found", .path.display())]
    ParameterNotFound { path: PathBuf, parameter: String },

    /// `key index + offset` points outside the value line.
    #[error(
        "{}:{line}: value index {index} for '{parameter}' out of range ({len} values on line)",
        .path.display()
    )]
    ValueIndexOutOfRange {
        path: PathBuf,
        parameter: String,
        line: usize, // 1-based, value line
        index: isize,
        len: usize,
    },

    /// Replacement value is empty or would split into several tokens.
    #[error("{}: value {value:?} for '{parameter}' must be a single token", .path.display())]
    InvalidValue {
        path: PathBuf,
        parameter: String,
        value: String,
    },

    /// Key line is the last line of the deck.
    #[error("{}:{line}: key line for '{parameter}' has no value line", .path.display())]
    MissingValueLine {
        path: PathBuf,
        parameter: String,
        line: usize, // 1-based, key line
    },

    #[error("{}: malformed table: {reason}", .path.display())]
    MalformedTable { path: PathBuf, reason: String },

    #[error("external command `{command}` failed: {reason}")]
    ExternalProcess {
        command: String,
        code: Option<i32>,
        reason: String,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("expected a 3-component vector, got {got} components")]
    InvalidVectorLength { got: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Wrap an `io::Error` with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Error::MalformedTable {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Fatal errors abort the current case; only a missing parameter is not.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ParameterNotFound { .. })
    }
}
