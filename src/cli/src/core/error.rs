use bithoven_lex::{ConfigError, EditError};
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum HlError {
    Io(String, io::Error),
    Edit(EditError),
    Config(ConfigError),
    Json(serde_json::Error),
    Mismatch(String),
    Generic(String),
}

impl fmt::Display for HlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HlError::Io(path, err) => write!(f, "Failed to read {path}: {err}"),
            HlError::Edit(err) => write!(f, "{err}"),
            HlError::Config(err) => write!(f, "{err}"),
            HlError::Json(err) => write!(f, "Invalid change batch: {err}"),
            HlError::Mismatch(msg) => write!(f, "Incremental mismatch: {msg}"),
            HlError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for HlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HlError::Io(_, err) => Some(err),
            HlError::Edit(err) => Some(err),
            HlError::Config(err) => Some(err),
            HlError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EditError> for HlError {
    fn from(err: EditError) -> Self {
        HlError::Edit(err)
    }
}

impl From<ConfigError> for HlError {
    fn from(err: ConfigError) -> Self {
        HlError::Config(err)
    }
}

impl From<serde_json::Error> for HlError {
    fn from(err: serde_json::Error) -> Self {
        HlError::Json(err)
    }
}

impl From<String> for HlError {
    fn from(msg: String) -> Self {
        HlError::Generic(msg)
    }
}

impl From<&str> for HlError {
    fn from(msg: &str) -> Self {
        HlError::Generic(msg.to_string())
    }
}

/// Read a file, keeping its path for the error message.
pub fn read_file(path: &str) -> Result<String, HlError> {
    std::fs::read_to_string(path).map_err(|err| HlError::Io(path.to_string(), err))
}
