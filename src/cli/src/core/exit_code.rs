use crate::core::error::HlError;
use bithoven_lex::{ConfigError, EditError};

/// Failure exit codes for the bhl CLI. Success exits with 0 and 2 is left to
/// clap for usage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// General/unspecified error
    GeneralError = 1,
    /// Keyword/tag configuration rejected
    ConfigError = 3,
    /// Source, config or change file unreadable
    FileError = 4,
    /// Edit or change batch does not fit the document
    InputError = 5,
    /// Incremental result differs from a full rescan
    MismatchError = 6,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<&Box<dyn std::error::Error>> for ExitCode {
    fn from(error: &Box<dyn std::error::Error>) -> Self {
        if let Some(hl_error) = error.downcast_ref::<HlError>() {
            match hl_error {
                HlError::Io(..) => ExitCode::FileError,
                HlError::Edit(_) => ExitCode::InputError,
                HlError::Json(_) => ExitCode::InputError,
                HlError::Config(_) => ExitCode::ConfigError,
                HlError::Mismatch(_) => ExitCode::MismatchError,
                HlError::Generic(_) => ExitCode::GeneralError,
            }
        } else if error.downcast_ref::<std::io::Error>().is_some() {
            ExitCode::FileError
        } else if error.downcast_ref::<EditError>().is_some()
            || error.downcast_ref::<serde_json::Error>().is_some()
        {
            ExitCode::InputError
        } else if error.downcast_ref::<ConfigError>().is_some() {
            ExitCode::ConfigError
        } else {
            ExitCode::GeneralError
        }
    }
}
