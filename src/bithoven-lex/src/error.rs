use crate::token::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    OutOfBounds { start: usize, end: usize, len: usize },
    Inverted { start: usize, end: usize },
    NotCharBoundary(usize),
    LengthMismatch { expected: usize, actual: usize },
    InsertedMismatch(usize),
    OverlappingChanges { from: usize, previous_to: usize },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::OutOfBounds { start, end, len } => write!(
                f,
                "Edit range {start}..{end} is outside the document (length {len})"
            ),
            EditError::Inverted { start, end } => {
                write!(f, "Edit range {start}..{end} ends before it starts")
            }
            EditError::NotCharBoundary(pos) => {
                write!(f, "Edit offset {pos} is not on a character boundary")
            }
            EditError::LengthMismatch { expected, actual } => write!(
                f,
                "Edited text has length {actual}, expected {expected} from the edit"
            ),
            EditError::InsertedMismatch(pos) => {
                write!(f, "Edited text at offset {pos} does not hold the inserted text")
            }
            EditError::OverlappingChanges { from, previous_to } => write!(
                f,
                "Change starting at {from} overlaps the previous change ending at {previous_to}"
            ),
        }
    }
}
impl std::error::Error for EditError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NotAKeywordKind(TokenKind),
    DuplicateWord(String),
    InvalidWord(String),
    EmptyTag(TokenKind),
    DuplicateTag(String),
    Json(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotAKeywordKind(kind) => {
                write!(f, "Config error: '{kind}' cannot hold keywords")
            }
            ConfigError::DuplicateWord(word) => {
                write!(f, "Config error: keyword '{word}' is listed more than once")
            }
            ConfigError::InvalidWord(word) => {
                write!(f, "Config error: '{word}' is not a single word")
            }
            ConfigError::EmptyTag(kind) => {
                write!(f, "Config error: empty tag for '{kind}'")
            }
            ConfigError::DuplicateTag(tag) => {
                write!(f, "Config error: tag '{tag}' is used by more than one kind")
            }
            ConfigError::Json(msg) => write!(f, "Config error: {msg}"),
        }
    }
}
impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}
