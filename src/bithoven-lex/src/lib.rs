//! Incremental syntax-highlighting lexer for the bithoven contract language.
//!
//! [`scanner`] splits text into raw tokens, [`tokenize`] resolves keywords
//! through a [`KeywordTable`], and [`spans`] turns the token stream into
//! decoration spans for a host editor. [`relex`] and [`document`] keep a
//! document's tokens current across edits without rescanning the whole text.

pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod keywords;
pub mod relex;
pub mod scanner;
pub mod spans;
pub mod token;
pub mod tokenize;

pub use config::{LexConfig, TagSet};
pub use document::{Document, FinishedPass, HighlightPass};
pub use error::{ConfigError, EditError};
pub use host::{to_edit_deltas, HostChange};
pub use keywords::KeywordTable;
pub use relex::{relex, EditDelta, RelexStats, TokenCache};
pub use scanner::{scan_token, ScanState, Scanner};
pub use spans::{build_spans, update_spans, DecorationSpan};
pub use token::{Token, TokenKind};
pub use tokenize::{classify, tokenize, Lexer};
