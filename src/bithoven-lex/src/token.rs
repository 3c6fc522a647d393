use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Semantic category of a token. Each variant has a fixed category tag that
/// the host editor binds to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    PragmaKeyword,
    PragmaValue,
    ControlKeyword,
    TimelockKeyword,
    OpcodeKeyword,
    TypeKeyword,
    BoolLiteral,
    Identifier,
    StringLiteral,
    NumberLiteral,
    Operator,
    LineComment,
    BlockComment,
    Whitespace,
    Unknown,
}

impl TokenKind {
    pub const ALL: [TokenKind; 15] = [
        TokenKind::PragmaKeyword,
        TokenKind::PragmaValue,
        TokenKind::ControlKeyword,
        TokenKind::TimelockKeyword,
        TokenKind::OpcodeKeyword,
        TokenKind::TypeKeyword,
        TokenKind::BoolLiteral,
        TokenKind::Identifier,
        TokenKind::StringLiteral,
        TokenKind::NumberLiteral,
        TokenKind::Operator,
        TokenKind::LineComment,
        TokenKind::BlockComment,
        TokenKind::Whitespace,
        TokenKind::Unknown,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::PragmaKeyword => "pragma-keyword",
            TokenKind::PragmaValue => "pragma-value",
            TokenKind::ControlKeyword => "control-keyword",
            TokenKind::TimelockKeyword => "timelock-keyword",
            TokenKind::OpcodeKeyword => "opcode-keyword",
            TokenKind::TypeKeyword => "type-keyword",
            TokenKind::BoolLiteral => "bool-literal",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string-literal",
            TokenKind::NumberLiteral => "number-literal",
            TokenKind::Operator => "operator",
            TokenKind::LineComment => "line-comment",
            TokenKind::BlockComment => "block-comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Unknown => "unknown",
        }
    }

    pub fn from_tag(tag: &str) -> Option<TokenKind> {
        TokenKind::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Kinds that a keyword table is allowed to assign to a word.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::PragmaKeyword
                | TokenKind::PragmaValue
                | TokenKind::ControlKeyword
                | TokenKind::TimelockKeyword
                | TokenKind::OpcodeKeyword
                | TokenKind::TypeKeyword
                | TokenKind::BoolLiteral
        )
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, start: usize) -> Self {
        let lexeme = lexeme.into();
        let end = start + lexeme.len();
        Self {
            kind,
            lexeme,
            span: start..end,
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Relocate the token to begin at `start`. The lexeme is untouched.
    pub fn move_to(&mut self, start: usize) {
        self.span = start..start + self.lexeme.len();
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.kind, self.lexeme)
    }
}
