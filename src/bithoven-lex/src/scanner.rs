//! Finite-state scanner producing raw tokens.
//!
//! Words come out as [`TokenKind::Identifier`]; the classifier in
//! [`crate::tokenize`] resolves keywords afterwards. Every other kind is final
//! here. Scanning is total: each call either returns a non-empty token or
//! `None` at end of input, so the token stream always partitions the text.

use crate::token::{Token, TokenKind};

/// Bytes past a token's end that the scanner may inspect before committing to
/// that token. An edit starting at least this far after a token's end cannot
/// change the token.
pub const LOOKAHEAD: usize = 2;

pub const OPERATORS: &[&str] = &["==", "&&", "||"];
pub const PUNCTUATION: &[char] = &['(', ')', '{', '}', '[', ']', ',', ';', ':'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Default,
    InLineComment,
    InBlockComment,
    InStringLiteral,
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::resume(text, 0, ScanState::Default)
    }

    /// Continue scanning `text` at byte offset `pos` in lexical state `state`.
    /// An offset past the end clamps to the end; one inside a multi-byte char
    /// moves back to the start of that char.
    pub fn resume(text: &'a str, pos: usize, state: ScanState) -> Self {
        let mut pos = pos.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        Self { text, pos, state }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let start = self.pos;
        let ch = self.text[start..].chars().next()?;
        let kind = match self.state {
            ScanState::InLineComment => self.line_comment(),
            ScanState::InBlockComment => self.block_comment(),
            ScanState::InStringLiteral => self.string_literal(),
            ScanState::Default => self.dispatch(ch),
        };
        debug_assert!(self.pos > start);
        Some(Token::new(kind, &self.text[start..self.pos], start))
    }

    fn dispatch(&mut self, ch: char) -> TokenKind {
        let rest = &self.text[self.pos..];
        match ch {
            '/' if rest.starts_with("//") => {
                self.pos += 2;
                self.state = ScanState::InLineComment;
                self.line_comment()
            }
            '/' if rest.starts_with("/*") => {
                self.pos += 2;
                self.state = ScanState::InBlockComment;
                self.block_comment()
            }
            '"' => {
                self.pos += 1;
                self.state = ScanState::InStringLiteral;
                self.string_literal()
            }
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.word(),
            c if c.is_whitespace() => self.whitespace(),
            c => self.operator(c),
        }
    }

    fn line_comment(&mut self) -> TokenKind {
        let rest = &self.text[self.pos..];
        self.pos += rest.find(['\n', '\r']).unwrap_or(rest.len());
        self.state = ScanState::Default;
        TokenKind::LineComment
    }

    // First `*/` closes; comments do not nest. Running into end of input still
    // yields a block comment, and the state resets so nothing leaks past it.
    fn block_comment(&mut self) -> TokenKind {
        let rest = &self.text[self.pos..];
        self.pos += rest.find("*/").map(|i| i + 2).unwrap_or(rest.len());
        self.state = ScanState::Default;
        TokenKind::BlockComment
    }

    // No escapes. A line terminator before the closing quote makes the literal
    // `Unknown`, bounded to the end of its line.
    fn string_literal(&mut self) -> TokenKind {
        let rest = &self.text[self.pos..];
        self.state = ScanState::Default;
        match rest.find(['"', '\n', '\r']) {
            Some(i) if rest.as_bytes()[i] == b'"' => {
                self.pos += i + 1;
                TokenKind::StringLiteral
            }
            Some(i) => {
                self.pos += i;
                TokenKind::Unknown
            }
            None => {
                self.pos += rest.len();
                TokenKind::Unknown
            }
        }
    }

    // A digit run followed by `.digit` groups is the pragma version literal.
    fn number(&mut self) -> TokenKind {
        self.eat_digits();
        let mut dotted = false;
        loop {
            let bytes = &self.text.as_bytes()[self.pos..];
            if bytes.len() >= 2 && bytes[0] == b'.' && bytes[1].is_ascii_digit() {
                self.pos += 1;
                self.eat_digits();
                dotted = true;
            } else {
                break;
            }
        }
        if dotted {
            TokenKind::PragmaValue
        } else {
            TokenKind::NumberLiteral
        }
    }

    fn eat_digits(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        self.pos += rest.iter().take_while(|b| b.is_ascii_digit()).count();
    }

    fn word(&mut self) -> TokenKind {
        self.eat_while(|c| c.is_alphanumeric() || c == '_');
        TokenKind::Identifier
    }

    fn whitespace(&mut self) -> TokenKind {
        self.eat_while(char::is_whitespace);
        TokenKind::Whitespace
    }

    fn operator(&mut self, ch: char) -> TokenKind {
        let rest = &self.text[self.pos..];
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            self.pos += op.len();
            TokenKind::Operator
        } else if PUNCTUATION.contains(&ch) {
            self.pos += 1;
            TokenKind::Operator
        } else {
            self.pos += ch.len_utf8();
            TokenKind::Unknown
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        let rest = &self.text[self.pos..];
        self.pos += rest
            .char_indices()
            .find(|(_, c)| !pred(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Scan a single token at `offset` in `state`, returning it with the state in
/// effect at its end.
pub fn scan_token(text: &str, offset: usize, state: ScanState) -> Option<(Token, ScanState)> {
    let mut scanner = Scanner::resume(text, offset, state);
    let token = scanner.next_token()?;
    Some((token, scanner.state()))
}
