use crate::keywords::KeywordTable;
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

/// Resolve a raw word token through the keyword table. Everything else passes
/// through untouched.
pub fn classify(mut token: Token, keywords: &KeywordTable) -> Token {
    if token.kind == TokenKind::Identifier {
        token.kind = keywords.classify(&token.lexeme);
    }
    token
}

/// Scanner plus classifier.
pub struct Lexer<'a, 'k> {
    scanner: Scanner<'a>,
    keywords: &'k KeywordTable,
}

impl<'a, 'k> Lexer<'a, 'k> {
    pub fn new(scanner: Scanner<'a>, keywords: &'k KeywordTable) -> Self {
        Self { scanner, keywords }
    }

    pub fn pos(&self) -> usize {
        self.scanner.pos()
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.scanner
            .next_token()
            .map(|token| classify(token, self.keywords))
    }
}

pub fn tokenize(input: &str, keywords: &KeywordTable) -> Vec<Token> {
    Lexer::new(Scanner::new(input), keywords).collect()
}
