use crate::error::ConfigError;
use crate::scanner::Scanner;
use crate::token::TokenKind;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const KW_PRAGMA: &str = "pragma";
pub const KW_VERSION: &str = "version";
pub const KW_TARGET: &str = "target";
pub const KW_BITHOVEN: &str = "bithoven";
pub const KW_SEGWIT: &str = "segwit";
pub const KW_TAPROOT: &str = "taproot";
pub const KW_IF: &str = "if";
pub const KW_ELSE: &str = "else";
pub const KW_RETURN: &str = "return";
pub const KW_VERIFY: &str = "verify";
pub const KW_OLDER: &str = "older";
pub const KW_AFTER: &str = "after";
pub const KW_CHECKSIG: &str = "checksig";
pub const KW_SHA256: &str = "sha256";
pub const KW_BOOL: &str = "bool";
pub const KW_STRING: &str = "string";
pub const KW_SIGNATURE: &str = "signature";
pub const KW_TRUE: &str = "true";
pub const KW_FALSE: &str = "false";

pub const PRAGMA_KEYWORDS: &[&str] = &[KW_PRAGMA, KW_VERSION, KW_TARGET];
pub const PRAGMA_VALUES: &[&str] = &[KW_BITHOVEN, KW_SEGWIT, KW_TAPROOT];
pub const CONTROL_KEYWORDS: &[&str] = &[KW_IF, KW_ELSE, KW_RETURN, KW_VERIFY];
pub const TIMELOCK_KEYWORDS: &[&str] = &[KW_OLDER, KW_AFTER];
pub const OPCODE_KEYWORDS: &[&str] = &[KW_CHECKSIG, KW_SHA256];
pub const TYPE_KEYWORDS: &[&str] = &[KW_BOOL, KW_STRING, KW_SIGNATURE];
pub const BOOL_LITERALS: &[&str] = &[KW_TRUE, KW_FALSE];

pub const BITHOVEN_KEYWORDS: &[(TokenKind, &[&str])] = &[
    (TokenKind::PragmaKeyword, PRAGMA_KEYWORDS),
    (TokenKind::PragmaValue, PRAGMA_VALUES),
    (TokenKind::ControlKeyword, CONTROL_KEYWORDS),
    (TokenKind::TimelockKeyword, TIMELOCK_KEYWORDS),
    (TokenKind::OpcodeKeyword, OPCODE_KEYWORDS),
    (TokenKind::TypeKeyword, TYPE_KEYWORDS),
    (TokenKind::BoolLiteral, BOOL_LITERALS),
];

/// Whole-word, case-sensitive keyword lookup.
///
/// Pragma words live in the same flat table as everything else, so `segwit`
/// highlights as a pragma value wherever it appears.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<TokenKind, Vec<String>>")]
pub struct KeywordTable {
    words: HashMap<String, TokenKind>,
}

impl KeywordTable {
    pub fn bithoven() -> Self {
        let words = BITHOVEN_KEYWORDS
            .iter()
            .flat_map(|(kind, words)| words.iter().map(move |w| (w.to_string(), *kind)))
            .collect();
        Self { words }
    }

    pub fn from_groups<W: AsRef<str>>(
        groups: impl IntoIterator<Item = (TokenKind, Vec<W>)>,
    ) -> Result<Self, ConfigError> {
        let mut words = HashMap::new();
        for (kind, group) in groups {
            if !kind.is_keyword() {
                return Err(ConfigError::NotAKeywordKind(kind));
            }
            for word in group {
                let word = word.as_ref();
                if !is_single_word(word) {
                    return Err(ConfigError::InvalidWord(word.to_string()));
                }
                if words.insert(word.to_string(), kind).is_some() {
                    return Err(ConfigError::DuplicateWord(word.to_string()));
                }
            }
        }
        Ok(Self { words })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.words.get(word).copied()
    }

    pub fn classify(&self, word: &str) -> TokenKind {
        self.lookup(word).unwrap_or(TokenKind::Identifier)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words grouped by kind, each group sorted.
    pub fn groups(&self) -> BTreeMap<TokenKind, Vec<&str>> {
        let mut groups: BTreeMap<TokenKind, Vec<&str>> = BTreeMap::new();
        for (word, kind) in &self.words {
            groups.entry(*kind).or_default().push(word);
        }
        for words in groups.values_mut() {
            words.sort_unstable();
        }
        groups
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::bithoven()
    }
}

impl TryFrom<BTreeMap<TokenKind, Vec<String>>> for KeywordTable {
    type Error = ConfigError;

    fn try_from(groups: BTreeMap<TokenKind, Vec<String>>) -> Result<Self, Self::Error> {
        Self::from_groups(groups)
    }
}

fn is_single_word(word: &str) -> bool {
    let mut scanner = Scanner::new(word);
    matches!(
        scanner.next_token(),
        Some(token) if token.kind == TokenKind::Identifier && token.len() == word.len()
    )
}
