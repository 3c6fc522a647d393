use crate::error::ConfigError;
use crate::keywords::KeywordTable;
use crate::token::TokenKind;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Category tag per token kind. Defaults to [`TokenKind::tag`]; a host may
/// rename tags, but every kind keeps a tag of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (TokenKind, String)>,
    ) -> Result<Self, ConfigError> {
        let mut set = Self::default();
        for (kind, tag) in overrides {
            if tag.trim().is_empty() {
                return Err(ConfigError::EmptyTag(kind));
            }
            set.tags[kind.index()] = tag;
        }
        for (i, tag) in set.tags.iter().enumerate() {
            if set.tags[..i].contains(tag) {
                return Err(ConfigError::DuplicateTag(tag.clone()));
            }
        }
        Ok(set)
    }

    pub fn tag(&self, kind: TokenKind) -> &str {
        &self.tags[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, &str)> {
        TokenKind::ALL.iter().map(move |kind| (*kind, self.tag(*kind)))
    }
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            tags: TokenKind::ALL.iter().map(|k| k.tag().to_string()).collect(),
        }
    }
}

/// Immutable lexer configuration shared by the classifier and span builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexConfig {
    pub keywords: KeywordTable,
    pub tags: TagSet,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    keywords: Option<KeywordTable>,
    #[serde(default)]
    tags: BTreeMap<TokenKind, String>,
}

impl LexConfig {
    pub fn new(keywords: KeywordTable, tags: TagSet) -> Self {
        Self { keywords, tags }
    }

    /// Parses `{ "keywords": { <kind>: [words] }, "tags": { <kind>: tag } }`.
    /// Both sections are optional; a missing section keeps the bithoven defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self {
            keywords: raw.keywords.unwrap_or_default(),
            tags: TagSet::with_overrides(raw.tags)?,
        })
    }
}
