// File: src/prep.rs
//! Turning segmenter output into the token stream the analyzer consumes.
//!
//! The segmenter itself lives outside this crate. Its output arrives as
//! pre-tagged text (`我_r 爱_v 北京_ns`, or the `word/pos` form written by
//! [`render_segmented`]); tags are then corrected from a [`PosOverrides`]
//! table and the stream is cleaned with [`clean_tokens`].

use crate::core::types::Token;
use crate::errors::{LevelError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BOM: char = '\u{feff}';

/// Splits pre-tagged text into tokens.
///
/// Each whitespace-separated item is cut at its last `_` or `/`, so words
/// that themselves contain a separator keep it. Items with no separator get
/// an empty tag.
pub fn parse_segmented(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|item| match item.rfind(&['_', '/'][..]) {
            Some(idx) => Token::new(&item[..idx], &item[idx + 1..]),
            None => Token::new(item, ""),
        })
        .collect()
}

/// Renders tokens as `word/pos` items separated by single spaces, skipping
/// tokens whose word or tag is blank.
pub fn render_segmented(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.word.trim().is_empty() && !t.pos_tag.trim().is_empty())
        .map(|t| format!("{}/{}", t.word, t.pos_tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips byte-order marks and surrounding whitespace from words, then drops
/// empty words and tokens tagged exactly `punctuation_tag`.
pub fn clean_tokens(tokens: Vec<Token>, punctuation_tag: &str) -> Vec<Token> {
    tokens
        .into_iter()
        .filter_map(|token| {
            let word = token.word.replace(BOM, "");
            let word = word.trim();
            if word.is_empty() || token.pos_tag == punctuation_tag {
                None
            } else {
                Some(Token::new(word, token.pos_tag))
            }
        })
        .collect()
}

/// Word → corrected tag, for words the tagger is known to get wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosOverrides {
    table: HashMap<String, String>,
}

impl PosOverrides {
    /// Parses `word POS` lines. Blank lines are skipped; any other line must
    /// have exactly two fields. A later line for the same word wins.
    pub fn parse(source: &str) -> Result<Self> {
        let mut table = HashMap::new();
        for (lineno, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [word, pos] => {
                    table.insert(word.to_string(), pos.to_string());
                }
                _ => {
                    return Err(LevelError::config(format!(
                        "POS override line {}: expected `word POS`, got '{line}'",
                        lineno + 1
                    )))
                }
            }
        }
        Ok(Self { table })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let overrides = Self::parse(&fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), entries = overrides.len(), "loaded POS overrides");
        Ok(overrides)
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.table.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Replaces the tag of every listed word.
    pub fn apply(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut() {
            if let Some(pos) = self.table.get(&token.word) {
                token.pos_tag.clone_from(pos);
            }
        }
    }
}

/// The full preparation chain for one document: parse, correct, clean.
pub fn prepare(text: &str, overrides: &PosOverrides, punctuation_tag: &str) -> Vec<Token> {
    let mut tokens = parse_segmented(text);
    overrides.apply(&mut tokens);
    clean_tokens(tokens, punctuation_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_underscore_and_slash_forms() {
        let tokens = parse_segmented("我_r 爱/v  北京_ns\n。_w");
        assert_eq!(
            tokens,
            vec![
                Token::new("我", "r"),
                Token::new("爱", "v"),
                Token::new("北京", "ns"),
                Token::new("。", "w"),
            ]
        );
    }

    #[test]
    fn last_separator_splits_word_from_tag() {
        let tokens = parse_segmented("/_w a_b/n 孤零零");
        assert_eq!(
            tokens,
            vec![
                Token::new("/", "w"),
                Token::new("a_b", "n"),
                Token::new("孤零零", ""),
            ]
        );
    }

    #[test]
    fn clean_drops_punctuation_and_blank_words() {
        let tokens = vec![
            Token::new("\u{feff}我", "r"),
            Token::new("。", "w"),
            Token::new(" ", "x"),
            Token::new("\u{feff}", "n"),
            Token::new("好", "a"),
            Token::new("，", "wp"),
        ];
        assert_eq!(
            clean_tokens(tokens, "w"),
            vec![Token::new("我", "r"), Token::new("好", "a"), Token::new("，", "wp")]
        );
    }

    #[test]
    fn overrides_replace_tags_of_listed_words() {
        let overrides = PosOverrides::parse("跑 v\n\n  好  a \n跑 vn\n").unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("跑"), Some("vn"));

        let mut tokens = vec![Token::new("跑", "a"), Token::new("好", "d"), Token::new("人", "n")];
        overrides.apply(&mut tokens);
        assert_eq!(
            tokens,
            vec![Token::new("跑", "vn"), Token::new("好", "a"), Token::new("人", "n")]
        );
    }

    #[test]
    fn malformed_override_line_is_rejected() {
        let err = PosOverrides::parse("跑 v\n好\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn render_skips_untagged_tokens() {
        let tokens = vec![Token::new("我", "r"), Token::new("孤", ""), Token::new("爱", "v")];
        assert_eq!(render_segmented(&tokens), "我/r 爱/v");
        assert_eq!(parse_segmented(&render_segmented(&tokens)).len(), 2);
    }

    #[test]
    fn prepare_corrects_before_cleaning() {
        let overrides = PosOverrides::parse("嗯 w").unwrap();
        let tokens = prepare("嗯_e 我_r 。_w", &overrides, "w");
        assert_eq!(tokens, vec![Token::new("我", "r")]);
    }
}
