// File: src/core/pos.rs
//! Canonical part-of-speech categories and the mapping from tagger codes.
//!
//! Tagger codes are compressed to their first character before lookup, so
//! compound codes such as `np` (place name) or `vm` (modal verb) fall into
//! their parent category. Anything unrecognized becomes
//! [`CanonicalPos::Undefined`], which never satisfies a POS-constrained rule.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalPos {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Quantifier,
    Numeral,
    Preposition,
    Auxiliary,
    Conjunction,
    Locative,
    Temporal,
    Spatial,
    Interjection,
    Particle,
    Onomatopoeia,
    Morpheme,
    Undefined,
}

impl CanonicalPos {
    /// Every defined category, `Undefined` excluded.
    pub const ALL: [CanonicalPos; 17] = [
        Self::Noun,
        Self::Verb,
        Self::Adjective,
        Self::Adverb,
        Self::Pronoun,
        Self::Quantifier,
        Self::Numeral,
        Self::Preposition,
        Self::Auxiliary,
        Self::Conjunction,
        Self::Locative,
        Self::Temporal,
        Self::Spatial,
        Self::Interjection,
        Self::Particle,
        Self::Onomatopoeia,
        Self::Morpheme,
    ];

    /// Maps a raw tagger code to its category. Only the first character counts.
    pub fn canonicalize(raw_tag: &str) -> Self {
        match raw_tag.chars().next() {
            Some(c) => Self::from_tag_initial(c),
            None => Self::Undefined,
        }
    }

    fn from_tag_initial(c: char) -> Self {
        match c {
            'n' => Self::Noun,
            'v' => Self::Verb,
            'a' => Self::Adjective,
            'd' => Self::Adverb,
            'r' => Self::Pronoun,
            'q' => Self::Quantifier,
            'm' => Self::Numeral,
            'p' => Self::Preposition,
            'u' => Self::Auxiliary,
            'c' => Self::Conjunction,
            'f' => Self::Locative,
            't' => Self::Temporal,
            's' => Self::Spatial,
            'e' => Self::Interjection,
            'y' => Self::Particle,
            'o' => Self::Onomatopoeia,
            'g' => Self::Morpheme,
            _ => Self::Undefined,
        }
    }

    /// The label word lists use for this category (`名`, `动`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::Noun => "名",
            Self::Verb => "动",
            Self::Adjective => "形",
            Self::Adverb => "副",
            Self::Pronoun => "代",
            Self::Quantifier => "量",
            Self::Numeral => "数",
            Self::Preposition => "介",
            Self::Auxiliary => "助",
            Self::Conjunction => "连",
            Self::Locative => "方",
            Self::Temporal => "时",
            Self::Spatial => "处",
            Self::Interjection => "叹",
            Self::Particle => "语",
            Self::Onomatopoeia => "拟",
            Self::Morpheme => "语素",
            Self::Undefined => "undefined",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Pronoun => "pronoun",
            Self::Quantifier => "quantifier",
            Self::Numeral => "numeral",
            Self::Preposition => "preposition",
            Self::Auxiliary => "auxiliary",
            Self::Conjunction => "conjunction",
            Self::Locative => "locative",
            Self::Temporal => "temporal",
            Self::Spatial => "spatial",
            Self::Interjection => "interjection",
            Self::Particle => "particle",
            Self::Onomatopoeia => "onomatopoeia",
            Self::Morpheme => "morpheme",
            Self::Undefined => "undefined",
        }
    }

    /// Parses a word-list label, either the Chinese category name or the
    /// English one. `undefined` is not a valid label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|pos| pos.label() == label || pos.name() == label)
    }
}

impl fmt::Display for CanonicalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
