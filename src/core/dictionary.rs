// File: src/core/dictionary.rs
//! Level dictionaries: word → ordered grading rules, one instance per word-list family.
//!
//! Sources are JSON objects whose values are either a single rule object or a
//! list of them:
//!
//! ```json
//! {
//!   "你好": {"level": "YCT1"},
//!   "跑":   [{"level": "NEW_HSK2", "pos_map": ["动"]}, {"level": "NEW_HSK4"}]
//! }
//! ```
//!
//! Both shapes are normalized into a [`WordEntry`] at load time, and every rule
//! is validated then: a rule without a level, an empty list, or an unknown POS
//! label rejects the whole dictionary instead of turning into a rule that can
//! never fire.

use crate::core::pos::CanonicalPos;
use crate::core::types::{LevelId, Rule, WordEntry};
use crate::core::universe::LevelUniverse;
use crate::errors::{LevelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// The vocabulary standards a dictionary can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordListFamily {
    Yct,
    NewHsk,
    OldHsk,
}

impl WordListFamily {
    pub fn key(self) -> &'static str {
        match self {
            Self::Yct => "yct",
            Self::NewHsk => "new_hsk",
            Self::OldHsk => "old_hsk",
        }
    }

    /// Human-facing name of the word list.
    pub fn title(self) -> &'static str {
        match self {
            Self::NewHsk => "新HSK等级词汇（1-9级）",
            Self::OldHsk => "旧HSK等级词汇（1-6级）",
            Self::Yct => "YCT少儿汉语（1-4级）",
        }
    }

    pub fn default_source(self) -> &'static str {
        match self {
            Self::Yct => "HSK_wordlist/word_level_dict/YCT_WORD_MAP.json",
            Self::NewHsk => "HSK_wordlist/word_level_dict/NEW_HSK_WORD_MAP.json",
            Self::OldHsk => "HSK_wordlist/word_level_dict/OLD_HSK_WORD_MAP.json",
        }
    }
}

impl fmt::Display for WordListFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WordListFamily {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "yct" => Ok(Self::Yct),
            "new_hsk" | "newhsk" => Ok(Self::NewHsk),
            "old_hsk" | "oldhsk" => Ok(Self::OldHsk),
            other => Err(LevelError::config(format!(
                "unknown word list '{other}' (expected yct, new_hsk or old_hsk)"
            ))),
        }
    }
}

// --- Source shapes, only used while loading ---

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Many(Vec<RawRule>),
    One(RawRule),
}

impl RawEntry {
    fn into_rules(self) -> Vec<RawRule> {
        match self {
            Self::Many(rules) => rules,
            Self::One(rule) => vec![rule],
        }
    }
}

#[derive(Deserialize)]
struct RawRule {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    pos_map: Option<RawPosMap>,
}

/// `pos_map` shows up as a list, as an object keyed by label, or as one bare label.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosMap {
    Labels(Vec<String>),
    Keyed(BTreeMap<String, serde_json::Value>),
    Label(String),
}

impl RawPosMap {
    fn labels(&self) -> Vec<&str> {
        match self {
            Self::Labels(labels) => labels.iter().map(String::as_str).collect(),
            Self::Keyed(map) => map.keys().map(String::as_str).collect(),
            Self::Label(label) => vec![label.as_str()],
        }
    }
}

fn compile_rule(word: &str, index: usize, raw: RawRule) -> Result<Rule> {
    let level = match raw.level {
        Some(level) if !level.trim().is_empty() => level.trim().to_string(),
        Some(_) => {
            return Err(LevelError::MalformedRule {
                word: word.to_string(),
                index,
                reason: "blank `level`".to_string(),
            })
        }
        None => {
            return Err(LevelError::MalformedRule {
                word: word.to_string(),
                index,
                reason: "missing `level`".to_string(),
            })
        }
    };

    let pos_set = match raw.pos_map {
        None => None,
        Some(pos_map) => {
            let mut set = BTreeSet::new();
            for label in pos_map.labels() {
                let pos = CanonicalPos::from_label(label).ok_or_else(|| {
                    LevelError::UnknownPosLabel {
                        word: word.to_string(),
                        label: label.to_string(),
                    }
                })?;
                set.insert(pos);
            }
            Some(set)
        }
    };

    Ok(Rule { level, pos_set })
}

fn compile_entry(word: &str, raw: RawEntry) -> Result<WordEntry> {
    let rules = raw
        .into_rules()
        .into_iter()
        .enumerate()
        .map(|(index, rule)| compile_rule(word, index, rule))
        .collect::<Result<Vec<_>>>()?;
    WordEntry::new(rules).ok_or_else(|| LevelError::EmptyEntry {
        word: word.to_string(),
    })
}

/// An immutable word → rules mapping for one word-list family.
///
/// Built once, then shared by reference across every document analyzed
/// against it. There is no mutating API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDictionary {
    family: WordListFamily,
    entries: HashMap<String, WordEntry>,
}

impl LevelDictionary {
    /// Builds a dictionary from already-normalized entries.
    pub fn from_entries<I, W>(family: WordListFamily, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, Vec<Rule>)>,
        W: Into<String>,
    {
        let mut map = HashMap::new();
        for (word, rules) in entries {
            let word: String = word.into();
            if let Some(index) = rules.iter().position(|r| r.level.trim().is_empty()) {
                return Err(LevelError::MalformedRule {
                    word,
                    index,
                    reason: "blank `level`".to_string(),
                });
            }
            let entry = WordEntry::new(rules).ok_or_else(|| LevelError::EmptyEntry {
                word: word.clone(),
            })?;
            map.insert(word, entry);
        }
        Ok(Self {
            family,
            entries: map,
        })
    }

    pub fn from_json_str(family: WordListFamily, source: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(source)?;
        Self::compile(family, raw)
    }

    pub fn from_reader<R: Read>(family: WordListFamily, reader: R) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_reader(reader)?;
        Self::compile(family, raw)
    }

    /// Loads a JSON word list. Any failure is reported together with `path`.
    #[tracing::instrument(skip_all, fields(family = %family, path = %path.display()))]
    pub fn from_path(family: WordListFamily, path: &Path) -> Result<Self> {
        let load = || -> Result<Self> {
            let file = File::open(path)?;
            Self::from_reader(family, BufReader::new(file))
        };
        let dictionary = load().map_err(|e| LevelError::dictionary_load(path, e))?;
        tracing::info!(words = dictionary.len(), "loaded word list");
        Ok(dictionary)
    }

    fn compile(family: WordListFamily, raw: BTreeMap<String, RawEntry>) -> Result<Self> {
        let mut entries = HashMap::with_capacity(raw.len());
        for (word, raw_entry) in raw {
            let entry = compile_entry(&word, raw_entry)?;
            entries.insert(word, entry);
        }
        Ok(Self { family, entries })
    }

    pub fn family(&self) -> WordListFamily {
        self.family
    }

    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every level named by at least one rule, in universe display order.
    pub fn levels(&self, universe: &LevelUniverse) -> Vec<LevelId> {
        let levels: HashSet<&str> = self
            .entries
            .values()
            .flat_map(|entry| entry.rules().iter().map(|r| r.level.as_str()))
            .collect();
        universe.order(levels)
    }
}
