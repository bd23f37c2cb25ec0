// File: src/config.rs
//! Startup configuration and the per-family dictionary registry.
//!
//! Every field has a default, so an empty `{}` (or no config file at all)
//! points at the standard word-list locations. Relative paths in a config
//! file are resolved against the directory containing that file.

use crate::core::dictionary::{LevelDictionary, WordListFamily};
use crate::errors::{LevelError, Result};
use crate::persistence::load_snapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_POS_OVERRIDES: &str = "user_dict/pos_fix.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordListPaths {
    pub yct: PathBuf,
    pub new_hsk: PathBuf,
    pub old_hsk: PathBuf,
}

impl WordListPaths {
    pub fn path(&self, family: WordListFamily) -> &Path {
        match family {
            WordListFamily::Yct => &self.yct,
            WordListFamily::NewHsk => &self.new_hsk,
            WordListFamily::OldHsk => &self.old_hsk,
        }
    }
}

impl Default for WordListPaths {
    fn default() -> Self {
        Self {
            yct: WordListFamily::Yct.default_source().into(),
            new_hsk: WordListFamily::NewHsk.default_source().into(),
            old_hsk: WordListFamily::OldHsk.default_source().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub word_lists: WordListPaths,
    /// `word POS` correction table applied before analysis.
    /// When unset, `user_dict/pos_fix.txt` is used if it exists.
    pub pos_overrides: Option<PathBuf>,
    /// Tokens carrying exactly this tag are dropped as punctuation.
    pub punctuation_tag: String,
    /// Joins the words of a sequence in output rows.
    pub sequence_separator: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            word_lists: WordListPaths::default(),
            pos_overrides: None,
            punctuation_tag: "w".to_string(),
            sequence_separator: ", ".to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            LevelError::config(format!("cannot open config '{}': {e}", path.display()))
        })?;
        let mut config: Self = serde_json::from_reader(BufReader::new(file))?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Loads `path` when given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.word_lists.yct);
        resolve(&mut self.word_lists.new_hsk);
        resolve(&mut self.word_lists.old_hsk);
        if let Some(p) = self.pos_overrides.as_mut() {
            resolve(p);
        }
    }

    /// The override table to load, if any.
    pub fn pos_override_path(&self) -> Option<PathBuf> {
        match &self.pos_overrides {
            Some(path) => Some(path.clone()),
            None => {
                let default = PathBuf::from(DEFAULT_POS_OVERRIDES);
                default.is_file().then_some(default)
            }
        }
    }
}

/// Dictionaries loaded once at startup, one per requested family.
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    dictionaries: BTreeMap<WordListFamily, LevelDictionary>,
}

impl DictionaryRegistry {
    /// Loads every family in `families`. Paths ending in `.bin` are read as
    /// snapshots, anything else as a JSON word list. The first failure aborts.
    pub fn load(config: &AnalyzerConfig, families: &[WordListFamily]) -> Result<Self> {
        let mut registry = Self::default();
        for &family in families {
            let path = config.word_lists.path(family);
            let dictionary = if path.extension().is_some_and(|ext| ext == "bin") {
                load_snapshot(path)?
            } else {
                LevelDictionary::from_path(family, path)?
            };
            if dictionary.family() != family {
                return Err(LevelError::dictionary_load(
                    path,
                    LevelError::config(format!(
                        "snapshot holds the {} word list, expected {family}",
                        dictionary.family()
                    )),
                ));
            }
            registry.insert(dictionary);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, dictionary: LevelDictionary) {
        self.dictionaries.insert(dictionary.family(), dictionary);
    }

    pub fn get(&self, family: WordListFamily) -> Option<&LevelDictionary> {
        self.dictionaries.get(&family)
    }

    pub fn families(&self) -> impl Iterator<Item = WordListFamily> + '_ {
        self.dictionaries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::save_snapshot;
    use std::fs;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AnalyzerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(
            config.word_lists.path(WordListFamily::Yct),
            Path::new("HSK_wordlist/word_level_dict/YCT_WORD_MAP.json")
        );
        assert_eq!(config.punctuation_tag, "w");
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"word_lists": {"new_hsk": "lists/new.json"}, "pos_overrides": "fix.txt"}"#,
        )
        .unwrap();

        let config = AnalyzerConfig::from_path(&path).unwrap();
        assert_eq!(config.word_lists.new_hsk, dir.path().join("lists/new.json"));
        assert_eq!(config.pos_override_path(), Some(dir.path().join("fix.txt")));
        assert_eq!(config.sequence_separator, ", ");
    }

    #[test]
    fn registry_loads_json_and_snapshot_sources() {
        let dir = tempfile::tempdir().unwrap();
        let yct = dir.path().join("yct.json");
        fs::write(&yct, r#"{"你好": {"level": "YCT1"}}"#).unwrap();

        let old = LevelDictionary::from_json_str(
            WordListFamily::OldHsk,
            r#"{"学习": {"level": "OLD_HSK1"}}"#,
        )
        .unwrap();
        let old_bin = dir.path().join("old.bin");
        save_snapshot(&old, &old_bin).unwrap();

        let mut config = AnalyzerConfig::default();
        config.word_lists.yct = yct;
        config.word_lists.old_hsk = old_bin;

        let registry =
            DictionaryRegistry::load(&config, &[WordListFamily::Yct, WordListFamily::OldHsk])
                .unwrap();
        assert!(registry.get(WordListFamily::Yct).unwrap().get("你好").is_some());
        assert_eq!(registry.get(WordListFamily::OldHsk), Some(&old));
        assert!(registry.get(WordListFamily::NewHsk).is_none());
        assert_eq!(registry.families().count(), 2);
    }

    #[test]
    fn snapshot_of_another_family_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("yct.bin");
        let dict =
            LevelDictionary::from_json_str(WordListFamily::OldHsk, r#"{"学习": {"level": "OLD_HSK1"}}"#)
                .unwrap();
        save_snapshot(&dict, &bin).unwrap();

        let mut config = AnalyzerConfig::default();
        config.word_lists.yct = bin;
        let err = DictionaryRegistry::load(&config, &[WordListFamily::Yct]).unwrap_err();
        assert!(matches!(err, LevelError::DictionaryLoad { .. }));
    }

    #[test]
    fn missing_word_list_is_fatal() {
        let mut config = AnalyzerConfig::default();
        config.word_lists.new_hsk = PathBuf::from("no/such/list.json");
        let err = DictionaryRegistry::load(&config, &[WordListFamily::NewHsk]).unwrap_err();
        assert!(matches!(err, LevelError::DictionaryLoad { .. }));
    }
}
