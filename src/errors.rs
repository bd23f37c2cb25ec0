// File: src/errors.rs
//! Error types shared by every part of the crate.

use std::path::PathBuf;

/// Crate-wide result type, defaulting to [`LevelError`].
pub type Result<T, E = LevelError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// Matched plus leftover tokens did not add up to the document's token count.
    /// This only happens when the accounting code itself is wrong, so the
    /// whole batch is stopped.
    #[error(
        "accounting inconsistency in '{document}': {matched} matched + {leftover} leftover != {total} tokens"
    )]
    AccountingInconsistency {
        document: String,
        matched: usize,
        leftover: usize,
        total: usize,
    },

    #[error("malformed rule #{index} for word '{word}': {reason}")]
    MalformedRule {
        word: String,
        index: usize,
        reason: String,
    },

    #[error("word '{word}' has an empty rule list")]
    EmptyEntry { word: String },

    #[error("word '{word}' uses unknown part-of-speech label '{label}'")]
    UnknownPosLabel { word: String, label: String },

    /// Wraps any failure while reading a word list so the offending path is reported.
    #[error("failed to load dictionary '{path}': {source}")]
    DictionaryLoad {
        path: PathBuf,
        #[source]
        source: Box<LevelError>,
    },

    #[error("snapshot format version {found} is not supported (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[error(transparent)]
    Persist(#[from] tempfile::PersistError),
}

impl LevelError {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn dictionary_load<P: Into<PathBuf>>(path: P, source: LevelError) -> Self {
        Self::DictionaryLoad {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
