// src/lib.rs

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod persistence;
pub mod prep;

pub use crate::core::dictionary::{LevelDictionary, WordListFamily};
pub use crate::core::engine::{Document, DocumentReport, LevelAnalyzer};
pub use crate::core::types::{AnalysisResult, LevelTally, Rule, SelectedLevels, Token};
pub use crate::errors::{LevelError, Result};
