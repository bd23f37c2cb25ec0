use crate::core::accountant::accumulate;
use crate::core::dictionary::LevelDictionary;
use crate::core::types::{AnalysisResult, SelectedLevels, Token};
use crate::core::universe::LevelUniverse;
use crate::errors::Result;
use rayon::prelude::*;

/// A named, already-tokenized document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub tokens: Vec<Token>,
}

impl Document {
    pub fn new(name: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub name: String,
    pub result: AnalysisResult,
}

// The analyzer binds one shared dictionary to one level selection.
// It holds no per-document state, so a single instance serves a whole batch.
pub struct LevelAnalyzer<'d> {
    dictionary: &'d LevelDictionary,
    selected: SelectedLevels,
}

impl<'d> LevelAnalyzer<'d> {
    pub fn new(dictionary: &'d LevelDictionary, selected: SelectedLevels) -> Self {
        Self {
            dictionary,
            selected,
        }
    }

    /// Selects every level the dictionary mentions, in universe order.
    pub fn with_all_levels(dictionary: &'d LevelDictionary, universe: &LevelUniverse) -> Self {
        let selected = dictionary.levels(universe).into_iter().collect();
        Self::new(dictionary, selected)
    }

    pub fn dictionary(&self) -> &LevelDictionary {
        self.dictionary
    }

    pub fn selected(&self) -> &SelectedLevels {
        &self.selected
    }

    pub fn analyze(&self, name: &str, tokens: &[Token]) -> Result<AnalysisResult> {
        accumulate(name, tokens, self.dictionary, &self.selected)
    }

    /// Analyzes every document in parallel, one worker per document.
    ///
    /// Reports come back in input order. The first accounting inconsistency
    /// stops the batch and no partial reports are returned.
    #[tracing::instrument(skip_all, fields(family = %self.dictionary.family(), documents = documents.len()))]
    pub fn analyze_batch(&self, documents: &[Document]) -> Result<Vec<DocumentReport>> {
        let reports = documents
            .par_iter()
            .map(|doc| {
                self.analyze(&doc.name, &doc.tokens).map(|result| DocumentReport {
                    name: doc.name.clone(),
                    result,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            levels = self.selected.len(),
            tokens = reports.iter().map(|r| r.result.total_tokens).sum::<usize>(),
            "batch analyzed"
        );
        Ok(reports)
    }
}
