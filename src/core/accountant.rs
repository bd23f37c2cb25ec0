// File: src/core/accountant.rs
//! Streams a document's tokens through the rule matcher and tallies the outcome.
//!
//! Every token lands in exactly one place: the tally of the level whose rule
//! matched it, or the leftover bucket. Once the pass is done the closure
//! `matched + leftover == total` is re-checked on the finished result; a
//! failure means the bookkeeping itself is broken and is reported as
//! [`LevelError::AccountingInconsistency`] instead of returning wrong numbers.

use crate::core::diversity::diversity;
use crate::core::dictionary::LevelDictionary;
use crate::core::matcher::match_rule;
use crate::core::pos::CanonicalPos;
use crate::core::types::{AnalysisResult, LevelTally, SelectedLevels, Token};
use crate::errors::{LevelError, Result};
use std::collections::{HashMap, HashSet};

/// Runs one forward pass over `tokens` and returns the document's statistics.
///
/// `document` only names the document in diagnostics. Tallies come back in
/// the iteration order of `selected`, including levels that matched nothing.
pub fn accumulate(
    document: &str,
    tokens: &[Token],
    dictionary: &LevelDictionary,
    selected: &SelectedLevels,
) -> Result<AnalysisResult> {
    let mut levels: Vec<LevelTally> = selected.iter().map(LevelTally::empty).collect();
    let slots: HashMap<&str, usize> = selected
        .iter()
        .enumerate()
        .map(|(slot, level)| (level.as_str(), slot))
        .collect();

    let mut leftover_count = 0;
    let mut leftover_sequence = Vec::new();
    let mut types: HashSet<&str> = HashSet::new();

    for token in tokens {
        types.insert(token.word.as_str());

        // 1. Canonicalize, 2. resolve the single applicable rule
        let pos = CanonicalPos::canonicalize(&token.pos_tag);
        let slot = match_rule(&token.word, pos, dictionary, selected)
            .and_then(|rule| slots.get(rule.level.as_str()).copied());

        match slot {
            // 3. Consumed by a level
            Some(slot) => {
                let tally = &mut levels[slot];
                tally.count += 1;
                tally.sequence.push(token.word.clone());
            }
            // 4. Leftover
            None => {
                leftover_count += 1;
                leftover_sequence.push(token.word.clone());
            }
        }
    }

    let total_tokens = tokens.len();
    let distinct_types = types.len();
    let result = AnalysisResult {
        levels,
        leftover_count,
        leftover_sequence,
        total_tokens,
        distinct_types,
        diversity: diversity(total_tokens, distinct_types),
    };

    verify_closure(document, &result)?;
    tracing::debug!(
        document,
        total = total_tokens,
        matched = result.matched_count(),
        leftover = leftover_count,
        "accounted document"
    );
    Ok(result)
}

/// Checks `sum(level counts) + leftover == total` on a finished result.
pub fn verify_closure(document: &str, result: &AnalysisResult) -> Result<()> {
    let matched = result.matched_count();
    if matched + result.leftover_count != result.total_tokens {
        tracing::error!(
            document,
            matched,
            leftover = result.leftover_count,
            total = result.total_tokens,
            "level accounting does not close"
        );
        return Err(LevelError::AccountingInconsistency {
            document: document.to_string(),
            matched,
            leftover: result.leftover_count,
            total: result.total_tokens,
        });
    }
    Ok(())
}
