// src/core/types.rs
use crate::core::pos::CanonicalPos;
use crate::core::universe::LevelUniverse;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Identifier of one grading tier, e.g. `"NEW_HSK3"` or `"YCT1"`.
pub type LevelId = String;

/// A single tagged word of a document, as produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    /// Raw tagger code, possibly compound (e.g. `"np"`, `"vm"`).
    pub pos_tag: String,
}

impl Token {
    pub fn new(word: impl Into<String>, pos_tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos_tag: pos_tag.into(),
        }
    }
}

/// One grading rule attached to a word.
///
/// A rule without a `pos_set` applies to every occurrence of the word. A rule
/// with a `pos_set` (even an empty one) only applies when the occurrence's
/// canonical POS is a member of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub level: LevelId,
    pub pos_set: Option<BTreeSet<CanonicalPos>>,
}

impl Rule {
    pub fn any_pos(level: impl Into<LevelId>) -> Self {
        Self {
            level: level.into(),
            pos_set: None,
        }
    }

    pub fn with_pos<I>(level: impl Into<LevelId>, pos: I) -> Self
    where
        I: IntoIterator<Item = CanonicalPos>,
    {
        Self {
            level: level.into(),
            pos_set: Some(pos.into_iter().collect()),
        }
    }

    /// Whether an occurrence tagged `pos` satisfies this rule's POS constraint.
    pub fn admits(&self, pos: CanonicalPos) -> bool {
        match &self.pos_set {
            None => true,
            Some(_) if pos == CanonicalPos::Undefined => false,
            Some(set) => set.contains(&pos),
        }
    }
}

/// The ordered, non-empty rule list of one word. Earlier rules win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    rules: Vec<Rule>,
}

impl WordEntry {
    /// Returns `None` for an empty rule list; an entry always holds at least one rule.
    pub fn new(rules: Vec<Rule>) -> Option<Self> {
        if rules.is_empty() {
            None
        } else {
            Some(Self { rules })
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// The subset of levels a run counts toward. Rules for any other level never match.
///
/// Iteration yields the levels in the order they were given (deduplicated),
/// which is the column order of the results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedLevels {
    order: Vec<LevelId>,
    members: HashSet<LevelId>,
}

impl SelectedLevels {
    pub fn none() -> Self {
        Self::default()
    }

    /// Selects `levels`, ordered for display by `universe`.
    pub fn ordered_by<I, S>(universe: &LevelUniverse, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LevelId>,
    {
        universe.order(levels).into_iter().collect()
    }

    pub fn contains(&self, level: &str) -> bool {
        self.members.contains(level)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelId> {
        self.order.iter()
    }
}

impl<S: Into<LevelId>> FromIterator<S> for SelectedLevels {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut selected = Self::default();
        for level in iter {
            let level = level.into();
            if selected.members.insert(level.clone()) {
                selected.order.push(level);
            }
        }
        selected
    }
}

/// Count and ordered word sequence of a single level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelTally {
    pub level: LevelId,
    pub count: usize,
    pub sequence: Vec<String>,
}

impl LevelTally {
    pub fn empty(level: impl Into<LevelId>) -> Self {
        Self {
            level: level.into(),
            count: 0,
            sequence: Vec::new(),
        }
    }
}

/// Per-document statistics. Owned by the caller once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// One tally per selected level, in display order.
    pub levels: Vec<LevelTally>,
    pub leftover_count: usize,
    pub leftover_sequence: Vec<String>,
    pub total_tokens: usize,
    pub distinct_types: usize,
    pub diversity: f64,
}

impl AnalysisResult {
    pub fn level(&self, level: &str) -> Option<&LevelTally> {
        self.levels.iter().find(|t| t.level == level)
    }

    /// Sum of all per-level counts.
    pub fn matched_count(&self) -> usize {
        self.levels.iter().map(|t| t.count).sum()
    }
}
