// File: src/core/universe.rs
use crate::core::types::LevelId;
use std::cmp::Ordering;

#[rustfmt::skip]
const STANDARD_LEVELS: [&str; 17] = [
    "YCT1", "YCT2", "YCT3", "YCT4",
    "NEW_HSK1", "NEW_HSK2", "NEW_HSK3", "NEW_HSK4", "NEW_HSK5", "NEW_HSK6", "NEW_HSK7_9",
    "OLD_HSK1", "OLD_HSK2", "OLD_HSK3", "OLD_HSK4", "OLD_HSK5", "OLD_HSK6",
];

/// The fixed display order of every known level.
/// Never used to validate levels; unknown levels simply sort last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUniverse {
    levels: Vec<LevelId>,
}

impl LevelUniverse {
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LevelId>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// YCT1-4, then NEW_HSK1-7_9, then OLD_HSK1-6.
    pub fn standard() -> Self {
        Self::new(STANDARD_LEVELS)
    }

    pub fn levels(&self) -> &[LevelId] {
        &self.levels
    }

    pub fn position(&self, level: &str) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }

    /// Sorts and deduplicates `levels` by universe position. Unknown levels
    /// follow the known ones in alphabetical order.
    pub fn order<I, S>(&self, levels: I) -> Vec<LevelId>
    where
        I: IntoIterator<Item = S>,
        S: Into<LevelId>,
    {
        let mut ordered: Vec<LevelId> = levels.into_iter().map(Into::into).collect();
        ordered.sort_by(|a, b| self.compare(a, b));
        ordered.dedup();
        ordered
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

impl Default for LevelUniverse {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_standard_position() {
        let universe = LevelUniverse::standard();
        let ordered = universe.order(["OLD_HSK1", "NEW_HSK7_9", "YCT2", "NEW_HSK2"]);
        assert_eq!(ordered, vec!["YCT2", "NEW_HSK2", "NEW_HSK7_9", "OLD_HSK1"]);
    }

    #[test]
    fn unknown_levels_sort_last_alphabetically() {
        let universe = LevelUniverse::standard();
        let ordered = universe.order(["ZZZ", "CUSTOM", "YCT4", "YCT4"]);
        assert_eq!(ordered, vec!["YCT4", "CUSTOM", "ZZZ"]);
    }

    #[test]
    fn standard_universe_has_seventeen_levels() {
        let universe = LevelUniverse::standard();
        assert_eq!(universe.levels().len(), 17);
        assert_eq!(universe.position("NEW_HSK7_9"), Some(10));
        assert_eq!(universe.position("HSK9"), None);
    }
}
