// File: src/core/matcher.rs
use crate::core::dictionary::LevelDictionary;
use crate::core::pos::CanonicalPos;
use crate::core::types::{Rule, SelectedLevels};

/// Resolves the rule that applies to one occurrence of `word`.
///
/// Rules are tried in stored order. A rule is skipped when its level is not
/// selected or when it carries a POS set that does not admit `pos`; the first
/// rule that survives both checks wins and later rules are never consulted.
/// Returns `None` for words absent from the dictionary or when no rule fires.
pub fn match_rule<'d>(
    word: &str,
    pos: CanonicalPos,
    dictionary: &'d LevelDictionary,
    selected: &SelectedLevels,
) -> Option<&'d Rule> {
    let entry = dictionary.get(word)?;
    entry
        .rules()
        .iter()
        .filter(|rule| selected.contains(&rule.level))
        .find(|rule| rule.admits(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::WordListFamily;
    use std::collections::BTreeSet;

    fn dict(entries: Vec<(&str, Vec<Rule>)>) -> LevelDictionary {
        LevelDictionary::from_entries(WordListFamily::NewHsk, entries).unwrap()
    }

    fn levels(levels: &[&str]) -> SelectedLevels {
        levels.iter().copied().collect()
    }

    #[test]
    fn first_applicable_rule_wins() {
        let d = dict(vec![(
            "打",
            vec![
                Rule::with_pos("A", [CanonicalPos::Verb]),
                Rule::any_pos("B"),
            ],
        )]);
        let selected = levels(&["A", "B"]);

        let rule = match_rule("打", CanonicalPos::Adjective, &d, &selected).unwrap();
        assert_eq!(rule.level, "B");

        let rule = match_rule("打", CanonicalPos::Verb, &d, &selected).unwrap();
        assert_eq!(rule.level, "A");
    }

    #[test]
    fn later_rules_are_not_consulted_after_a_match() {
        let d = dict(vec![(
            "会",
            vec![Rule::any_pos("NEW_HSK1"), Rule::with_pos("NEW_HSK3", [CanonicalPos::Verb])],
        )]);
        let rule = match_rule("会", CanonicalPos::Verb, &d, &levels(&["NEW_HSK1", "NEW_HSK3"]));
        assert_eq!(rule.unwrap().level, "NEW_HSK1");
    }

    #[test]
    fn pos_mismatch_is_unmatched_even_when_level_selected() {
        let d = dict(vec![("跑", vec![Rule::with_pos("NEW_HSK2", [CanonicalPos::Verb])])]);
        let pos = CanonicalPos::canonicalize("a");
        assert!(match_rule("跑", pos, &d, &levels(&["NEW_HSK2"])).is_none());
    }

    #[test]
    fn unselected_level_is_skipped() {
        let d = dict(vec![(
            "看",
            vec![Rule::any_pos("NEW_HSK1"), Rule::any_pos("NEW_HSK2")],
        )]);
        let rule = match_rule("看", CanonicalPos::Verb, &d, &levels(&["NEW_HSK2"]));
        assert_eq!(rule.unwrap().level, "NEW_HSK2");
        assert!(match_rule("看", CanonicalPos::Verb, &d, &SelectedLevels::none()).is_none());
    }

    #[test]
    fn undefined_pos_only_matches_unconstrained_rules() {
        let d = dict(vec![
            ("的", vec![Rule { level: "L".into(), pos_set: Some(BTreeSet::new()) }]),
            ("了", vec![Rule::with_pos("L", CanonicalPos::ALL)]),
            ("啊", vec![Rule::any_pos("L")]),
        ]);
        let selected = levels(&["L"]);
        assert!(match_rule("的", CanonicalPos::Undefined, &d, &selected).is_none());
        assert!(match_rule("了", CanonicalPos::Undefined, &d, &selected).is_none());
        assert!(match_rule("啊", CanonicalPos::Undefined, &d, &selected).is_some());
    }

    #[test]
    fn empty_pos_set_never_matches() {
        let d = dict(vec![("的", vec![Rule { level: "L".into(), pos_set: Some(BTreeSet::new()) }])]);
        for pos in CanonicalPos::ALL {
            assert!(match_rule("的", pos, &d, &levels(&["L"])).is_none());
        }
    }

    #[test]
    fn unknown_word_is_unmatched() {
        let d = dict(vec![("你好", vec![Rule::any_pos("YCT1")])]);
        assert!(match_rule("吃饭", CanonicalPos::Verb, &d, &levels(&["YCT1"])).is_none());
    }
}
