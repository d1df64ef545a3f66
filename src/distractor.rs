//! Wrong-answer synthesis and choice assembly.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::sampler::{pick_distinct_indices, shuffle};
use crate::vocab::{QuizField, VocabularyEntry};

/// Pick up to `count` wrong answers for `correct_value` from `pool`.
///
/// Candidates are the resolved `field` values that differ from
/// `correct_value`, restricted to entries with an ideographic form when
/// `require_ideographic` is set. Values are compared as strings only, so two
/// entries sharing a meaning never serve as each other's distractor, and a
/// value shared by several entries is offered once. When fewer than `count`
/// candidates exist all of them are returned.
pub fn build_distractors<R: Rng + ?Sized>(
    pool: &[VocabularyEntry],
    correct_value: &str,
    field: QuizField,
    count: usize,
    require_ideographic: bool,
    rng: &mut R,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates: Vec<&str> = Vec::new();
    for entry in pool {
        if require_ideographic && !entry.has_ideographic() {
            continue;
        }
        let value = entry.field_value(field);
        if value != correct_value && seen.insert(value) {
            candidates.push(value);
        }
    }

    if candidates.len() < count {
        debug!(
            "only {} distractors available for {correct_value:?} (wanted {count})",
            candidates.len()
        );
        shuffle(&mut candidates, rng);
        return candidates.into_iter().map(str::to_owned).collect();
    }

    pick_distinct_indices(candidates.len(), count, rng)
        .into_iter()
        .map(|i| candidates[i].to_owned())
        .collect()
}

/// The correct value plus every distractor, each exactly once, in random order.
pub fn build_choices<R: Rng + ?Sized>(
    correct_value: &str,
    distractors: Vec<String>,
    rng: &mut R,
) -> Vec<String> {
    let mut choices = distractors;
    choices.retain(|d| d != correct_value);
    choices.push(correct_value.to_owned());
    shuffle(&mut choices, rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn word(meaning: &str, kanji: &str) -> VocabularyEntry {
        VocabularyEntry {
            chapter: "Ch-1".into(),
            script_primary: format!("{meaning}-kana"),
            romanization: format!("{meaning}-romaji"),
            meaning: meaning.into(),
            ideographic: kanji.into(),
            ..VocabularyEntry::default()
        }
    }

    fn pool() -> Vec<VocabularyEntry> {
        vec![
            word("cat", "猫"),
            word("dog", "犬"),
            word("water", "水"),
            word("fire", "火"),
            word("thanks", ""),
            word("hello", ""),
        ]
    }

    #[test]
    fn draws_requested_count_without_correct_value() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..30 {
            let d = build_distractors(&pool(), "cat", QuizField::Meaning, 3, false, &mut rng);
            assert_eq!(d.len(), 3);
            assert!(!d.iter().any(|v| v == "cat"));
            let unique: HashSet<_> = d.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn ideographic_requirement_shrinks_pool() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut d = build_distractors(&pool(), "猫", QuizField::Ideographic, 3, true, &mut rng);
        d.sort();
        assert_eq!(d, vec!["水", "火", "犬"]);
    }

    #[test]
    fn degraded_set_when_pool_is_small() {
        let mut rng = StdRng::seed_from_u64(9);
        let small = vec![word("cat", ""), word("dog", "")];
        let d = build_distractors(&small, "cat", QuizField::Meaning, 3, false, &mut rng);
        assert_eq!(d, vec!["dog"]);
    }

    #[test]
    fn identical_values_are_not_distractors_for_each_other() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut twins = vec![word("cat", ""), word("cat", ""), word("dog", "")];
        twins[1].script_primary = "にゃんこ".into();
        let d = build_distractors(&twins, "cat", QuizField::Meaning, 3, false, &mut rng);
        assert_eq!(d, vec!["dog"]);
    }

    #[test]
    fn shared_values_offered_once() {
        let mut rng = StdRng::seed_from_u64(6);
        let list = vec![word("cat", ""), word("dog", ""), word("dog", ""), word("fish", "")];
        let mut d = build_distractors(&list, "cat", QuizField::Meaning, 3, false, &mut rng);
        d.sort();
        assert_eq!(d, vec!["dog", "fish"]);
    }

    #[test]
    fn choices_contain_correct_value_exactly_once() {
        let mut rng = StdRng::seed_from_u64(8);
        let choices = build_choices(
            "cat",
            vec!["dog".into(), "water".into(), "fire".into()],
            &mut rng,
        );
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.iter().filter(|c| *c == "cat").count(), 1);
    }
}
