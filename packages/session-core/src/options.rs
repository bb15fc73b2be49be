//! Answer options for the select-correct-answer mode
//!
//! Algorithm:
//! 1. collect the distinct translations of the batch
//! 2. drop the current word's translation
//! 3. shuffle, keep at most [`MAX_WRONG_OPTIONS`]
//! 4. append the correct translation and shuffle again

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Word, WordId, MAX_WRONG_OPTIONS};

pub fn generate_options<R: Rng + ?Sized>(word: &Word, batch: &[Word], rng: &mut R) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options: Vec<String> = batch
        .iter()
        .map(|w| w.translation.as_str())
        .filter(|t| *t != word.translation && seen.insert(*t))
        .map(str::to_owned)
        .collect();

    options.shuffle(rng);
    options.truncate(MAX_WRONG_OPTIONS);
    options.push(word.translation.clone());
    options.shuffle(rng);
    options
}

/// Option sets for one mode pass, generated at most once per word
#[derive(Clone, Debug, Default)]
pub struct OptionCache {
    by_word: HashMap<WordId, Vec<String>>,
}

impl OptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word_id: WordId) -> Option<&[String]> {
        self.by_word.get(&word_id).map(Vec::as_slice)
    }

    pub fn get_or_generate<R: Rng + ?Sized>(
        &mut self,
        word: &Word,
        batch: &[Word],
        rng: &mut R,
    ) -> &[String] {
        self.by_word
            .entry(word.id)
            .or_insert_with(|| generate_options(word, batch, rng))
    }

    pub fn len(&self) -> usize {
        self.by_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_word.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn batch() -> Vec<Word> {
        vec![
            Word::new(1, "gato", "cat"),
            Word::new(2, "perro", "dog"),
            Word::new(3, "casa", "house"),
            Word::new(4, "árbol", "tree"),
            Word::new(5, "sol", "sun"),
            Word::new(6, "can", "dog"),
        ]
    }

    #[test]
    fn test_options_contain_correct_answer_once() {
        let words = batch();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for word in &words {
            let options = generate_options(word, &words, &mut rng);
            assert!(options.len() <= MAX_WRONG_OPTIONS + 1);
            let hits = options.iter().filter(|o| **o == word.translation).count();
            assert_eq!(hits, 1, "options {:?} for {}", options, word.word);
        }
    }

    #[test]
    fn test_duplicate_translations_are_not_repeated() {
        let words = batch();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let options = generate_options(&words[0], &words, &mut rng);
            let unique: HashSet<_> = options.iter().collect();
            assert_eq!(unique.len(), options.len());
        }
    }

    #[test]
    fn test_small_batch_yields_fewer_options() {
        let words = vec![Word::new(1, "uno", "one"), Word::new(2, "dos", "two")];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let options = generate_options(&words[0], &words, &mut rng);
        assert_eq!(options.len(), 2);

        let single = vec![Word::new(1, "uno", "one")];
        assert_eq!(generate_options(&single[0], &single, &mut rng), vec!["one"]);
    }

    #[test]
    fn test_same_translation_as_other_word_counts_as_correct_only_once() {
        // "perro" and "can" share "dog"; the other "dog" must not appear as a distractor
        let words = batch();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let options = generate_options(&words[1], &words, &mut rng);
        assert_eq!(options.iter().filter(|o| o.as_str() == "dog").count(), 1);
    }

    #[test]
    fn test_cache_does_not_regenerate() {
        let words = batch();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut cache = OptionCache::new();

        let first = cache.get_or_generate(&words[2], &words, &mut rng).to_vec();
        let second = cache.get_or_generate(&words[2], &words, &mut rng).to_vec();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(3), Some(first.as_slice()));
    }
}
