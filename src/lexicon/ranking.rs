use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::alphabet::MachineLetter;
use super::alphagram::{num_vowels, point_value, sort_machine_letters};
use super::Lexicon;
use crate::error::Result;
use crate::utils::serialization;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub front_hooks: String,
    pub back_hooks: String,
    pub inner_front_hook: bool,
    pub inner_back_hook: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphagramRecord {
    /// 1-based rank among alphagrams of the same length, most likely first
    pub probability: u32,
    pub alphagram: String,
    pub length: usize,
    pub combinations: u64,
    pub num_anagrams: usize,
    pub point_value: i32,
    pub num_vowels: usize,
    pub words: Vec<WordRecord>,
}

/// Every alphagram of a word list, ranked by how likely it is to be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconTable {
    pub lexicon: String,
    pub alphagrams: Vec<AlphagramRecord>,
}

fn word_record(lexicon: &Lexicon, word: &str) -> Result<WordRecord> {
    Ok(WordRecord {
        word: word.to_string(),
        front_hooks: lexicon.front_hooks(word)?,
        back_hooks: lexicon.back_hooks(word)?,
        inner_front_hook: lexicon.inner_front_hook(word)?,
        inner_back_hook: lexicon.inner_back_hook(word)?,
    })
}

fn alphagram_record(
    lexicon: &Lexicon,
    key: &[MachineLetter],
    words: &[String],
) -> Result<AlphagramRecord> {
    let alphagram = lexicon.tile_mapping().user_visible(key);
    let dist = lexicon.distribution();
    let words = words
        .iter()
        .map(|w| word_record(lexicon, w))
        .collect::<Result<Vec<_>>>()?;
    Ok(AlphagramRecord {
        probability: 0,
        length: key.len(),
        combinations: lexicon.combinations(&alphagram, true)?,
        num_anagrams: words.len(),
        point_value: point_value(&alphagram, dist)?,
        num_vowels: num_vowels(&alphagram, dist)?,
        alphagram,
        words,
    })
}

impl LexiconTable {
    /// Ranks `words` against `lexicon`. Words the lexicon's alphabet cannot
    /// spell are skipped with a warning.
    pub fn build<I, S>(lexicon: &Lexicon, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mapping = lexicon.tile_mapping();
        let mut groups: BTreeMap<Vec<MachineLetter>, Vec<String>> = BTreeMap::new();
        for word in words {
            let word = word.as_ref();
            match mapping.to_machine_letters(word) {
                Ok(mut key) => {
                    let visible = mapping.user_visible(&key);
                    sort_machine_letters(&mut key);
                    groups.entry(key).or_default().push(visible);
                }
                Err(e) => warn!("Skipping {}: {}", word, e),
            }
        }
        for words in groups.values_mut() {
            words.sort();
            words.dedup();
        }

        let groups: Vec<_> = groups.into_iter().collect();
        let mut alphagrams = groups
            .par_iter()
            .map(|(key, words)| alphagram_record(lexicon, key, words))
            .collect::<Result<Vec<_>>>()?;

        // Stable, so equally likely alphagrams stay in alphagram order
        alphagrams.sort_by(|a, b| b.combinations.cmp(&a.combinations));
        let mut ranks: HashMap<usize, u32> = HashMap::new();
        for record in alphagrams.iter_mut() {
            let rank = ranks.entry(record.length).or_insert(0);
            *rank += 1;
            record.probability = *rank;
        }

        info!(
            "Ranked {} alphagrams for {}",
            alphagrams.len(),
            lexicon.name()
        );
        Ok(Self {
            lexicon: lexicon.name().to_string(),
            alphagrams,
        })
    }

    /// Ranks every word of the lexicon
    pub fn for_lexicon(lexicon: &Lexicon) -> Result<Self> {
        Self::build(lexicon, lexicon.words())
    }

    /// Alphagrams of one length, most likely first
    pub fn of_length(&self, length: usize) -> impl Iterator<Item = &AlphagramRecord> {
        self.alphagrams.iter().filter(move |a| a.length == length)
    }

    pub fn find(&self, alphagram: &str) -> Option<&AlphagramRecord> {
        self.alphagrams.iter().find(|a| a.alphagram == alphagram)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, json: bool) -> Result<()> {
        if json {
            serialization::save_json(self, path)
        } else {
            serialization::save_to_disk(self, path)
        }
    }

    pub fn load<P: AsRef<Path>>(path: P, json: bool) -> Result<Self> {
        if json {
            serialization::load_json(path)
        } else {
            serialization::load_from_disk(path)
        }
    }
}
