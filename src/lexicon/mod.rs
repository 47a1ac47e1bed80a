pub mod alphabet;
pub mod alphagram;
pub mod anagram;
pub mod bag;
pub mod binomial;
pub mod cache;
pub mod challenge;
pub mod combinations;
pub mod distribution;
pub mod graph;
pub mod hooks;
pub mod letter_set;
pub mod rack;
pub mod ranking;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};

use self::alphabet::{MachineLetter, TileMapping};
use self::anagram::Mode;
use self::combinations::Combinator;
use self::distribution::LetterDistribution;
use self::graph::{FstGraph, WordGraph};
use crate::error::{LexiconError, Result};

/// Longest word a lexicon keeps
pub const MAX_WORD_LENGTH: usize = 15;

/// Reads one word per line. Anything after the first whitespace (such as a
/// definition) is ignored.
pub fn read_word_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(word) = line.split_whitespace().next() {
            words.push(word.to_uppercase());
        }
    }
    Ok(words)
}

/// A word list loaded into a word graph, with the letter distribution used
/// to rank its alphagrams.
pub struct Lexicon {
    name: String,
    combinator: Combinator,
    graph: FstGraph,
    /// Every word spelled backwards, for front hooks
    reversed: FstGraph,
    /// Words in machine letters, in the order they were loaded
    words: Vec<Vec<MachineLetter>>,
}

impl Lexicon {
    pub fn from_words<I, S>(name: &str, dist: LetterDistribution, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mapping = dist.tile_mapping();
        let mut translated = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            match mapping.to_machine_letters(word) {
                Ok(mls) if mls.len() <= MAX_WORD_LENGTH => translated.push(mls),
                Ok(_) => warn!("Skipping {} in {}: too long", word, name),
                Err(e) => warn!("Skipping {} in {}: {}", word, name, e),
            }
        }
        translated.sort_unstable();
        translated.dedup();

        let graph = FstGraph::from_words(translated.iter().cloned())?;
        let reversed = FstGraph::reversed_from_words(translated.iter().cloned())?;
        info!(
            "Loaded lexicon {} ({} words, {} distribution)",
            name,
            graph.len(),
            dist.name()
        );
        Ok(Self {
            name: name.to_string(),
            combinator: Combinator::new(dist),
            graph,
            reversed,
            words: translated,
        })
    }

    pub fn from_file<P: AsRef<Path>>(name: &str, path: P, dist: LetterDistribution) -> Result<Self> {
        let words = read_word_file(path)?;
        Self::from_words(name, dist, words)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tile_mapping(&self) -> &TileMapping {
        self.combinator.distribution().tile_mapping()
    }

    pub fn distribution(&self) -> &LetterDistribution {
        self.combinator.distribution()
    }

    pub fn combinator(&self) -> &Combinator {
        &self.combinator
    }

    pub fn graph(&self) -> &FstGraph {
        &self.graph
    }

    pub fn reversed_graph(&self) -> &FstGraph {
        &self.reversed
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every word, in user visible form
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        self.words.iter().map(move |w| self.tile_mapping().user_visible(w))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.tile_mapping()
            .to_machine_letters(word)
            .map_or(false, |mls| self.graph.contains(&mls))
    }

    /// Parses `query` and anagrams it. Queries with more than `max_blanks`
    /// free blanks are refused, since each one multiplies the search by the
    /// size of the alphabet.
    pub fn anagram(&self, query: &str, mode: Mode, max_blanks: usize) -> Result<Vec<String>> {
        let mut rack = rack::parse_rack(query, self.tile_mapping())?;
        let blanks = rack.n_blanks() as usize;
        if blanks > max_blanks {
            return Err(LexiconError::QueryTooComplex {
                blanks,
                max: max_blanks,
            });
        }
        Ok(anagram::search(&mut rack, &self.graph, self.tile_mapping(), mode))
    }

    pub fn alphagram(&self, word: &str) -> Result<String> {
        alphagram::canonicalize(word, self.tile_mapping())
    }

    pub fn combinations(&self, alphagram: &str, with_blanks: bool) -> Result<u64> {
        self.combinator.combinations(alphagram, with_blanks)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const TEST_WORDS: [&str; 24] = [
        "AA", "AAH", "AAHS", "AEROLITH", "AH", "AHA", "AHS", "AIRT", "CAT", "CATS", "EH", "HA",
        "HAIR", "HE", "HI", "LITH", "RETAIN", "RETAINS", "RETINA", "RETINAS", "SCAT", "TA", "TAS",
        "XU",
    ];

    pub(crate) fn test_lexicon() -> Lexicon {
        Lexicon::from_words("TEST", LetterDistribution::english(), TEST_WORDS.iter()).unwrap()
    }

    #[test]
    fn test_skips_bad_words() {
        let lex = Lexicon::from_words(
            "TEST",
            LetterDistribution::english(),
            vec!["cat", "CAT", "CÄT", "", "ABCDEFGHIJKLMNOP", "dog"],
        )
        .unwrap();
        assert_eq!(lex.len(), 2);
        assert!(lex.contains("CAT"));
        assert!(lex.contains("dog"));
        assert!(!lex.contains("CÄT"));
        assert_eq!(lex.words().collect::<Vec<_>>(), vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_anagram_query() {
        let lex = test_lexicon();
        assert_eq!(lex.anagram("AEHILORT", Mode::Exact, 8).unwrap(), vec!["AEROLITH"]);
        assert_eq!(
            lex.anagram("(CS)AT", Mode::Exact, 8).unwrap(),
            vec!["CAT", "TAS"]
        );
        assert!(matches!(
            lex.anagram("AB???", Mode::Exact, 2),
            Err(LexiconError::QueryTooComplex { blanks: 3, max: 2 })
        ));
        assert!(matches!(
            lex.anagram(&"?".repeat(256), Mode::Exact, 8),
            Err(LexiconError::MalformedQuery(_))
        ));
        assert!(matches!(
            lex.anagram(&"A".repeat(256), Mode::Build, 8),
            Err(LexiconError::MalformedQuery(_))
        ));
        assert!(matches!(
            lex.anagram("AB(C", Mode::Exact, 2),
            Err(LexiconError::MalformedQuery(_))
        ));
    }

    #[test]
    fn test_alphagram_and_combinations() {
        let lex = test_lexicon();
        assert_eq!(lex.alphagram("RETINA").unwrap(), "AEINRT");
        assert_eq!(lex.combinations("AAJQQ", true).unwrap(), 153);
    }
}
