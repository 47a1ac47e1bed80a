use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

use log::debug;

use super::alphabet::{MachineLetter, TileMapping, BLANK};
use super::graph::WordGraph;
use super::rack::{Rack, Slot};

/*
    Depth first anagramming over a word graph. The rack is walked in lockstep
    with the graph: every rack slot with tiles left is spent on one of the
    letters it can become, and the graph is followed along that letter.
    Spent tiles are returned when the subtree has been explored, so the rack
    comes back out of a search exactly as it went in.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Words using every tile of the rack
    Exact,
    /// Words using any subset of the rack
    Build,
    /// Words of exactly `length` letters. The rack gets extra free blanks to
    /// reach that length, so a longer length finds every word containing
    /// the whole rack.
    Super { length: usize },
}

/// Which accepting nodes count as answers, fixed once per search
#[derive(Debug, Clone, Copy)]
struct Emission {
    target: Option<usize>,
}

impl Emission {
    fn new(mode: Mode, rack_len: usize) -> Self {
        let target = match mode {
            Mode::Exact => Some(rack_len),
            Mode::Build => None,
            Mode::Super { length } => Some(length),
        };
        Self { target }
    }

    fn emits(&self, accepts: bool, consumed: usize) -> bool {
        accepts && self.target.map_or(true, |t| consumed == t)
    }

    fn can_extend(&self, consumed: usize) -> bool {
        self.target.map_or(true, |t| consumed < t)
    }
}

/// One tile taken out of the rack. Goes back in when dropped, whichever way
/// the search leaves the subtree.
struct Taken<'r> {
    rack: &'r mut Rack,
    slot: Slot,
}

impl<'r> Taken<'r> {
    fn new(rack: &'r mut Rack, slot: Slot) -> Self {
        rack.take(slot);
        Self { rack, slot }
    }
}

impl Deref for Taken<'_> {
    type Target = Rack;

    fn deref(&self) -> &Rack {
        self.rack
    }
}

impl DerefMut for Taken<'_> {
    fn deref_mut(&mut self) -> &mut Rack {
        self.rack
    }
}

impl Drop for Taken<'_> {
    fn drop(&mut self) {
        self.rack.put_back(self.slot);
    }
}

/// Free blanks lent to the rack for a super search
struct Lent<'r> {
    rack: &'r mut Rack,
    blanks: usize,
}

impl<'r> Lent<'r> {
    fn new(rack: &'r mut Rack, blanks: usize) -> Self {
        for _ in 0..blanks {
            rack.add_inplace(BLANK);
        }
        Self { rack, blanks }
    }
}

impl Drop for Lent<'_> {
    fn drop(&mut self) {
        for _ in 0..self.blanks {
            self.rack.take(Slot::Blank);
        }
    }
}

struct Anagrammer<'g, G: WordGraph> {
    graph: &'g G,
    emission: Emission,
    answers: Vec<Vec<MachineLetter>>,
}

impl<'g, G: WordGraph> Anagrammer<'g, G> {
    fn anagram(&mut self, rack: &mut Rack, first: Option<G::Arc>, word: &mut Vec<MachineLetter>) {
        let first = match first {
            Some(arc) if !rack.is_empty() && self.emission.can_extend(word.len()) => arc,
            _ => return,
        };

        let graph = self.graph;
        for slot in rack.slots() {
            let mut taken = Taken::new(rack, slot);
            match slot {
                Slot::Letter(letter) => {
                    if let Some(arc) = graph.find_arc(Some(first), letter) {
                        self.follow(&mut taken, arc, word);
                    }
                }
                // A free blank can be any letter the graph continues with
                Slot::Blank => {
                    for arc in graph.arcs(Some(first)) {
                        self.follow(&mut taken, arc, word);
                    }
                }
                Slot::Range(i) => {
                    let allowed = taken.range_blanks[i].allowed;
                    for letter in allowed.iter() {
                        if let Some(arc) = graph.find_arc(Some(first), letter) {
                            self.follow(&mut taken, arc, word);
                        }
                    }
                }
            }
        }
    }

    fn follow(&mut self, rack: &mut Rack, arc: G::Arc, word: &mut Vec<MachineLetter>) {
        word.push(self.graph.tile(arc));
        if self.emission.emits(self.graph.accepts(arc), word.len()) {
            self.answers.push(word.clone());
        }
        let next = self.graph.arc_index(arc);
        self.anagram(rack, next, word);
        word.pop();
    }
}

/// Finds every word of `graph` the rack can make under `mode`. Answers are
/// deduplicated and sorted. The rack is left as it was found.
pub fn search<G: WordGraph>(
    rack: &mut Rack,
    graph: &G,
    alph: &TileMapping,
    mode: Mode,
) -> Vec<String> {
    let extra = match mode {
        // The blank count has to fit a rack slot
        Mode::Super { length } => length
            .saturating_sub(rack.len())
            .min((u8::MAX - rack.n_blanks()) as usize),
        _ => 0,
    };
    let emission = Emission::new(mode, rack.len());
    let mut anagrammer = Anagrammer {
        graph,
        emission,
        answers: Vec::new(),
    };

    {
        let mut lent = Lent::new(rack, extra);
        let mut word = Vec::new();
        anagrammer.anagram(&mut *lent.rack, graph.root(), &mut word);
    }

    // Blanks can reach the same word along different paths
    let found = anagrammer.answers.len();
    let answers: BTreeSet<String> = anagrammer
        .answers
        .iter()
        .map(|w| alph.user_visible(w))
        .collect();
    debug!(
        "{:?} search over {} tiles: {} paths, {} words",
        mode,
        rack.len(),
        found,
        answers.len()
    );
    answers.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::distribution::LetterDistribution;
    use crate::lexicon::graph::FstGraph;
    use crate::lexicon::rack::parse_rack;

    const WORDS: [&str; 42] = [
        "AA", "AAH", "AEROLITH", "AIRT", "ALIT", "ANESTRI", "EH", "EX", "GAMODEME", "HAIR", "HALO",
        "HE", "HI", "HO", "HOLT", "HOMEMADE", "LITH", "LOTH", "NASTIER", "OH", "OR", "OX", "QI",
        "RATH", "RATINE", "RATINES", "RETAIN", "RETAINS", "RETINA", "RETINAS", "RETSINA", "ROTL",
        "STAINER", "STEARIN", "TA", "TAHR", "THIO", "TI", "TO", "TOIL", "XU", "ZA",
    ];

    fn setup() -> (FstGraph, TileMapping) {
        let alph = LetterDistribution::english().tile_mapping().clone();
        let words = WORDS.iter().map(|w| alph.to_machine_letters(w).unwrap());
        (FstGraph::from_words(words).unwrap(), alph)
    }

    fn anagram(query: &str, mode: Mode) -> Vec<String> {
        let (graph, alph) = setup();
        let mut rack = parse_rack(query, &alph).unwrap();
        search(&mut rack, &graph, &alph, mode)
    }

    /// Whether `word` can be spelled from `letters` plus `blanks` wildcards
    fn fits(word: &str, letters: &str, blanks: usize) -> bool {
        let mut pool: Vec<char> = letters.chars().collect();
        let mut missing = 0;
        for c in word.chars() {
            match pool.iter().position(|&p| p == c) {
                Some(i) => {
                    pool.swap_remove(i);
                }
                None => missing += 1,
            }
        }
        missing <= blanks
    }

    fn brute_force(letters: &str, blanks: usize, exact: bool) -> Vec<String> {
        let len = letters.chars().count() + blanks;
        let mut words: Vec<String> = WORDS
            .iter()
            .filter(|w| fits(w, letters, blanks))
            .filter(|w| !exact || w.chars().count() == len)
            .map(|w| w.to_string())
            .collect();
        words.sort();
        words
    }

    #[test]
    fn test_exact_single_answer() {
        assert_eq!(anagram("AEHILORT", Mode::Exact), vec!["AEROLITH"]);
        assert_eq!(anagram("aehilort", Mode::Exact), vec!["AEROLITH"]);
        assert_eq!(anagram("UX", Mode::Exact), vec!["XU"]);
    }

    #[test]
    fn test_exact_with_blank() {
        assert_eq!(
            anagram("ADEEMMO?", Mode::Exact),
            vec!["GAMODEME", "HOMEMADE"]
        );
    }

    #[test]
    fn test_nothing_to_build() {
        assert!(anagram("HHHHHHHH", Mode::Build).is_empty());
        assert!(anagram("HHHHHHHH", Mode::Exact).is_empty());
        assert!(anagram("", Mode::Build).is_empty());
    }

    #[test]
    fn test_against_brute_force() {
        for (letters, blanks) in [("AEHILORT", 0), ("AEINRST", 0), ("RETIN", 1), ("AH", 1), ("", 2)] {
            let query = format!("{}{}", letters, "?".repeat(blanks));
            assert_eq!(
                anagram(&query, Mode::Build),
                brute_force(letters, blanks, false),
                "build {}",
                query
            );
            assert_eq!(
                anagram(&query, Mode::Exact),
                brute_force(letters, blanks, true),
                "exact {}",
                query
            );
        }
    }

    #[test]
    fn test_build_contains_exact() {
        for query in ["AEHILORT", "RETAINS", "RETINA?", "A?"] {
            let build = anagram(query, Mode::Build);
            for word in anagram(query, Mode::Exact) {
                assert!(build.contains(&word), "{} missing from build {}", word, query);
            }
        }
    }

    #[test]
    fn test_blank_duplicates_collapse() {
        // AA is reachable with the blank as either A
        let words = anagram("A?", Mode::Exact);
        assert_eq!(words.iter().filter(|w| *w == "AA").count(), 1);
        assert_eq!(words, vec!["AA", "TA", "ZA"]);
    }

    #[test]
    fn test_range_blanks() {
        assert_eq!(
            anagram("RETIN(AS)", Mode::Exact),
            vec!["RATINE", "RETAIN", "RETINA"]
        );
        assert_eq!(anagram("RETIN(AS)S", Mode::Exact).len(), 8);
        // Each range blank is spent exactly once
        assert_eq!(
            anagram("RETI(AN)(AN)", Mode::Exact),
            vec!["RATINE", "RETAIN", "RETINA"]
        );
        assert!(anagram("RETI(QZ)(AN)", Mode::Exact).is_empty());
    }

    #[test]
    fn test_super() {
        let supers = anagram("RETINA", Mode::Super { length: 7 });
        assert_eq!(
            supers,
            vec!["ANESTRI", "NASTIER", "RATINES", "RETAINS", "RETINAS", "RETSINA", "STAINER", "STEARIN"]
        );
        let fours = anagram("AEHILORT", Mode::Super { length: 4 });
        let expected: Vec<String> = brute_force("AEHILORT", 0, false)
            .into_iter()
            .filter(|w| w.len() == 4)
            .collect();
        assert_eq!(fours, expected);
    }

    #[test]
    fn test_super_beyond_any_word() {
        assert!(anagram("A", Mode::Super { length: 1000 }).is_empty());
        assert!(anagram(&"?".repeat(250), Mode::Super { length: 300 }).is_empty());
    }

    #[test]
    fn test_rack_restored() {
        let (graph, alph) = setup();
        for query in ["AEHILORT", "RETIN(AS)?", "??", "AE(JQXZ)NR?(KY)?"] {
            for mode in [Mode::Exact, Mode::Build, Mode::Super { length: 9 }] {
                let mut rack = parse_rack(query, &alph).unwrap();
                let before = rack.clone();
                search(&mut rack, &graph, &alph, mode);
                assert_eq!(rack, before, "{} {:?}", query, mode);
            }
        }
    }
}
