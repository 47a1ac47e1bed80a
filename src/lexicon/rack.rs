use super::alphabet::{MachineLetter, TileMapping, BLANK, BLANK_TOKEN};
use super::letter_set::LetterSet;
use crate::error::{LexiconError, Result};

/// A blank tile that may only become one of `allowed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBlank {
    pub count: u8,
    pub allowed: LetterSet,
}

/// One position of the rack a search can spend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Letter(MachineLetter),
    Blank,
    Range(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rack {
    /// Histogram count of each letter in the rack. Index 0 holds the free blanks
    pub letters: [u8; 256],
    /// Blanks restricted to a subset of letters, in query order
    pub range_blanks: Vec<RangeBlank>,
    /// The total number of remaining letters+wildcards to play
    pub n_total: u32,
}

impl Rack {
    pub fn new(letters: [u8; 256], range_blanks: Vec<RangeBlank>) -> Self {
        let n_total = letters.iter().map(|&i| i as u32).sum::<u32>()
            + range_blanks.iter().map(|rb| rb.count as u32).sum::<u32>();
        Self {
            letters,
            range_blanks,
            n_total,
        }
    }

    pub fn empty() -> Self {
        Self::new([0; 256], Vec::new())
    }

    pub fn from_machine_letters(mls: &[MachineLetter]) -> Self {
        let mut rack = Self::empty();
        for &ml in mls {
            rack.add_inplace(ml);
        }
        rack
    }

    pub fn n_blanks(&self) -> u8 {
        self.letters[BLANK as usize]
    }

    /// Number of tiles left in the rack, blanks included
    pub fn len(&self) -> usize {
        self.n_total as usize
    }

    pub fn is_empty(&self) -> bool {
        self.n_total == 0
    }

    /// Adds an additional letter (or free blank) in-place
    pub fn add_inplace(&mut self, letter: MachineLetter) {
        self.letters[letter as usize] += 1;
        self.n_total += 1;
    }

    /// Number of tiles still available in a slot
    pub fn available(&self, slot: Slot) -> u8 {
        match slot {
            Slot::Letter(l) => self.letters[l as usize],
            Slot::Blank => self.letters[BLANK as usize],
            Slot::Range(i) => self.range_blanks[i].count,
        }
    }

    /// Spends one tile of `slot`. The slot must not be exhausted.
    pub fn take(&mut self, slot: Slot) {
        let count = match slot {
            Slot::Letter(l) => &mut self.letters[l as usize],
            Slot::Blank => &mut self.letters[BLANK as usize],
            Slot::Range(i) => &mut self.range_blanks[i].count,
        };
        assert!(*count > 0, "rack slot {:?} is already exhausted", slot);
        *count -= 1;
        self.n_total -= 1;
    }

    /// Returns a tile spent with [`Rack::take`]
    pub fn put_back(&mut self, slot: Slot) {
        match slot {
            Slot::Letter(l) => self.letters[l as usize] += 1,
            Slot::Blank => self.letters[BLANK as usize] += 1,
            Slot::Range(i) => self.range_blanks[i].count += 1,
        };
        self.n_total += 1;
    }

    /// Every slot with tiles left: letters by ascending code, then the free
    /// blanks, then each range blank in query order
    pub fn slots(&self) -> Vec<Slot> {
        (1..=MachineLetter::MAX)
            .map(Slot::Letter)
            .chain(std::iter::once(Slot::Blank))
            .chain((0..self.range_blanks.len()).map(Slot::Range))
            .filter(|&slot| self.available(slot) > 0)
            .collect()
    }
}

fn is_open(c: char) -> bool {
    c == '(' || c == '['
}

fn is_close(c: char) -> bool {
    c == ')' || c == ']'
}

/// Parses a query like `AE(JQXZ)NR?(KY)?` into a rack. Letters outside of
/// brackets are regular tiles, `?` is a free blank and each bracketed group
/// is one blank limited to the letters inside it.
pub fn parse_rack(query: &str, alph: &TileMapping) -> Result<Rack> {
    let query = query.to_uppercase();
    let mut rack = Rack::empty();
    // Opening bracket and letters of the group being read
    let mut group: Option<(char, Vec<MachineLetter>)> = None;

    for c in query.chars() {
        if is_open(c) {
            if group.is_some() {
                return Err(LexiconError::MalformedQuery(format!(
                    "nested bracket in {}",
                    query
                )));
            }
            group = Some((c, Vec::new()));
            continue;
        }
        if is_close(c) {
            let (open, letters) = group.take().ok_or_else(|| {
                LexiconError::MalformedQuery(format!("unmatched {} in {}", c, query))
            })?;
            if (open == '(') != (c == ')') {
                return Err(LexiconError::MalformedQuery(format!(
                    "{} closed by {} in {}",
                    open, c, query
                )));
            }
            if letters.is_empty() {
                return Err(LexiconError::MalformedQuery(format!(
                    "empty range in {}",
                    query
                )));
            }
            rack.range_blanks.push(RangeBlank {
                count: 1,
                allowed: letters.into_iter().collect(),
            });
            rack.n_total += 1;
            continue;
        }
        match group.as_mut() {
            Some((_, letters)) => {
                let ml = match alph.val(c) {
                    Ok(ml) if c != BLANK_TOKEN => ml,
                    _ => {
                        return Err(LexiconError::MalformedQuery(format!(
                            "{} can't be part of a range in {}",
                            c, query
                        )))
                    }
                };
                letters.push(ml);
            }
            None => {
                let ml = alph.val(c)?;
                if rack.letters[ml as usize] == u8::MAX {
                    return Err(LexiconError::MalformedQuery(format!(
                        "more than {} of {} in query",
                        u8::MAX,
                        c
                    )));
                }
                rack.add_inplace(ml);
            }
        }
    }

    if group.is_some() {
        return Err(LexiconError::MalformedQuery(format!(
            "unclosed bracket in {}",
            query
        )));
    }
    Ok(rack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::distribution::LetterDistribution;

    fn english() -> TileMapping {
        LetterDistribution::english().tile_mapping().clone()
    }

    #[test]
    fn test_parse_range_blanks() {
        let alph = english();
        let rack = parse_rack("AE(JQXZ)NR?(KY)?", &alph).unwrap();
        assert_eq!(rack.len(), 8);
        assert_eq!(rack.n_blanks(), 2);
        for l in "AENR".chars() {
            assert_eq!(rack.letters[alph.val(l).unwrap() as usize], 1);
        }
        let regular: u32 = rack.letters.iter().map(|&c| c as u32).sum();
        assert_eq!(regular, 6);

        assert_eq!(rack.range_blanks.len(), 2);
        let jqxz: LetterSet = "JQXZ".chars().map(|c| alph.val(c).unwrap()).collect();
        let ky: LetterSet = "KY".chars().map(|c| alph.val(c).unwrap()).collect();
        assert_eq!(rack.range_blanks[0], RangeBlank { count: 1, allowed: jqxz });
        assert_eq!(rack.range_blanks[1], RangeBlank { count: 1, allowed: ky });
    }

    #[test]
    fn test_lowercase_and_square_brackets() {
        let alph = english();
        let rack = parse_rack("ae[kky]", &alph).unwrap();
        assert_eq!(rack.len(), 3);
        assert_eq!(rack.range_blanks[0].allowed.len(), 2);
    }

    #[test]
    fn test_malformed() {
        let alph = english();
        for q in ["AB(CD", "AB)CD", "A((B))", "A(B]", "A()", "A(B?)", "A(B1)"] {
            assert!(
                matches!(parse_rack(q, &alph), Err(LexiconError::MalformedQuery(_))),
                "{} should be malformed",
                q
            );
        }
    }

    #[test]
    fn test_unknown_letter() {
        assert!(matches!(
            parse_rack("AB1", &english()),
            Err(LexiconError::UnknownLetter(_))
        ));
    }

    #[test]
    fn test_take_and_put_back() {
        let alph = english();
        let mut rack = parse_rack("AA?(BC)", &alph).unwrap();
        let before = rack.clone();
        let a = Slot::Letter(alph.val('A').unwrap());
        assert_eq!(rack.slots(), vec![a, Slot::Blank, Slot::Range(0)]);

        rack.take(a);
        rack.take(Slot::Range(0));
        assert_eq!(rack.available(a), 1);
        assert_eq!(rack.slots(), vec![a, Slot::Blank]);
        rack.put_back(Slot::Range(0));
        rack.put_back(a);
        assert_eq!(rack, before);
    }

    #[test]
    fn test_oversized_query() {
        let alph = english();
        for q in ["A".repeat(256), "?".repeat(256), format!("B{}", "E".repeat(300))] {
            assert!(
                matches!(parse_rack(&q, &alph), Err(LexiconError::MalformedQuery(_))),
                "{} tiles should be refused",
                q.len()
            );
        }
        let full = parse_rack(&"?".repeat(255), &alph).unwrap();
        assert_eq!(full.n_blanks(), 255);
        assert_eq!(full.len(), 255);
    }

    #[test]
    #[should_panic]
    fn test_take_exhausted() {
        let mut rack = Rack::empty();
        rack.take(Slot::Blank);
    }
}
